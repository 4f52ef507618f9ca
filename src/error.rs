//! Errors reported while building exact cover problems.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// An invalid argument was passed while building a problem instance.
///
/// None of these are recoverable by retrying; they all point at input that
/// needs to be fixed by the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The primary column count is larger than the number of columns.
    #[error("primary column count [{primary}] exceeds the column count [{columns}]")]
    PrimaryColumnsOutOfRange {
        /// The requested number of primary columns.
        primary: usize,
        /// The number of columns in the matrix.
        columns: usize,
    },

    /// A row refers to a column that does not exist.
    #[error("row [{row}] refers to column [{column}], but there are only [{columns}] columns")]
    ColumnOutOfRange {
        /// The offending row.
        row: usize,
        /// The offending column index.
        column: usize,
        /// The number of columns in the matrix.
        columns: usize,
    },

    /// A row lists the same column more than once.
    #[error("row [{row}] contains column [{column}] more than once")]
    DuplicateColumn {
        /// The offending row.
        row: usize,
        /// The repeated column index.
        column: usize,
    },

    /// The matrix does not fit into the handle width of the indexed
    /// representation.
    #[error("matrix needs [{entries}] entries, but at most [{max}] can be addressed")]
    TooManyEntries {
        /// Number of entries (root, headers and matrix ones) required.
        entries: usize,
        /// Maximum number of addressable entries.
        max: usize,
    },

    /// A puzzle size was zero or otherwise too small.
    #[error("invalid puzzle size [{size}]")]
    InvalidSize {
        /// The rejected size.
        size: usize,
    },

    /// A Sudoku grid is not square, or its side is not a perfect square.
    #[error("grid dimensions [{rows}x{columns}] are not a perfect square")]
    NotPerfectSquare {
        /// Number of grid rows.
        rows: usize,
        /// Number of grid columns.
        columns: usize,
    },

    /// A Sudoku cell was mapped to a digit outside of the board's range.
    #[error("cell [{row},{column}] was mapped to digit [{value}], expected less than [{max}]")]
    ValueOutOfRange {
        /// Grid row of the cell.
        row: usize,
        /// Grid column of the cell.
        column: usize,
        /// The 0-based digit returned by the mapping function.
        value: usize,
        /// The exclusive upper bound for digits.
        max: usize,
    },
}
