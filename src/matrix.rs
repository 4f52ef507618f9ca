//! Ingestion of exact cover problems.
//!
//! Builders hand over a dense matrix and a predicate that decides which cells
//! are set. [`CoverMatrix`] keeps only the set cells, row by row, together
//! with the number of primary columns. Both representations of the dancing
//! links structure are built from it.

use crate::{Error, Result};
use ndarray::ArrayView2;

/// The set cells of an exact cover matrix, stored row by row.
///
/// Columns with an index below [`primary_columns`](Self::primary_columns)
/// must be covered exactly once by a solution, the remaining columns are
/// secondary and may be covered at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverMatrix {
    num_columns: usize,
    primary_columns: usize,
    // Column indices of all set cells, in row-major order.
    columns: Vec<usize>,
    // `columns[row_offsets[r]..row_offsets[r + 1]]` are the set cells of row `r`.
    row_offsets: Vec<usize>,
}

impl CoverMatrix {
    /// Build a matrix from a dense view, treating every cell that is not equal
    /// to `T::default()` as set. All columns are primary.
    pub fn from_dense<T>(matrix: ArrayView2<'_, T>) -> Self
    where
        T: Default + PartialEq,
    {
        let unset = T::default();
        let num_columns = matrix.ncols();

        Self::collect_dense(matrix, |cell| *cell != unset, num_columns)
    }

    /// Build a matrix from a dense view with a custom membership predicate.
    ///
    /// If `primary_columns` is `None`, every column is primary.
    pub fn from_dense_with<T, P>(
        matrix: ArrayView2<'_, T>,
        predicate: P,
        primary_columns: Option<usize>,
    ) -> Result<Self>
    where
        P: FnMut(&T) -> bool,
    {
        let num_columns = matrix.ncols();
        let primary_columns = Self::check_primary(primary_columns, num_columns)?;

        Ok(Self::collect_dense(matrix, predicate, primary_columns))
    }

    /// Build a matrix from lists of set column indices, one list per row.
    ///
    /// Column indices within a row may appear in any order, they are stored
    /// in ascending order.
    pub fn from_rows<R>(
        num_columns: usize,
        primary_columns: Option<usize>,
        rows: impl IntoIterator<Item = R>,
    ) -> Result<Self>
    where
        R: IntoIterator<Item = usize>,
    {
        let primary_columns = Self::check_primary(primary_columns, num_columns)?;

        let mut columns = Vec::new();
        let mut row_offsets = vec![0];
        for (row, cells) in rows.into_iter().enumerate() {
            let start = columns.len();
            columns.extend(cells);

            let row_columns = &mut columns[start..];
            row_columns.sort_unstable();
            if let Some(&column) = row_columns.last().filter(|column| **column >= num_columns) {
                return Err(Error::ColumnOutOfRange {
                    row,
                    column,
                    columns: num_columns,
                });
            }
            if let Some(pair) = row_columns.windows(2).find(|pair| pair[0] == pair[1]) {
                return Err(Error::DuplicateColumn {
                    row,
                    column: pair[0],
                });
            }

            row_offsets.push(columns.len());
        }

        Ok(CoverMatrix {
            num_columns,
            primary_columns,
            columns,
            row_offsets,
        })
    }

    fn check_primary(primary_columns: Option<usize>, num_columns: usize) -> Result<usize> {
        match primary_columns {
            None => Ok(num_columns),
            Some(primary) if primary <= num_columns => Ok(primary),
            Some(primary) => Err(Error::PrimaryColumnsOutOfRange {
                primary,
                columns: num_columns,
            }),
        }
    }

    fn collect_dense<T>(
        matrix: ArrayView2<'_, T>,
        mut predicate: impl FnMut(&T) -> bool,
        primary_columns: usize,
    ) -> Self {
        let mut columns = Vec::new();
        let mut row_offsets = Vec::with_capacity(matrix.nrows() + 1);
        row_offsets.push(0);

        for row in matrix.outer_iter() {
            columns.extend(
                row.iter()
                    .enumerate()
                    .filter(|(_, cell)| predicate(*cell))
                    .map(|(column, _)| column),
            );
            row_offsets.push(columns.len());
        }

        CoverMatrix {
            num_columns: matrix.ncols(),
            primary_columns,
            columns,
            row_offsets,
        }
    }

    /// Return the number of rows.
    pub fn num_rows(&self) -> usize {
        self.row_offsets.len() - 1
    }

    /// Return the number of columns, primary and secondary.
    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    /// Return the number of primary columns.
    pub fn primary_columns(&self) -> usize {
        self.primary_columns
    }

    /// Return the total number of set cells.
    pub fn num_entries(&self) -> usize {
        self.columns.len()
    }

    /// Return the ascending column indices of the set cells in `row`.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of bounds.
    pub fn row(&self, row: usize) -> &[usize] {
        &self.columns[self.row_offsets[row]..self.row_offsets[row + 1]]
    }

    /// Return an iterator over all rows, see [`row`](Self::row).
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.num_rows()).map(move |row| self.row(row))
    }
}
