//! A [Sudoku puzzle](https://en.wikipedia.org/wiki/Sudoku) is a
//! `n^2` × `n^2` array with sub-arrays of size `n` × `n`. Each row, column, and
//! sub-array contains the values `1` through `n` with no repeats.
//!
//! Digits are handled 0-based here; callers map their own cell values to and
//! from digits.

use crate::{CoverMatrix, Error, Result, Solution};
use ndarray::{Array2, ArrayView2};

/// Exact cover matrix of a Sudoku puzzle.
///
/// There is one matrix row per candidate placement: a single row for a given
/// cell and one row per digit for a blank cell, in row-major cell order. All
/// `4·n²` columns are primary, laid out as four groups of `n²` constraints:
/// cell filled, row has digit, column has digit, box has digit.
#[derive(Debug, Clone)]
pub struct Sudoku {
    side_length: usize,
    box_side_length: usize,
    // (row, column, digit) placed by each matrix row.
    candidates: Vec<(usize, usize, usize)>,
    matrix: Array2<bool>,
    cover: CoverMatrix,
}

impl Sudoku {
    /// Build the matrix for an empty grid with `side_length` cells per side.
    pub fn empty(side_length: usize) -> Result<Self> {
        let box_side_length = Self::validate_dimensions(side_length, side_length)?;
        let cells = (0..side_length)
            .flat_map(|row| (0..side_length).map(move |column| (row, column, None)));

        Ok(Self::from_cells(side_length, box_side_length, cells))
    }

    /// Build the matrix for a partially filled grid.
    ///
    /// `map` returns `None` for a blank cell, and the 0-based digit of the cell
    /// otherwise.
    pub fn new<T>(grid: ArrayView2<'_, T>, map: impl Fn(&T) -> Option<usize>) -> Result<Self> {
        let (rows, columns) = grid.dim();
        let box_side_length = Self::validate_dimensions(rows, columns)?;

        let cells = grid
            .indexed_iter()
            .map(|((row, column), value)| match map(value) {
                Some(digit) if digit >= rows => Err(Error::ValueOutOfRange {
                    row,
                    column,
                    value: digit,
                    max: rows,
                }),
                digit => Ok((row, column, digit)),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_cells(rows, box_side_length, cells))
    }

    /// Check the grid shape and return the box side length.
    fn validate_dimensions(rows: usize, columns: usize) -> Result<usize> {
        if rows < 4 {
            return Err(Error::InvalidSize { size: rows });
        }

        let box_side_length = (1..=rows).find(|side| side * side >= rows).unwrap_or(rows);
        if rows != columns || box_side_length * box_side_length != rows {
            return Err(Error::NotPerfectSquare { rows, columns });
        }

        Ok(box_side_length)
    }

    fn from_cells(
        side_length: usize,
        box_side_length: usize,
        cells: impl IntoIterator<Item = (usize, usize, Option<usize>)>,
    ) -> Self {
        let candidates: Vec<_> = cells
            .into_iter()
            .flat_map(|(row, column, digit)| {
                let digits = match digit {
                    Some(digit) => digit..digit + 1,
                    None => 0..side_length,
                };

                digits.map(move |digit| (row, column, digit))
            })
            .collect();

        let area = side_length * side_length;
        let mut matrix = Array2::from_elem((candidates.len(), 4 * area), false);
        for (index, &(row, column, digit)) in candidates.iter().enumerate() {
            let square = (row / box_side_length) * box_side_length + column / box_side_length;

            matrix[[index, side_length * row + column]] = true;
            matrix[[index, area + side_length * row + digit]] = true;
            matrix[[index, 2 * area + side_length * column + digit]] = true;
            matrix[[index, 3 * area + side_length * square + digit]] = true;
        }

        let cover = CoverMatrix::from_dense(matrix.view());

        Sudoku {
            side_length,
            box_side_length,
            candidates,
            matrix,
            cover,
        }
    }

    /// Return the number of cells per side.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Return the number of cells per box side.
    pub fn box_side_length(&self) -> usize {
        self.box_side_length
    }

    /// Return the number of primary columns, `4·n²`.
    pub fn primary_columns(&self) -> usize {
        self.matrix.ncols()
    }

    /// Return the dense boolean matrix.
    pub fn matrix(&self) -> ArrayView2<'_, bool> {
        self.matrix.view()
    }

    /// Return the matrix in the form consumed by the solver.
    pub fn cover_matrix(&self) -> &CoverMatrix {
        &self.cover
    }

    /// Fill a grid from `solution`, converting each 0-based digit with `map`.
    ///
    /// Cells not placed by `solution` keep `U::default()`.
    ///
    /// # Panics
    ///
    /// Panics if `solution` contains a row that is not part of this matrix.
    pub fn solution_grid<U>(&self, solution: &Solution, map: impl Fn(usize) -> U) -> Array2<U>
    where
        U: Clone + Default,
    {
        let mut grid = Array2::default((self.side_length, self.side_length));
        for &index in solution {
            let (row, column, digit) = self.candidates[index];
            grid[[row, column]] = map(digit);
        }

        grid
    }
}
