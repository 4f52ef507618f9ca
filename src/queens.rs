//! The [`n` queens puzzle](https://en.wikipedia.org/wiki/Eight_queens_puzzle)
//!  is the problem of placing `n` chess queens on an `n`×`n` chessboard so that
//! no two queens threaten each other.
//!
//! A solution to the problem requires that no two queens share the same row,
//! column, or diagonal. Every board row and column must hold exactly one queen,
//! so those are primary columns of the exact cover matrix. Diagonals hold at
//! most one queen and become secondary columns.

use crate::{CoverMatrix, Error, Result, Solution};
use ndarray::{Array2, ArrayView2};

/// Exact cover matrix of the `n` queens puzzle.
///
/// Matrix row `r·n + c` places a queen on board row `r`, board column `c`.
/// The columns are, in order: `n` board-row constraints, `n` board-column
/// constraints, then one secondary column per leading and per trailing
/// diagonal with at least two squares.
#[derive(Debug, Clone)]
pub struct NQueens {
    side_length: usize,
    matrix: Array2<bool>,
    cover: CoverMatrix,
}

impl NQueens {
    /// Build the matrix for an empty board with `side_length` squares per
    /// side.
    pub fn new(side_length: usize) -> Result<Self> {
        if side_length == 0 {
            return Err(Error::InvalidSize { size: side_length });
        }

        let diagonals = Self::diagonals_per_direction(side_length);
        let num_columns = 2 * side_length + 2 * diagonals;
        let mut matrix = Array2::from_elem((side_length * side_length, num_columns), false);

        for row in 0..side_length {
            for column in 0..side_length {
                let index = row * side_length + column;
                matrix[[index, row]] = true;
                matrix[[index, side_length + column]] = true;

                let leading = leading_diagonal(row, column, side_length);
                if (1..=diagonals).contains(&leading) {
                    matrix[[index, 2 * side_length + leading - 1]] = true;
                }

                let trailing = trailing_diagonal(row, column);
                if (1..=diagonals).contains(&trailing) {
                    matrix[[index, 2 * side_length + diagonals + trailing - 1]] = true;
                }
            }
        }

        let cover = CoverMatrix::from_dense_with(matrix.view(), |set| *set, Some(2 * side_length))?;

        Ok(NQueens {
            side_length,
            matrix,
            cover,
        })
    }

    // Diagonals with a single square (the corners) can never conflict and
    // are left out.
    fn diagonals_per_direction(side_length: usize) -> usize {
        (2 * side_length).saturating_sub(3)
    }

    /// Return the length of the chess board side, equal to `n`.
    pub fn side_length(&self) -> usize {
        self.side_length
    }

    /// Return the number of primary columns, `2n`.
    pub fn primary_columns(&self) -> usize {
        2 * self.side_length
    }

    /// Return the dense boolean matrix.
    pub fn matrix(&self) -> ArrayView2<'_, bool> {
        self.matrix.view()
    }

    /// Return the matrix in the form consumed by the solver.
    pub fn cover_matrix(&self) -> &CoverMatrix {
        &self.cover
    }

    /// Return the `(row, column)` position of every queen in `solution`.
    pub fn queens(&self, solution: &Solution) -> Vec<(usize, usize)> {
        solution
            .iter()
            .map(|index| (index / self.side_length, index % self.side_length))
            .collect()
    }

    /// Return the board for `solution`, with `true` marking a queen.
    ///
    /// # Panics
    ///
    /// Panics if `solution` contains a row outside of this board.
    pub fn board(&self, solution: &Solution) -> Array2<bool> {
        let mut board = Array2::from_elem((self.side_length, self.side_length), false);
        for (row, column) in self.queens(solution) {
            board[[row, column]] = true;
        }

        board
    }
}

/// Return the leading diagonal index of a square.
///
/// This value ranges from 0 to `2n - 2`.
fn leading_diagonal(row: usize, column: usize, side_length: usize) -> usize {
    column + side_length - 1 - row
}

/// Return the trailing diagonal index of a square.
///
/// The value ranges from 0 to `2n - 2`.
fn trailing_diagonal(row: usize, column: usize) -> usize {
    row + column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndexedInstance, LinkedInstance};

    #[test]
    fn check_diagonal_indices() {
        let side_length = 8;
        let leading_diagonal_indices: Vec<_> = (0..side_length)
            .rev()
            .map(|row| (row, 0))
            .chain((1..side_length).map(|column| (0, column)))
            .map(|(row, column)| leading_diagonal(row, column, side_length))
            .collect();
        assert_eq!(leading_diagonal_indices, (0..15).collect::<Vec<_>>());

        let trailing_diagonal_indices: Vec<_> = (0..side_length)
            .map(|column| (0, column))
            .chain((1..side_length).map(|row| (row, side_length - 1)))
            .map(|(row, column)| trailing_diagonal(row, column))
            .collect();
        assert_eq!(trailing_diagonal_indices, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn matrix_layout() {
        let queens = NQueens::new(5).unwrap();

        assert_eq!(queens.matrix().dim(), (25, 6 * 5 - 6));
        assert_eq!(queens.primary_columns(), 10);
        assert_eq!(queens.cover_matrix().primary_columns(), 10);
        // A corner square sits on one long diagonal only.
        assert_eq!(queens.cover_matrix().row(0).len(), 3);
        // The center square sits on both long diagonals.
        assert_eq!(queens.cover_matrix().row(12).len(), 4);

        assert_eq!(NQueens::new(0).unwrap_err(), Error::InvalidSize { size: 0 });
    }

    #[test]
    fn check_tiny_boards() {
        let size_one_board = NQueens::new(1).unwrap();
        let solutions: Vec<_> = LinkedInstance::new(size_one_board.cover_matrix())
            .search()
            .collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(size_one_board.queens(&solutions[0]), vec![(0, 0)]);

        for side_length in [2, 3] {
            let board = NQueens::new(side_length).unwrap();
            assert_eq!(LinkedInstance::new(board.cover_matrix()).search().count(), 0);
        }
    }

    #[test]
    fn check_small_board() {
        let queens = NQueens::new(4).unwrap();
        let mut solutions: Vec<_> = IndexedInstance::new(queens.cover_matrix())
            .unwrap()
            .search()
            .map(|solution| queens.queens(&solution))
            .collect();
        solutions.sort();

        assert_eq!(
            solutions,
            vec![
                vec![(0, 1), (1, 3), (2, 0), (3, 2)],
                vec![(0, 2), (1, 0), (2, 3), (3, 1)],
            ]
        );
    }

    #[test]
    fn board_marks_queens() {
        let queens = NQueens::new(4).unwrap();
        let solution = Solution::new(vec![1, 7, 8, 14]);
        let board = queens.board(&solution);

        assert_eq!(board.iter().filter(|square| **square).count(), 4);
        assert!(board[[0, 1]] && board[[1, 3]] && board[[2, 0]] && board[[3, 2]]);
    }

    #[test]
    #[cfg_attr(miri, ignore)] // takes too long on miri
    fn count_medium_board() {
        let queens = NQueens::new(8).unwrap();

        assert_eq!(LinkedInstance::new(queens.cover_matrix()).search().count(), 92);
        assert_eq!(
            IndexedInstance::new(queens.cover_matrix())
                .unwrap()
                .par_search(2)
                .len(),
            92
        );
    }
}
