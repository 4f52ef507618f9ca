#![allow(dead_code)]

use ndarray::Array2;
use parallel_dlx::{CoverMatrix, IndexedInstance, LinkedInstance, Solution};
use std::collections::BTreeSet;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub type SolutionSet = BTreeSet<Vec<usize>>;

pub fn solution_set(solutions: impl IntoIterator<Item = Solution>) -> SolutionSet {
    let mut set = SolutionSet::new();
    for solution in solutions {
        let rows = Vec::from(solution);
        assert!(set.insert(rows.clone()), "Solution [{rows:?}] reported twice");
    }

    set
}

pub fn expected_set(rows: &[&[usize]]) -> SolutionSet {
    rows.iter().map(|rows| rows.to_vec()).collect()
}

pub fn linked_solutions(matrix: &CoverMatrix) -> SolutionSet {
    solution_set(LinkedInstance::new(matrix).search())
}

pub fn indexed_solutions(matrix: &CoverMatrix) -> SolutionSet {
    solution_set(IndexedInstance::new(matrix).unwrap().search())
}

pub fn parallel_solutions(matrix: &CoverMatrix, depth: usize) -> SolutionSet {
    solution_set(IndexedInstance::new(matrix).unwrap().par_search(depth))
}

/// Check that every solution covers each primary column exactly once and each
/// secondary column at most once.
pub fn assert_exact_covers(matrix: &CoverMatrix, solutions: &SolutionSet) {
    for rows in solutions {
        let mut counts = vec![0; matrix.num_columns()];
        for &row in rows {
            for &column in matrix.row(row) {
                counts[column] += 1;
            }
        }

        for (column, count) in counts.into_iter().enumerate() {
            if column < matrix.primary_columns() {
                assert_eq!(count, 1, "column [{column}] in solution [{rows:?}]");
            } else {
                assert!(count <= 1, "column [{column}] in solution [{rows:?}]");
            }
        }
    }
}

pub fn knuth_matrix() -> CoverMatrix {
    CoverMatrix::from_dense(
        ndarray::array![
            [0, 0, 1, 0, 1, 1, 0],
            [1, 0, 0, 1, 0, 0, 1],
            [0, 1, 1, 0, 0, 1, 0],
            [1, 0, 0, 1, 0, 0, 0],
            [0, 1, 0, 0, 0, 0, 1],
            [0, 0, 0, 1, 1, 0, 1],
        ]
        .view(),
    )
}

pub fn multiple_solutions_matrix() -> CoverMatrix {
    CoverMatrix::from_dense(
        ndarray::array![
            [1, 0, 0, 0],
            [0, 1, 1, 0],
            [1, 0, 0, 1],
            [0, 0, 1, 1],
            [0, 1, 0, 0],
            [0, 0, 1, 0],
        ]
        .view(),
    )
}

/// Deterministic pseudo random sparse matrix, with the given number of
/// secondary columns at the end.
pub fn scrambled_matrix(seed: u64, rows: usize, columns: usize, secondary: usize) -> CoverMatrix {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let rows: Vec<Vec<usize>> = (0..rows)
        .map(|_| (0..columns).filter(|_| next() % 4 == 0).collect())
        .collect();

    CoverMatrix::from_rows(columns, Some(columns - secondary), rows).unwrap()
}

/// Parse a Sudoku grid from a row-major string, with `0` for blank cells.
pub fn parse_sudoku(input: &str) -> Array2<u8> {
    let side_length = (1..=input.len())
        .find(|side| side * side >= input.len())
        .unwrap();
    assert_eq!(
        side_length * side_length,
        input.len(),
        "Input needs to be `side_length` * `side_length` characters long."
    );

    let digits = input
        .chars()
        .map(|c| c.to_digit(10).expect("only digits are allowed") as u8)
        .collect();

    Array2::from_shape_vec((side_length, side_length), digits).unwrap()
}

/// Format a Sudoku grid into the format accepted by `parse_sudoku`.
pub fn format_sudoku(grid: &Array2<u8>) -> String {
    grid.iter()
        .map(|digit| char::from_digit(u32::from(*digit), 10).unwrap())
        .collect()
}
