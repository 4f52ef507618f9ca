#![no_main]

use libfuzzer_sys::fuzz_target;
use parallel_dlx::{sudoku::Sudoku, LinkedInstance};

#[derive(Debug)]
struct Sudoku4x4Input {
    cells: [u8; 16],
}

impl<'a> arbitrary::Arbitrary<'a> for Sudoku4x4Input {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let mut cells = u.arbitrary::<[u8; 16]>()?;
        for value in &mut cells {
            *value %= 5;
        }

        Ok(Sudoku4x4Input { cells })
    }
}

fuzz_target!(|data: Sudoku4x4Input| {
    let grid = ndarray::Array2::from_shape_fn((4, 4), |(row, column)| data.cells[row * 4 + column]);
    let Ok(puzzle) = Sudoku::new(grid.view(), |value| usize::from(*value).checked_sub(1)) else {
        return;
    };

    for solution in LinkedInstance::new(puzzle.cover_matrix()).search() {
        let solved = puzzle.solution_grid(&solution, |digit| digit as u8 + 1);
        for (given, placed) in grid.iter().zip(solved.iter()) {
            assert!(*given == 0 || given == placed);
        }
    }
});
