//! Run Sudoku solver
//! Usage:
//!
//! ```bash
//! cargo run --release --example sudoku 300080900000340000008005600500104070002009010003000040005001200000000000070008090 [depth]
//! ```
//!
//! With a `depth` the search forks over that many levels on the rayon thread
//! pool, otherwise it runs sequentially.

use ndarray::Array2;
use parallel_dlx::{sudoku::Sudoku, IndexedInstance, LinkedInstance, Solution};

fn print_solution(puzzle: &Sudoku, solution: &Solution) {
    let grid = puzzle.solution_grid(solution, |digit| char::from(b'1' + digit as u8));
    for row in grid.rows() {
        println!("{}", row.iter().collect::<String>());
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("problem needed");
        std::process::exit(1);
    }

    let problem = &args[1];
    if problem.len() != 9 * 9 || !problem.chars().all(|c| c.is_ascii_digit()) {
        eprintln!("invalid problem format");
        std::process::exit(1);
    }

    let depth = match args.get(2).map(|depth| depth.parse::<usize>()) {
        None => None,
        Some(Ok(depth)) => Some(depth),
        Some(Err(err)) => {
            eprintln!("invalid depth: {err}");
            std::process::exit(1);
        }
    };

    let cells: Vec<u8> = problem.bytes().map(|c| c - b'0').collect();
    let grid = Array2::from_shape_vec((9, 9), cells).expect("checked length");
    let sudoku = match Sudoku::new(grid.view(), |value| usize::from(*value).checked_sub(1)) {
        Ok(sudoku) => sudoku,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match depth {
        Some(depth) => match IndexedInstance::new(sudoku.cover_matrix()) {
            Ok(instance) => {
                for solution in instance.par_search(depth) {
                    print_solution(&sudoku, &solution);
                    println!();
                }
            }
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => {
            for solution in LinkedInstance::new(sudoku.cover_matrix()).search() {
                print_solution(&sudoku, &solution);
                println!();
            }
        }
    }
}
