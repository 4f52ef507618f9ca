#![deny(missing_docs)]

//! Implementation of [Dancing Links](https://en.wikipedia.org/wiki/Dancing_Links)
//! and [Algorithm X](https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X) for solving
//!  [exact cover](https://en.wikipedia.org/wiki/Exact_cover) problems, with a
//! fork-join parallel search.
//!
//! A problem is ingested into a [`CoverMatrix`] and then built into one of two
//! equivalent representations of the dancing links structure:
//!
//!  - [`LinkedInstance`], a graph of entries holding direct links to their
//!    neighbors, searched sequentially;
//!  - [`IndexedInstance`], an array of links addressed by small integer
//!    handles, which is cheap to clone and can also be searched in parallel
//!    with [`IndexedInstance::par_search`].
//!
//! ```
//! use ndarray::array;
//! use parallel_dlx::{CoverMatrix, IndexedInstance, LinkedInstance};
//!
//! let matrix = CoverMatrix::from_dense(
//!     array![
//!         [0, 0, 1, 0, 1, 1, 0],
//!         [1, 0, 0, 1, 0, 0, 1],
//!         [0, 1, 1, 0, 0, 1, 0],
//!         [1, 0, 0, 1, 0, 0, 0],
//!         [0, 1, 0, 0, 0, 0, 1],
//!         [0, 0, 0, 1, 1, 0, 1],
//!     ]
//!     .view(),
//! );
//!
//! let solutions: Vec<_> = LinkedInstance::new(&matrix).search().collect();
//! assert_eq!(solutions.len(), 1);
//! assert_eq!(solutions[0].row_indices(), &[0, 3, 4]);
//!
//! let parallel = IndexedInstance::new(&matrix)?.par_search(2);
//! assert_eq!(parallel, solutions);
//! # Ok::<(), parallel_dlx::Error>(())
//! ```

mod error;
pub(crate) mod grid;
pub mod indexed;
pub(crate) mod linked;
pub mod matrix;
mod parallel;
pub mod queens;
pub(crate) mod search;
mod solution;
pub mod sudoku;

pub use error::{Error, Result};
pub use indexed::{EntryId, IndexedInstance};
pub use linked::LinkedInstance;
pub use matrix::CoverMatrix;
pub use search::Search;
pub use solution::Solution;
