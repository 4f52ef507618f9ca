//! Fork-join parallel search over [`IndexedInstance`]s.
//!
//! For the first `depth` levels of the search tree, every row of the chosen
//! column is tried on its own clone of the instance, in its own rayon job.
//! Below that, each job runs the sequential [`Search`](crate::Search) on the
//! clone it owns. The jobs of a level are joined before the level returns.

use crate::{grid::Grid, IndexedInstance, Solution};
use parking_lot::Mutex;

impl IndexedInstance {
    /// Return every exact cover, searching the first `depth` levels of the
    /// search tree in parallel on the rayon thread pool.
    ///
    /// With `depth == 0` this is the sequential search. Each fork clones the
    /// links of the instance, so the number of clones grows with the branching
    /// factor to the power of `depth`.
    ///
    /// The order of the returned solutions is unspecified.
    pub fn par_search(self, depth: usize) -> Vec<Solution> {
        log::debug!("Starting parallel search with depth budget [{}].", depth);

        if depth == 0 {
            return self.search().collect();
        }

        let solutions = Mutex::new(Vec::new());
        self.fork(depth, &solutions);

        solutions.into_inner()
    }

    fn fork(mut self, depth: usize, solutions: &Mutex<Vec<Solution>>) {
        let Some(column) = self.choose_column() else {
            debug_assert!(self.root_is_empty());
            if let Some(solution) = self.current_solution() {
                log::trace!("Found solution {:?}.", solution.row_indices());
                solutions.lock().push(solution);
            }

            return;
        };

        self.cover(column);

        let instance = &self;
        rayon::scope(|scope| {
            let mut branches = 0;
            let mut row = instance.down(column);
            while row != column {
                // The clone owns its links from here on, the original is only
                // read to find the next row.
                let mut branch = instance.clone();
                branch.select_row(row);
                branches += 1;

                if depth > 1 {
                    scope.spawn(move |_| branch.fork(depth - 1, solutions));
                } else {
                    scope.spawn(move |_| {
                        let found: Vec<_> = branch.search().collect();
                        if !found.is_empty() {
                            solutions.lock().extend(found);
                        }
                    });
                }

                row = instance.down(row);
            }

            log::debug!(
                "Forked [{}] branches with [{}] levels left.",
                branches,
                depth - 1
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::{CoverMatrix, IndexedInstance, Solution};
    use std::collections::BTreeSet;

    fn solutions_of(matrix: &CoverMatrix, depth: usize) -> BTreeSet<Solution> {
        IndexedInstance::new(matrix)
            .unwrap()
            .par_search(depth)
            .into_iter()
            .collect()
    }

    #[test]
    fn depth_does_not_change_solutions() {
        let matrix = CoverMatrix::from_rows(
            4,
            None,
            vec![
                vec![0],
                vec![1, 2],
                vec![0, 3],
                vec![2, 3],
                vec![1],
                vec![2],
            ],
        )
        .unwrap();

        let expected: BTreeSet<_> = [vec![0, 3, 4], vec![1, 2], vec![2, 4, 5]]
            .into_iter()
            .map(Solution::new)
            .collect();

        for depth in 0..5 {
            assert_eq!(solutions_of(&matrix, depth), expected, "depth {depth}");
        }
    }

    #[test]
    fn unsolvable_matrix_has_no_solutions() {
        let matrix = CoverMatrix::from_rows(3, None, vec![vec![0, 1], vec![1, 2]]).unwrap();

        for depth in 0..3 {
            assert!(solutions_of(&matrix, depth).is_empty());
        }
    }

    #[test]
    fn empty_root_records_nothing() {
        let matrix = CoverMatrix::from_rows(2, Some(0), vec![vec![0], vec![1]]).unwrap();

        assert!(solutions_of(&matrix, 2).is_empty());
    }
}
