use crate::{grid::Grid, Solution};
use core::iter::FusedIterator;

/// Iterator that lazily returns the exact covers of a problem instance.
///
/// The search is Algorithm X: repeatedly cover the primary column with the
/// fewest live rows and try each of its rows in turn. Instead of recursing,
/// the backtracking state is kept on an explicit stack so that the search can
/// suspend after each solution.
///
/// The iterator owns the instance and rearranges its links while running, so
/// it is single pass. Once exhausted it keeps returning `None`.
#[derive(Debug)]
pub struct Search<G: Grid> {
    grid: G,
    stack: Vec<Frame<G::Handle>>,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    // Check the current grid for a solution, or branch on a new column.
    Descend,
    // Undo the row selected by the top frame and move on to its next row.
    Backtrack,
}

#[derive(Debug)]
struct Frame<H> {
    column: H,
    // The row currently selected from `column`.
    row: H,
}

impl<G: Grid> Search<G> {
    /// Create a search over all exact covers of `grid`.
    pub(crate) fn new(grid: G) -> Self {
        Search {
            grid,
            stack: Vec::new(),
            state: State::Descend,
        }
    }

    /// Return the number of rows selected on the current search path.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Compute up to the next solution, returning `None` if there are no more.
    pub fn next_solution(&mut self) -> Option<Solution> {
        loop {
            match self.state {
                State::Descend => match self.grid.choose_column() {
                    None => {
                        self.state = State::Backtrack;

                        // A grid that starts without primary columns is not
                        // solved by selecting nothing.
                        if let Some(solution) = self.grid.current_solution() {
                            log::trace!("Found solution {:?}.", solution.row_indices());
                            return Some(solution);
                        }
                    }
                    Some(column) => {
                        self.grid.cover(column);
                        let row = self.grid.down(column);
                        self.stack.push(Frame { column, row });
                        self.enter_top_row();
                    }
                },
                State::Backtrack => {
                    let frame = self.stack.last_mut()?;
                    self.grid.deselect_row(frame.row);
                    frame.row = self.grid.down(frame.row);

                    self.enter_top_row();
                }
            }
        }
    }

    /// Select the row recorded in the top frame, or finish the frame if its
    /// column has no rows left.
    fn enter_top_row(&mut self) {
        let Some(&Frame { column, row }) = self.stack.last() else {
            return;
        };

        if row == column {
            self.grid.uncover(column);
            self.stack.pop();
            self.state = State::Backtrack;
        } else {
            self.grid.select_row(row);
            self.state = State::Descend;
        }
    }

    /// Return the remaining solutions.
    pub fn all_solutions(&mut self) -> Vec<Solution> {
        self.collect()
    }

    /// Consume the iterator and return the underlying instance.
    ///
    /// If the iterator was exhausted, the instance is back in its initial
    /// state. Otherwise the rows on the current search path are still covered.
    pub fn into_inner(self) -> G {
        self.grid
    }
}

impl<G: Grid> Iterator for Search<G> {
    type Item = Solution;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_solution()
    }
}

impl<G: Grid> FusedIterator for Search<G> {}
