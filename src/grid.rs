use crate::Solution;
use std::fmt::Debug;

/// A dancing links structure that can be searched with Algorithm X.
///
/// Implemented by both representations of the structure. Every handle refers
/// to a node of the implementing instance: either the root, a column header or
/// an entry (a matrix one). Column headers double as the head of their
/// vertical list, so the same handle type is used for columns and entries.
pub trait Grid {
    /// A reference to a node of the structure.
    type Handle: Debug + Copy + Eq;

    /// Return true if every primary column has been covered.
    fn root_is_empty(&self) -> bool;

    /// Return the uncovered primary column with the fewest live rows.
    ///
    /// Ties go to the leftmost column. Returns `None` when the root is empty.
    fn choose_column(&self) -> Option<Self::Handle>;

    /// Remove `column` from the header list and unlink every row that
    /// intersects it from all other columns.
    fn cover(&mut self, column: Self::Handle);

    /// Exact reverse of [`cover`](Grid::cover).
    ///
    /// Must be called in the reverse order of the matching `cover` calls.
    fn uncover(&mut self, column: Self::Handle);

    /// Return the next node below `node` in its column.
    fn down(&self, node: Self::Handle) -> Self::Handle;

    /// Return the next node to the right of `node` in its row.
    fn right(&self, node: Self::Handle) -> Self::Handle;

    /// Return the next node to the left of `node` in its row.
    fn left(&self, node: Self::Handle) -> Self::Handle;

    /// Return the column header that `entry` belongs to.
    fn column_of(&self, entry: Self::Handle) -> Self::Handle;

    /// Return the matrix row that `entry` was created for.
    fn row_of(&self, entry: Self::Handle) -> usize;

    /// Return the rows selected so far, in selection order.
    fn selection(&self) -> &[usize];

    /// Return a mutable reference to the rows selected so far.
    fn selection_mut(&mut self) -> &mut Vec<usize>;

    /// Add the row of `entry` to the selection and cover all other columns of
    /// that row, scanning rightward.
    fn select_row(&mut self, entry: Self::Handle) {
        let row = self.row_of(entry);
        self.selection_mut().push(row);

        let mut node = self.right(entry);
        while node != entry {
            let column = self.column_of(node);
            self.cover(column);
            node = self.right(node);
        }
    }

    /// Reverse of [`select_row`](Grid::select_row), uncovering leftward.
    fn deselect_row(&mut self, entry: Self::Handle) {
        let mut node = self.left(entry);
        while node != entry {
            let column = self.column_of(node);
            self.uncover(column);
            node = self.left(node);
        }

        let row = self.selection_mut().pop();
        debug_assert_eq!(row, Some(self.row_of(entry)));
    }

    /// Return the current selection as a solution, unless nothing has been
    /// selected.
    fn current_solution(&self) -> Option<Solution> {
        if self.selection().is_empty() {
            None
        } else {
            Some(Solution::new(self.selection().to_vec()))
        }
    }
}
