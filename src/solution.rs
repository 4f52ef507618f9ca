use core::slice;
use std::vec;

/// One exact cover: the selected row identifiers, sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Solution {
    row_indices: Vec<usize>,
}

impl Solution {
    /// Create a solution from the rows selected during a search.
    ///
    /// The order of `rows` is irrelevant, a solution always stores its rows
    /// sorted.
    ///
    /// # Panics
    ///
    /// Panics if the same row is selected twice, which can only happen if the
    /// links of the searched structure were corrupted.
    pub fn new(mut rows: Vec<usize>) -> Self {
        rows.sort_unstable();
        assert!(
            rows.windows(2).all(|pair| pair[0] < pair[1]),
            "Row selected more than once in [{rows:?}]"
        );

        Solution { row_indices: rows }
    }

    /// Return the selected row identifiers in ascending order.
    pub fn row_indices(&self) -> &[usize] {
        &self.row_indices
    }

    /// Return the number of selected rows.
    pub fn len(&self) -> usize {
        self.row_indices.len()
    }

    /// Return true if no rows were selected.
    ///
    /// The search engines never produce such a solution.
    pub fn is_empty(&self) -> bool {
        self.row_indices.is_empty()
    }

    /// Return an iterator over the selected rows.
    pub fn iter(&self) -> slice::Iter<'_, usize> {
        self.row_indices.iter()
    }
}

impl AsRef<[usize]> for Solution {
    fn as_ref(&self) -> &[usize] {
        &self.row_indices
    }
}

impl From<Solution> for Vec<usize> {
    fn from(src: Solution) -> Self {
        src.row_indices
    }
}

impl IntoIterator for Solution {
    type IntoIter = vec::IntoIter<usize>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.row_indices.into_iter()
    }
}

impl<'s> IntoIterator for &'s Solution {
    type IntoIter = slice::Iter<'s, usize>;
    type Item = &'s usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_sorted() {
        let solution = Solution::new(vec![4, 0, 3]);

        assert_eq!(solution.row_indices(), &[0, 3, 4]);
        assert_eq!(solution, Solution::new(vec![3, 4, 0]));
        assert_eq!(solution.len(), 3);
    }

    #[test]
    #[should_panic(expected = "Row selected more than once")]
    fn duplicate_rows_are_rejected() {
        let _ = Solution::new(vec![1, 2, 1]);
    }
}
