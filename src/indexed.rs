//! Identifier-indexed representation of the dancing links structure.
//!
//! Nodes live in one contiguous vector and refer to each other by [`EntryId`].
//! Handle `0` is the root, handles `1..=num_columns` are the column headers in
//! column order, and the matrix ones follow in row-major order.
//!
//! Only the links and the column sizes change during a search. The mappings
//! from a handle to its column and its row are built once and shared between
//! clones, which keeps forking an instance for the parallel search cheap.

use crate::{grid::Grid, CoverMatrix, Error, Result, Search};
use std::sync::Arc;

/// Handle of a node in an [`IndexedInstance`].
///
/// The width of this type bounds the number of nodes (root, one header per
/// column, one entry per matrix one) to `EntryId::MAX + 1`.
pub type EntryId = u16;

const ROOT: EntryId = 0;

/// Maximum number of nodes an [`IndexedInstance`] can address.
pub const MAX_ENTRIES: usize = EntryId::MAX as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Links {
    left: EntryId,
    right: EntryId,
    up: EntryId,
    down: EntryId,
}

impl Links {
    fn to_self(id: EntryId) -> Self {
        Links {
            left: id,
            right: id,
            up: id,
            down: id,
        }
    }
}

/// An exact cover problem held as an array of links addressed by handles.
///
/// Cloning deep-copies the links, the column sizes and the current selection,
/// and shares the immutable handle mappings.
#[derive(Debug, Clone)]
pub struct IndexedInstance {
    links: Vec<Links>,
    // Live row count of each column, indexed by `header - 1`.
    sizes: Vec<usize>,
    // Column header of every node; headers map to themselves.
    column_ids: Arc<[EntryId]>,
    // Source row of every node; `None` for the root and headers.
    row_ids: Arc<[Option<usize>]>,
    first_in_row: Arc<[Option<EntryId>]>,
    selection: Vec<usize>,
}

impl IndexedInstance {
    /// Build the indexed structure for `matrix`.
    ///
    /// Fails with [`Error::TooManyEntries`] if the root, the headers and the
    /// entries do not fit into the [`EntryId`] range.
    pub fn new(matrix: &CoverMatrix) -> Result<Self> {
        let total = 1 + matrix.num_columns() + matrix.num_entries();
        if total > MAX_ENTRIES {
            return Err(Error::TooManyEntries {
                entries: total,
                max: MAX_ENTRIES,
            });
        }

        let mut builder = Builder {
            links: Vec::with_capacity(total),
            column_ids: Vec::with_capacity(total),
            row_ids: Vec::with_capacity(total),
            sizes: Vec::with_capacity(matrix.num_columns()),
        };

        let root = builder.new_node(ROOT, None);
        debug_assert_eq!(root, ROOT);

        // Headers occupy a contiguous block starting at handle 1.
        for index in 0..matrix.num_columns() {
            let header = builder.new_column();
            if index < matrix.primary_columns() {
                builder.append_to_row(ROOT, header);
            }
        }

        let first_in_row: Vec<_> = matrix
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                let mut first = None;
                for &column in cells {
                    let entry = builder.new_entry(header_id(column), row);

                    match first {
                        Some(anchor) => builder.append_to_row(anchor, entry),
                        None => first = Some(entry),
                    }
                }

                first
            })
            .collect();

        log::debug!(
            "Built indexed grid with [{}] columns ([{}] primary), [{}] rows and [{}] entries.",
            matrix.num_columns(),
            matrix.primary_columns(),
            matrix.num_rows(),
            matrix.num_entries()
        );

        let Builder {
            links,
            column_ids,
            row_ids,
            sizes,
        } = builder;

        Ok(IndexedInstance {
            links,
            sizes,
            column_ids: column_ids.into(),
            row_ids: row_ids.into(),
            first_in_row: first_in_row.into(),
            selection: Vec::new(),
        })
    }

    /// Return a lazy iterator over all exact covers.
    ///
    /// The iterator is single pass; clone the instance beforehand to
    /// enumerate more than once.
    pub fn search(self) -> Search<Self> {
        Search::new(self)
    }

    /// Return the rows selected so far.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Return the number of matrix ones in the structure.
    pub fn num_entries(&self) -> usize {
        self.links.len() - 1 - self.sizes.len()
    }

    /// Return the number of rows currently linked into `column`, or `None`
    /// if there is no such column.
    pub fn column_size(&self, column: usize) -> Option<usize> {
        self.sizes.get(column).copied()
    }

    /// Return the column indices of `row` by walking its circular list from
    /// the first entry of the row.
    ///
    /// Returns `None` for unknown or empty rows.
    pub fn row_columns(&self, row: usize) -> Option<Vec<usize>> {
        let first = self.first_in_row.get(row).copied().flatten()?;

        let mut columns = vec![column_index(self.column_ids[usize::from(first)])];
        let mut node = self.link(first).right;
        while node != first {
            columns.push(column_index(self.column_ids[usize::from(node)]));
            node = self.link(node).right;
        }

        Some(columns)
    }

    fn link(&self, id: EntryId) -> &Links {
        &self.links[usize::from(id)]
    }

    fn link_mut(&mut self, id: EntryId) -> &mut Links {
        &mut self.links[usize::from(id)]
    }

    fn size_mut(&mut self, column: EntryId) -> &mut usize {
        &mut self.sizes[usize::from(column) - 1]
    }

    fn column_id(&self, id: EntryId) -> EntryId {
        self.column_ids[usize::from(id)]
    }

    // The unlink operations leave the links of `id` untouched, which is what
    // allows the matching relink to restore the exact previous position.

    fn unlink_from_column(&mut self, id: EntryId) {
        let Links { up, down, .. } = *self.link(id);

        self.link_mut(down).up = up;
        self.link_mut(up).down = down;
    }

    fn relink_into_column(&mut self, id: EntryId) {
        let Links { up, down, .. } = *self.link(id);

        self.link_mut(down).up = id;
        self.link_mut(up).down = id;
    }

    fn unlink_from_row(&mut self, id: EntryId) {
        let Links { left, right, .. } = *self.link(id);

        self.link_mut(right).left = left;
        self.link_mut(left).right = right;
    }

    fn relink_into_row(&mut self, id: EntryId) {
        let Links { left, right, .. } = *self.link(id);

        self.link_mut(right).left = id;
        self.link_mut(left).right = id;
    }
}

fn header_id(column: usize) -> EntryId {
    // In range, the total node count was checked before building.
    (column + 1) as EntryId
}

fn column_index(header: EntryId) -> usize {
    usize::from(header) - 1
}

/// Mutable state used while ingesting a matrix.
struct Builder {
    links: Vec<Links>,
    column_ids: Vec<EntryId>,
    row_ids: Vec<Option<usize>>,
    sizes: Vec<usize>,
}

impl Builder {
    fn next_id(&self) -> EntryId {
        self.links.len() as EntryId
    }

    fn new_node(&mut self, column: EntryId, row: Option<usize>) -> EntryId {
        let id = self.next_id();

        self.links.push(Links::to_self(id));
        self.column_ids.push(column);
        self.row_ids.push(row);
        id
    }

    fn new_column(&mut self) -> EntryId {
        let id = self.next_id();
        self.sizes.push(0);

        self.new_node(id, None)
    }

    fn new_entry(&mut self, header: EntryId, row: usize) -> EntryId {
        debug_assert!(header > ROOT && usize::from(header) <= self.sizes.len());

        let entry = self.new_node(header, Some(row));
        self.append_to_column(header, entry);
        self.sizes[column_index(header)] += 1;
        entry
    }

    /// Insert `entry` immediately before `anchor` in the row.
    fn append_to_row(&mut self, anchor: EntryId, entry: EntryId) {
        let left = self.links[usize::from(anchor)].left;

        self.links[usize::from(left)].right = entry;
        self.links[usize::from(entry)].right = anchor;
        self.links[usize::from(entry)].left = left;
        self.links[usize::from(anchor)].left = entry;
    }

    /// Insert `entry` immediately above `anchor` in the column.
    fn append_to_column(&mut self, anchor: EntryId, entry: EntryId) {
        let up = self.links[usize::from(anchor)].up;

        self.links[usize::from(up)].down = entry;
        self.links[usize::from(entry)].down = anchor;
        self.links[usize::from(entry)].up = up;
        self.links[usize::from(anchor)].up = entry;
    }
}

impl Grid for IndexedInstance {
    type Handle = EntryId;

    fn root_is_empty(&self) -> bool {
        self.link(ROOT).right == ROOT
    }

    fn choose_column(&self) -> Option<Self::Handle> {
        let mut best: Option<(EntryId, usize)> = None;

        let mut column = self.link(ROOT).right;
        while column != ROOT {
            let size = self.sizes[column_index(column)];
            if best.map_or(true, |(_, best_size)| size < best_size) {
                best = Some((column, size));
            }

            column = self.link(column).right;
        }

        best.map(|(column, _)| column)
    }

    fn cover(&mut self, column: Self::Handle) {
        self.unlink_from_row(column);

        let mut row = self.link(column).down;
        while row != column {
            let mut node = self.link(row).right;
            while node != row {
                self.unlink_from_column(node);
                let header = self.column_id(node);
                *self.size_mut(header) -= 1;

                node = self.link(node).right;
            }

            row = self.link(row).down;
        }
    }

    fn uncover(&mut self, column: Self::Handle) {
        let mut row = self.link(column).up;
        while row != column {
            let mut node = self.link(row).left;
            while node != row {
                let header = self.column_id(node);
                *self.size_mut(header) += 1;
                self.relink_into_column(node);

                node = self.link(node).left;
            }

            row = self.link(row).up;
        }

        self.relink_into_row(column);
    }

    fn down(&self, node: Self::Handle) -> Self::Handle {
        self.link(node).down
    }

    fn right(&self, node: Self::Handle) -> Self::Handle {
        self.link(node).right
    }

    fn left(&self, node: Self::Handle) -> Self::Handle {
        self.link(node).left
    }

    fn column_of(&self, entry: Self::Handle) -> Self::Handle {
        self.column_id(entry)
    }

    fn row_of(&self, entry: Self::Handle) -> usize {
        self.row_ids[usize::from(entry)].expect("column headers do not belong to a row")
    }

    fn selection(&self) -> &[usize] {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut Vec<usize> {
        &mut self.selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knuth_matrix() -> CoverMatrix {
        CoverMatrix::from_rows(
            7,
            None,
            vec![
                vec![2, 4, 5],
                vec![0, 3, 6],
                vec![1, 2, 5],
                vec![0, 3],
                vec![1, 6],
                vec![3, 4, 6],
            ],
        )
        .unwrap()
    }

    /// Check the row-count and circularity invariants of every active column.
    fn check_invariants(instance: &IndexedInstance) {
        // Row links of entries never change.
        let first_entry = 1 + instance.sizes.len();
        for (id, links) in instance.links.iter().enumerate().skip(first_entry) {
            let id = id as EntryId;
            assert_eq!(instance.link(links.right).left, id);
            assert_eq!(instance.link(links.left).right, id);
        }

        let mut column = instance.link(ROOT).right;
        while column != ROOT {
            assert_eq!(instance.link(instance.link(column).right).left, column);
            let mut count = 0;
            let mut node = instance.link(column).down;
            while node != column {
                assert_eq!(instance.link(instance.link(node).down).up, node);
                assert_eq!(instance.column_id(node), column);
                count += 1;
                node = instance.link(node).down;
            }

            assert_eq!(instance.sizes[column_index(column)], count);
            column = instance.link(column).right;
        }
    }

    #[test]
    fn handle_layout() {
        let instance = IndexedInstance::new(&knuth_matrix()).unwrap();

        assert_eq!(instance.links.len(), 1 + 7 + 16);
        assert_eq!(instance.num_entries(), 16);
        assert_eq!(instance.sizes, vec![2, 2, 2, 3, 2, 2, 3]);
        assert_eq!(instance.column_size(3), Some(3));
        assert_eq!(instance.column_size(7), None);
        // Headers map to themselves.
        assert!((1..=7).all(|header| instance.column_id(header) == header));
        // The first entry of row 0 is the first node after the headers.
        assert_eq!(instance.first_in_row[0], Some(8));
        assert_eq!(instance.row_of(8), 0);
        assert_eq!(instance.row_columns(1), Some(vec![0, 3, 6]));
        assert_eq!(instance.row_columns(42), None);
        check_invariants(&instance);
    }

    #[test]
    fn cover_uncover_round_trip() {
        let mut instance = IndexedInstance::new(&knuth_matrix()).unwrap();
        let links = instance.links.clone();
        let sizes = instance.sizes.clone();

        for header in 1..=7 {
            instance.cover(header);
            check_invariants(&instance);
            instance.uncover(header);

            assert_eq!(instance.links, links);
            assert_eq!(instance.sizes, sizes);
        }
    }

    #[test]
    fn select_row_covers_row_columns() {
        let mut instance = IndexedInstance::new(&knuth_matrix()).unwrap();
        let links = instance.links.clone();

        let column = instance.choose_column().unwrap();
        assert_eq!(column, 1);
        instance.cover(column);
        let row = instance.down(column);
        instance.select_row(row);
        check_invariants(&instance);

        // Row 1 covers columns 0, 3 and 6.
        let mut remaining = Vec::new();
        let mut header = instance.link(ROOT).right;
        while header != ROOT {
            remaining.push(column_index(header));
            header = instance.link(header).right;
        }
        assert_eq!(remaining, vec![1, 2, 4, 5]);
        assert_eq!(instance.selection(), &[1]);

        instance.deselect_row(row);
        instance.uncover(column);
        assert_eq!(instance.links, links);
    }

    #[test]
    fn clones_share_mappings() {
        let mut original = IndexedInstance::new(&knuth_matrix()).unwrap();
        let copy = original.clone();

        original.cover(1);
        assert_ne!(original.links, copy.links);
        assert!(Arc::ptr_eq(&original.column_ids, &copy.column_ids));
        assert!(Arc::ptr_eq(&original.row_ids, &copy.row_ids));
    }

    #[test]
    fn entry_count_is_bounded() {
        let rows = (0..MAX_ENTRIES).map(|_| vec![0]);
        let matrix = CoverMatrix::from_rows(1, None, rows).unwrap();

        assert_eq!(
            IndexedInstance::new(&matrix).unwrap_err(),
            Error::TooManyEntries {
                entries: MAX_ENTRIES + 2,
                max: MAX_ENTRIES
            }
        );
    }
}
