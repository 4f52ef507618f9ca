//! Object graph representation of the dancing links structure.
//!
//! Every matrix one is an [`Entry`] holding direct links to its four
//! neighbors. Column headers are entries extended with a live row count. All
//! nodes are allocated in a `bumpalo` arena owned by the [`LinkedInstance`],
//! so their addresses are stable for the lifetime of the instance and the
//! links can be plain pointers. Links are stored in `Cell`s, so nodes are only
//! ever accessed through shared references.

use crate::{grid::Grid, CoverMatrix, Search};
use bumpalo::Bump;
use core::{cell::Cell, ptr, ptr::NonNull};

/// A one in the matrix, or the base of a column header.
#[derive(Debug)]
#[repr(C)]
pub struct Entry {
    left: Cell<NonNull<Entry>>,
    right: Cell<NonNull<Entry>>,
    up: Cell<NonNull<Entry>>,
    down: Cell<NonNull<Entry>>,
    column: Cell<NonNull<Column>>,
    // `None` for the root and column headers.
    row: Option<usize>,
}

/// A column header, tracking the number of rows still linked into it.
#[derive(Debug)]
#[repr(C)]
pub struct Column {
    base: Entry,
    size: Cell<usize>,
    // `None` for the root.
    index: Option<usize>,
}

// SAFETY (applies to every dereference in this module): links only ever point
// at nodes allocated in the same arena, which outlives every reference handed
// out by the owning `LinkedInstance`. Nodes are never mutably borrowed, all
// mutation goes through `Cell`s.
impl Entry {
    fn detached(row: Option<usize>) -> Self {
        Entry {
            left: Cell::new(NonNull::dangling()),
            right: Cell::new(NonNull::dangling()),
            up: Cell::new(NonNull::dangling()),
            down: Cell::new(NonNull::dangling()),
            column: Cell::new(NonNull::dangling()),
            row,
        }
    }

    fn link_to_self(&self) {
        let self_ptr = NonNull::from(self);

        self.left.set(self_ptr);
        self.right.set(self_ptr);
        self.up.set(self_ptr);
        self.down.set(self_ptr);
    }

    fn left(&self) -> &Entry {
        unsafe { self.left.get().as_ref() }
    }

    fn right(&self) -> &Entry {
        unsafe { self.right.get().as_ref() }
    }

    fn up(&self) -> &Entry {
        unsafe { self.up.get().as_ref() }
    }

    fn down(&self) -> &Entry {
        unsafe { self.down.get().as_ref() }
    }

    fn column(&self) -> &Column {
        unsafe { self.column.get().as_ref() }
    }

    /// Insert `entry` immediately before `self` in the row.
    fn append_to_row(&self, entry: &Entry) {
        self.left().right.set(NonNull::from(entry));
        entry.right.set(NonNull::from(self));
        entry.left.set(self.left.get());
        self.left.set(NonNull::from(entry));
    }

    /// Insert `entry` immediately above `self` in the column.
    fn append_to_column(&self, entry: &Entry) {
        self.up().down.set(NonNull::from(entry));
        entry.down.set(NonNull::from(self));
        entry.up.set(self.up.get());
        self.up.set(NonNull::from(entry));
    }

    // The unlink operations leave the links of `self` untouched, which is what
    // allows the matching relink to restore the exact previous position.

    fn unlink_from_column(&self) {
        self.down().up.set(self.up.get());
        self.up().down.set(self.down.get());
    }

    fn relink_into_column(&self) {
        self.down().up.set(NonNull::from(self));
        self.up().down.set(NonNull::from(self));
    }

    fn unlink_from_row(&self) {
        self.right().left.set(self.left.get());
        self.left().right.set(self.right.get());
    }

    fn relink_into_row(&self) {
        self.right().left.set(NonNull::from(self));
        self.left().right.set(NonNull::from(self));
    }
}

impl Column {
    fn is(&self, entry: &Entry) -> bool {
        ptr::eq(&self.base, entry)
    }

    fn append_entry(&self, entry: &Entry) {
        self.base.append_to_column(entry);
        self.size.set(self.size.get() + 1);
    }

    /// Cover entire column, and any rows that that appear in this column.
    fn cover(&self) {
        self.base.unlink_from_row();

        let mut row = self.base.down();
        while !self.is(row) {
            let mut node = row.right();
            while !ptr::eq(node, row) {
                node.unlink_from_column();
                let column = node.column();
                column.size.set(column.size.get() - 1);

                node = node.right();
            }

            row = row.down();
        }
    }

    /// Uncover entire column, and any rows that appear in this column.
    fn uncover(&self) {
        let mut row = self.base.up();
        while !self.is(row) {
            let mut node = row.left();
            while !ptr::eq(node, row) {
                let column = node.column();
                column.size.set(column.size.get() + 1);
                node.relink_into_column();

                node = node.left();
            }

            row = row.up();
        }

        self.base.relink_into_row();
    }
}

fn alloc_column(arena: &Bump, index: Option<usize>) -> &Column {
    let column: &Column = arena.alloc(Column {
        base: Entry::detached(None),
        size: Cell::new(0),
        index,
    });

    column.base.column.set(NonNull::from(column));
    column.base.link_to_self();
    column
}

fn alloc_entry<'a>(arena: &'a Bump, column: &Column, row: usize) -> &'a Entry {
    let entry: &Entry = arena.alloc(Entry::detached(Some(row)));

    entry.column.set(NonNull::from(column));
    entry.link_to_self();
    entry
}

/// An exact cover problem held as a graph of mutually linked entries.
///
/// The instance is consumed by [`search`](Self::search), since the search
/// rearranges the links in place.
#[derive(Debug)]
pub struct LinkedInstance {
    root: NonNull<Column>,
    columns: Vec<NonNull<Column>>,
    first_in_row: Vec<Option<NonNull<Entry>>>,
    selection: Vec<usize>,
    num_entries: usize,
    // Owns every node referenced above.
    arena: Bump,
}

impl LinkedInstance {
    /// Build the linked structure for `matrix`.
    ///
    /// Primary columns are linked into the root in index order, secondary
    /// columns get a header that is never reachable from the root.
    pub fn new(matrix: &CoverMatrix) -> Self {
        let arena = Bump::new();

        let root = alloc_column(&arena, None);
        let headers: Vec<&Column> = (0..matrix.num_columns())
            .map(|index| {
                let column = alloc_column(&arena, Some(index));
                if index < matrix.primary_columns() {
                    root.base.append_to_row(&column.base);
                }

                column
            })
            .collect();

        let first_in_row = matrix
            .rows()
            .enumerate()
            .map(|(row, cells)| {
                let mut first: Option<&Entry> = None;
                for &column in cells {
                    let header = headers[column];
                    let entry = alloc_entry(&arena, header, row);
                    header.append_entry(entry);

                    match first {
                        Some(anchor) => anchor.append_to_row(entry),
                        None => first = Some(entry),
                    }
                }

                first.map(NonNull::from)
            })
            .collect();

        log::debug!(
            "Built linked grid with [{}] columns ([{}] primary), [{}] rows and [{}] entries.",
            matrix.num_columns(),
            matrix.primary_columns(),
            matrix.num_rows(),
            matrix.num_entries()
        );

        let root = NonNull::from(root);
        let columns = headers.into_iter().map(NonNull::from).collect();

        LinkedInstance {
            root,
            columns,
            first_in_row,
            selection: Vec::new(),
            num_entries: matrix.num_entries(),
            arena,
        }
    }

    /// Return a lazy iterator over all exact covers.
    ///
    /// The iterator is single pass: enumerating again requires a new instance
    /// built from the same matrix.
    pub fn search(self) -> Search<Self> {
        Search::new(self)
    }

    /// Return the rows selected so far.
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Return the number of matrix ones in the structure.
    pub fn num_entries(&self) -> usize {
        self.num_entries
    }

    /// Return the number of rows currently linked into `column`, or `None`
    /// if there is no such column.
    pub fn column_size(&self, column: usize) -> Option<usize> {
        let column = unsafe { self.columns.get(column)?.as_ref() };

        Some(column.size.get())
    }

    /// Return the column indices of `row` by walking its circular list from
    /// the first entry of the row.
    ///
    /// Returns `None` for unknown or empty rows.
    pub fn row_columns(&self, row: usize) -> Option<Vec<usize>> {
        let first = self.entry(self.first_in_row.get(row).copied().flatten()?);

        let mut columns = vec![first.column().index?];
        let mut node = first.right();
        while !ptr::eq(node, first) {
            columns.push(node.column().index?);
            node = node.right();
        }

        Some(columns)
    }

    fn entry(&self, handle: NonNull<Entry>) -> &Entry {
        unsafe { handle.as_ref() }
    }

    fn root(&self) -> &Column {
        unsafe { self.root.as_ref() }
    }
}

impl Grid for LinkedInstance {
    type Handle = NonNull<Entry>;

    fn root_is_empty(&self) -> bool {
        let root = self.root();

        root.is(root.base.right())
    }

    fn choose_column(&self) -> Option<Self::Handle> {
        let root = self.root();

        let mut best: Option<&Column> = None;
        let mut node = root.base.right();
        while !root.is(node) {
            let column = node.column();
            if best.map_or(true, |best| column.size.get() < best.size.get()) {
                best = Some(column);
            }

            node = node.right();
        }

        best.map(|column| NonNull::from(&column.base))
    }

    fn cover(&mut self, column: Self::Handle) {
        self.entry(column).column().cover();
    }

    fn uncover(&mut self, column: Self::Handle) {
        self.entry(column).column().uncover();
    }

    fn down(&self, node: Self::Handle) -> Self::Handle {
        self.entry(node).down.get()
    }

    fn right(&self, node: Self::Handle) -> Self::Handle {
        self.entry(node).right.get()
    }

    fn left(&self, node: Self::Handle) -> Self::Handle {
        self.entry(node).left.get()
    }

    fn column_of(&self, entry: Self::Handle) -> Self::Handle {
        self.entry(entry).column.get().cast()
    }

    fn row_of(&self, entry: Self::Handle) -> usize {
        self.entry(entry)
            .row
            .expect("column headers do not belong to a row")
    }

    fn selection(&self) -> &[usize] {
        &self.selection
    }

    fn selection_mut(&mut self) -> &mut Vec<usize> {
        &mut self.selection
    }
}
