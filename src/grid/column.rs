//! Column definitions and the column model (order and visibility).

use super::types::Record;
use crate::error::{GridError, GridResult};
use crate::value::CellValue;
use std::collections::HashSet;
use std::fmt;

/// Reads the value of a column from a row.
pub type Accessor<R> = fn(&R) -> CellValue;

/// What a column holds; decides its filter input and comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Filtered by a `[min, max]` range.
    Number,
    /// Filtered by exact match, sorted by parsed date.
    Date,
    /// `low`/`medium`/`high`, sorted by rank.
    Priority,
}

pub struct Column<R> {
    pub key: String,
    pub label: String,
    pub kind: ColumnKind,
    pub filterable: bool,
    pub sortable: bool,
    pub hidable: bool,
    /// Fixed display width; computed from the content when `None`.
    pub width: Option<usize>,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        kind: ColumnKind,
        accessor: Accessor<R>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind,
            filterable: true,
            sortable: true,
            hidable: true,
            width: None,
            accessor,
        }
    }

    pub fn text(key: impl Into<String>, label: impl Into<String>, accessor: Accessor<R>) -> Self {
        Self::new(key, label, ColumnKind::Text, accessor)
    }

    pub fn number(
        key: impl Into<String>,
        label: impl Into<String>,
        accessor: Accessor<R>,
    ) -> Self {
        Self::new(key, label, ColumnKind::Number, accessor)
    }

    pub fn date(key: impl Into<String>, label: impl Into<String>, accessor: Accessor<R>) -> Self {
        Self::new(key, label, ColumnKind::Date, accessor)
    }

    pub fn priority(
        key: impl Into<String>,
        label: impl Into<String>,
        accessor: Accessor<R>,
    ) -> Self {
        Self::new(key, label, ColumnKind::Priority, accessor)
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Marks the column as always visible.
    pub fn not_hidable(mut self) -> Self {
        self.hidable = false;
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn value(&self, row: &R) -> CellValue {
        (self.accessor)(row)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            kind: self.kind,
            filterable: self.filterable,
            sortable: self.sortable,
            hidable: self.hidable,
            width: self.width,
            accessor: self.accessor,
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("filterable", &self.filterable)
            .field("sortable", &self.sortable)
            .field("hidable", &self.hidable)
            .finish()
    }
}

/// One line of the column visibility menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub key: String,
    pub label: String,
    pub visible: bool,
    pub hidable: bool,
}

/// The ordered, hideable set of columns of one grid.
///
/// The set of definitions is fixed at construction. Only the order (a
/// permutation of the definitions) and per-column visibility change.
/// Reordering and hiding never touch row data.
#[derive(Debug, Clone)]
pub struct ColumnModel<R> {
    columns: Vec<Column<R>>,
    order: Vec<usize>,
    visible: Vec<bool>,
    drag_source: Option<usize>,
}

impl<R: Record> ColumnModel<R> {
    /// Builds the model, rejecting duplicate keys.
    pub fn new(columns: Vec<Column<R>>) -> GridResult<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.key.as_str()) {
                return Err(GridError::DuplicateColumnKey(column.key.clone()));
            }
        }
        let order = (0..columns.len()).collect();
        let visible = vec![true; columns.len()];
        Ok(Self {
            columns,
            order,
            visible,
            drag_source: None,
        })
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Column<R>> {
        self.position(key).map(|i| &self.columns[i])
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.key == key)
    }

    /// All columns in their current order, hidden ones included.
    pub fn ordered(&self) -> impl Iterator<Item = &Column<R>> {
        self.order.iter().map(move |&i| &self.columns[i])
    }

    /// Column keys in their current order, hidden ones included.
    pub fn order_keys(&self) -> Vec<&str> {
        self.ordered().map(|c| c.key.as_str()).collect()
    }

    /// The columns to render, in order.
    pub fn visible_columns(&self) -> Vec<&Column<R>> {
        self.order
            .iter()
            .filter(|&&i| self.visible[i])
            .map(|&i| &self.columns[i])
            .collect()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.position(key).is_some_and(|i| self.visible[i])
    }

    /// Shows or hides a column. Unknown keys and attempts to hide a
    /// non-hidable column are rejected and return `false`.
    pub fn set_visibility(&mut self, key: &str, visible: bool) -> bool {
        let Some(i) = self.position(key) else {
            tracing::debug!(key, "visibility change for unknown column ignored");
            return false;
        };
        if !visible && !self.columns[i].hidable {
            tracing::debug!(key, "refusing to hide protected column");
            return false;
        }
        self.visible[i] = visible;
        true
    }

    pub fn toggle_visibility(&mut self, key: &str) -> bool {
        let visible = self.is_visible(key);
        self.set_visibility(key, !visible)
    }

    /// Moves the column at `from` to `to` within the full ordering. Either
    /// index out of range leaves the order unchanged and returns `false`.
    ///
    /// ```
    /// # use patient_grid::grid::{Column, ColumnModel, Record};
    /// # #[derive(Clone)] struct Row;
    /// # impl Record for Row { fn columns() -> Vec<Column<Self>> { vec![
    /// #     Column::text("a", "A", |_: &Row| "".into()),
    /// #     Column::text("b", "B", |_: &Row| "".into()),
    /// #     Column::text("c", "C", |_: &Row| "".into()),
    /// # ] } }
    /// let mut columns = ColumnModel::new(Row::columns()).unwrap();
    /// assert!(columns.reorder(0, 2));
    /// assert_eq!(columns.order_keys(), vec!["b", "c", "a"]);
    /// assert!(!columns.reorder(0, 3));
    /// ```
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let len = self.order.len();
        if from >= len || to >= len {
            tracing::debug!(from, to, len, "column reorder out of range ignored");
            return false;
        }
        let column = self.order.remove(from);
        self.order.insert(to, column);
        true
    }

    /// Maps a position among the visible columns to a position in the full
    /// ordering.
    pub fn visible_to_order_index(&self, visible_index: usize) -> Option<usize> {
        self.order
            .iter()
            .enumerate()
            .filter(|(_, &i)| self.visible[i])
            .nth(visible_index)
            .map(|(pos, _)| pos)
    }

    /// Starts a header drag from the visible column at `visible_index`.
    pub fn drag_start(&mut self, visible_index: usize) -> bool {
        match self.visible_to_order_index(visible_index) {
            Some(pos) => {
                self.drag_source = Some(pos);
                true
            }
            None => {
                self.drag_source = None;
                false
            }
        }
    }

    /// Drops the dragged column onto the visible column at `visible_index`.
    /// The drag is finished whether or not the drop was accepted.
    pub fn drop_on(&mut self, visible_index: usize) -> bool {
        let Some(from) = self.drag_source.take() else {
            return false;
        };
        match self.visible_to_order_index(visible_index) {
            Some(to) => self.reorder(from, to),
            None => false,
        }
    }

    pub fn cancel_drag(&mut self) {
        self.drag_source = None;
    }

    pub fn dragging(&self) -> Option<&Column<R>> {
        self.drag_source
            .and_then(|pos| self.order.get(pos))
            .map(|&i| &self.columns[i])
    }

    /// Restores definition order.
    pub fn reset_order(&mut self) {
        self.order = (0..self.columns.len()).collect();
    }

    /// Entries for the column visibility menu, in current order.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        self.order
            .iter()
            .map(|&i| MenuEntry {
                key: self.columns[i].key.clone(),
                label: self.columns[i].label.clone(),
                visible: self.visible[i],
                hidable: self.columns[i].hidable,
            })
            .collect()
    }
}
