//! Public operations of the grid controller.
//!
//! Every operation that changes what the grid shows recomputes the derived
//! row view before returning. Operations the user can trigger with bad input
//! (unknown column keys, protected columns, out-of-range indices) are
//! rejected with a `false` return and leave the state untouched.

use super::column::ColumnKind;
use super::filter::{self, FilterValue, NumericRange};
use super::input;
use super::model::Model;
use super::nested::NestedView;
use super::sort::{CompareFn, SortDirection, SortState};
use super::types::{FilterField, Record, RowId};
use crate::error::{FetchError, GridResult};

impl<R: Record> Model<R> {
    // Data

    /// Replaces the rows. Filters, sort, expansion and the page index are
    /// kept; nested grids of expanded rows are rebuilt from the new data.
    pub fn set_rows(&mut self, rows: Vec<R>) {
        self.rows = rows;
        self.rebuild_nested();
        self.refresh();
    }

    /// All rows in source order.
    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    pub fn row(&self, id: RowId) -> Option<&R> {
        self.rows.get(id)
    }

    // Filtering

    /// Sets the filter of a column. Returns false for unknown or
    /// non-filterable columns. An empty value clears the filter.
    pub fn set_column_filter(&mut self, key: &str, value: FilterValue) -> bool {
        if !self.accepts_filter(key) {
            return false;
        }
        self.inputs.column_mut(key).show(&value);
        self.filters.set(key, value);
        self.refresh();
        true
    }

    /// Sets the filter of a column from the text of its input, interpreted
    /// according to the column kind. For numeric columns the text is the
    /// minimum; a maximum already typed is kept.
    pub fn set_column_filter_text(&mut self, key: &str, input: &str) -> bool {
        let Some(kind) = self.columns.get(key).map(|c| c.kind) else {
            return false;
        };
        if kind == ColumnKind::Number {
            let max = self.inputs.text(key, FilterField::Max);
            return self.set_range_filter(key, input, &max);
        }
        self.set_column_filter(key, filter::value_for_kind(kind, input))
    }

    /// Sets a numeric range filter from the raw text of its min and max
    /// inputs. Text that is not a number leaves that bound unset.
    pub fn set_range_filter(&mut self, key: &str, min: &str, max: &str) -> bool {
        if !self.accepts_filter(key) {
            return false;
        }
        let inputs = self.inputs.column_mut(key);
        input::set_text(&mut inputs.min, min);
        input::set_text(&mut inputs.max, max);
        self.filters.set_range_text(key, min, max);
        self.refresh();
        true
    }

    /// Re-reads the filter of a column from its inputs after they were
    /// edited in place.
    pub(super) fn apply_filter_inputs(&mut self, key: &str, field: FilterField) {
        let Some(kind) = self.columns.get(key).map(|c| c.kind) else {
            return;
        };
        match field {
            FilterField::Value => {
                let text = self.inputs.text(key, FilterField::Value);
                self.filters.set(key, filter::value_for_kind(kind, &text));
            }
            FilterField::Min | FilterField::Max => {
                let min = self.inputs.text(key, FilterField::Min);
                let max = self.inputs.text(key, FilterField::Max);
                self.filters.set_range_text(key, &min, &max);
            }
        }
        self.refresh();
    }

    /// Clears the filter of a column. Returns false if it had none.
    pub fn clear_column_filter(&mut self, key: &str) -> bool {
        if self.columns.get(key).is_none() {
            tracing::debug!(key, "unknown column");
            return false;
        }
        self.inputs.remove(key);
        let cleared = self.filters.clear(key);
        if cleared {
            self.refresh();
        }
        cleared
    }

    /// Sets the global search. It matches rows where any visible column
    /// contains the text, ignoring case. Nested grids keep their own filters.
    pub fn set_global_filter(&mut self, needle: &str) {
        input::set_text(&mut self.inputs.global, needle);
        self.filters.set_global(needle);
        self.refresh();
    }

    pub fn global_filter(&self) -> &str {
        self.filters.global()
    }

    /// Clears every column filter and the global search.
    pub fn clear_filters(&mut self) {
        self.filters.clear_all();
        self.inputs.clear_all();
        self.refresh();
    }

    fn accepts_filter(&self, key: &str) -> bool {
        match self.columns.get(key) {
            Some(column) if column.filterable => true,
            Some(_) => {
                tracing::debug!(key, "column is not filterable");
                false
            }
            None => {
                tracing::debug!(key, "filter on unknown column ignored");
                false
            }
        }
    }

    // Sorting

    /// Clicks the header of `key`: sorts by it in its default direction,
    /// flips the direction on the second click and clears the sort on the
    /// third. Returns false for unknown or non-sortable columns.
    pub fn sort_by(&mut self, key: &str) -> bool {
        let Some(default) = self.default_direction(key) else {
            return false;
        };
        self.sort = SortState::cycle(self.sort.as_ref(), key, default);
        self.refresh();
        true
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> bool {
        if self.default_direction(key).is_none() {
            return false;
        }
        self.sort = Some(SortState::new(key, direction));
        self.refresh();
        true
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
        self.refresh();
    }

    /// Replaces the comparator of one column.
    pub fn register_comparator(&mut self, key: impl Into<String>, compare: CompareFn) {
        self.comparators.register(key, compare);
        self.refresh();
    }

    fn default_direction(&self, key: &str) -> Option<SortDirection> {
        match self.columns.get(key) {
            Some(column) if column.sortable => {
                Some(self.comparators.resolve(column).default_direction())
            }
            _ => {
                tracing::debug!(key, "sort on unknown or unsortable column ignored");
                None
            }
        }
    }

    // Columns

    /// Shows or hides a column. Hiding a non-hidable column is rejected.
    pub fn set_column_visibility(&mut self, key: &str, visible: bool) -> bool {
        let changed = self.columns.set_visibility(key, visible);
        if changed {
            // The global filter only scans visible columns.
            self.refresh();
        }
        changed
    }

    pub fn toggle_column(&mut self, key: &str) -> bool {
        let visible = self.columns.is_visible(key);
        self.set_column_visibility(key, !visible)
    }

    /// Moves the column at `from` to `to` in the full column order. Row data
    /// is untouched.
    pub fn reorder_columns(&mut self, from: usize, to: usize) -> bool {
        self.columns.reorder(from, to)
    }

    /// Starts dragging the visible column at `index`.
    pub fn drag_start(&mut self, index: usize) -> bool {
        self.columns.drag_start(index)
    }

    /// Drops the dragged column onto the visible column at `index`.
    pub fn drop_on(&mut self, index: usize) -> bool {
        let moved = self.columns.drop_on(index);
        if moved {
            self.focus = index;
        }
        moved
    }

    // Expansion

    /// Expands or collapses a row and returns its new state. Nested grids
    /// are built the first time the row is expanded and kept afterwards.
    pub fn toggle_row(&mut self, id: RowId) -> bool {
        let Some(key) = self.row_key(id) else {
            return false;
        };
        let expanded = self.expansion.toggle(key);
        if expanded {
            self.ensure_nested(id);
        }
        expanded
    }

    pub fn set_row_expanded(&mut self, id: RowId, expanded: bool) {
        if let Some(key) = self.row_key(id) {
            self.expansion.set_expanded(key, expanded);
            if expanded {
                self.ensure_nested(id);
            }
        }
    }

    pub fn is_expanded(&self, id: RowId) -> bool {
        self.row_key(id)
            .is_some_and(|key| self.expansion.is_expanded(&key))
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// The nested grids of a row, if it has been expanded.
    pub fn nested(&self, id: RowId) -> Option<&[Box<dyn NestedView>]> {
        let key = self.row_key(id)?;
        self.nested.get(&key).map(Vec::as_slice)
    }

    pub fn nested_mut(&mut self, id: RowId, name: &str) -> Option<&mut Box<dyn NestedView>> {
        let key = self.row_key(id)?;
        self.nested
            .get_mut(&key)?
            .iter_mut()
            .find(|view| view.name() == name)
    }

    // Pagination

    pub fn next_page(&mut self) {
        self.paginator.next_page();
        self.cursor = 0;
    }

    pub fn prev_page(&mut self) {
        self.paginator.prev_page();
        self.cursor = 0;
    }

    pub fn first_page(&mut self) {
        self.paginator.first_page();
        self.cursor = 0;
    }

    pub fn last_page(&mut self) {
        self.paginator.last_page();
        self.cursor = 0;
    }

    /// Changes the page size and returns to the first page. Sizes not in the
    /// configured list are rejected.
    pub fn set_page_size(&mut self, size: usize) -> GridResult<()> {
        self.paginator.set_page_size(size)?;
        self.cursor = 0;
        Ok(())
    }

    pub fn page_size(&self) -> usize {
        self.paginator.page_size()
    }

    /// The page being shown, clamped to the last page.
    pub fn page(&self) -> usize {
        self.paginator.effective_page()
    }

    pub fn page_count(&self) -> usize {
        self.paginator.page_count()
    }

    // Derived view

    /// Ids of rows passing the filters, in display order.
    pub fn filtered_ids(&self) -> &[RowId] {
        &self.view_ids
    }

    pub fn filtered_len(&self) -> usize {
        self.view_ids.len()
    }

    /// Ids of the rows on the current page. Grids without pagination show
    /// every filtered row.
    pub fn page_ids(&self) -> &[RowId] {
        if !self.config.show_pagination {
            return &self.view_ids;
        }
        let (start, end) = self.paginator.slice_bounds();
        let end = end.min(self.view_ids.len());
        &self.view_ids[start.min(end)..end]
    }

    pub fn page_rows(&self) -> Vec<&R> {
        self.page_ids()
            .iter()
            .filter_map(|&id| self.rows.get(id))
            .collect()
    }

    // Cursor

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_id(&self) -> Option<RowId> {
        self.page_ids().get(self.cursor).copied()
    }

    pub fn selected_row(&self) -> Option<&R> {
        self.selected_id().and_then(|id| self.rows.get(id))
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let on_page = self.page_ids().len();
        if self.cursor + 1 < on_page {
            self.cursor += 1;
        }
    }

    pub fn focus_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_right(&mut self) {
        let visible = self.columns.visible_columns().len();
        if self.focus + 1 < visible {
            self.focus += 1;
        }
    }

    // Loading

    pub fn is_loading(&self) -> bool {
        self.loader.requests.in_flight()
    }

    /// The error of the last failed load, cleared by the next success.
    pub fn last_error(&self) -> Option<&FetchError> {
        self.loader.last_error.as_ref()
    }

    /// The query of the last load, re-run on invalidation.
    pub fn last_query(&self) -> Option<&str> {
        self.loader.last_query.as_deref()
    }

    /// The range typed into a numeric column's filter inputs.
    pub fn range_input(&self, key: &str) -> NumericRange {
        self.inputs.range(key)
    }
}
