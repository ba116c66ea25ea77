//! Message handling: key input and data loading.

use super::column::ColumnKind;
use super::model::Model;
use super::types::{FilterField, Mode, Record};
use crate::fetch::{self, InvalidateMsg, Mutation, MutationFailedMsg, RecordMutator, RowsLoadedMsg};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use std::sync::Arc;

impl<R: Record> Model<R> {
    /// Handles a message and returns a command to run, if any.
    ///
    /// Messages addressed to other grids are ignored. Load results for
    /// anything but the latest request are dropped.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        let msg = match msg.downcast::<RowsLoadedMsg<R>>() {
            Ok(loaded) => {
                self.handle_loaded(*loaded);
                return None;
            }
            Err(msg) => msg,
        };

        if let Some(invalidate) = msg.downcast_ref::<InvalidateMsg>() {
            if invalidate.grid_id == self.id {
                return self.reload();
            }
            return None;
        }

        if let Some(failed) = msg.downcast_ref::<MutationFailedMsg>() {
            if failed.grid_id == self.id {
                self.loader.last_error = Some(failed.error.clone());
            }
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if !self.focused {
                return None;
            }
            return self.handle_key(key_msg);
        }

        None
    }

    /// Starts loading rows for `query`. Any load still in flight is
    /// superseded. Returns `None` when no data source is set.
    pub fn load(&mut self, query: Option<String>) -> Option<Cmd> {
        let Some(source) = self.loader.source.clone() else {
            tracing::debug!(grid = self.id, "load requested without a data source");
            return None;
        };
        let tag = self.loader.requests.issue();
        tracing::debug!(grid = self.id, tag, query = ?query, "loading rows");
        self.loader.last_query = query.clone();
        Some(fetch::load_cmd(source, query, self.id, tag))
    }

    /// Re-runs the last query.
    pub fn reload(&mut self) -> Option<Cmd> {
        let query = self.loader.last_query.clone();
        self.load(query)
    }

    /// Applies a mutation; on success the grid reloads its data.
    pub fn mutate(&self, mutator: Arc<dyn RecordMutator<R>>, mutation: Mutation<R>) -> Cmd {
        fetch::mutate_cmd(mutator, mutation, self.id)
    }

    fn handle_loaded(&mut self, loaded: RowsLoadedMsg<R>) {
        if loaded.grid_id != self.id {
            return;
        }
        if !self.loader.requests.accept(loaded.tag) {
            tracing::debug!(
                grid = self.id,
                tag = loaded.tag,
                latest = self.loader.requests.latest(),
                "discarding stale load result"
            );
            return;
        }
        match loaded.result {
            Ok(rows) => {
                tracing::debug!(grid = self.id, rows = rows.len(), "rows loaded");
                self.loader.last_error = None;
                self.set_rows(rows);
            }
            Err(error) => {
                tracing::warn!(grid = self.id, %error, "failed to load rows, keeping previous data");
                self.loader.last_error = Some(error);
            }
        }
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        match self.mode.clone() {
            Mode::Browse => self.handle_browse_key(key_msg),
            Mode::Search => self.handle_search_key(key_msg),
            Mode::EditFilter { key, field } => self.handle_filter_key(key_msg, key, field),
            Mode::ColumnMenu { cursor } => {
                self.handle_menu_key(key_msg, cursor);
                None
            }
        }
    }

    fn handle_browse_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.cursor_up.matches(key_msg) {
            self.cursor_up();
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.cursor_down();
        } else if self.keymap.focus_left.matches(key_msg) {
            self.focus_left();
        } else if self.keymap.focus_right.matches(key_msg) {
            self.focus_right();
        } else if self.keymap.toggle_row.matches(key_msg) {
            if let Some(id) = self.selected_id() {
                self.toggle_row(id);
            }
        } else if self.keymap.sort.matches(key_msg) {
            if let Some(key) = self.focused_column().map(|c| c.key.clone()) {
                self.sort_by(&key);
            }
        } else if self.keymap.search.matches(key_msg) {
            self.mode = Mode::Search;
            return Some(self.inputs.focus_global());
        } else if self.keymap.toggle_filters.matches(key_msg) {
            self.show_filters = !self.show_filters;
        } else if self.keymap.edit_filter.matches(key_msg) {
            return self.start_filter_edit();
        } else if self.keymap.clear_filters.matches(key_msg) {
            self.clear_filters();
        } else if self.keymap.column_menu.matches(key_msg) {
            self.mode = Mode::ColumnMenu { cursor: 0 };
        } else if self.keymap.move_column_left.matches(key_msg) {
            if self.focus > 0 && self.drag_start(self.focus) {
                self.drop_on(self.focus - 1);
            }
        } else if self.keymap.move_column_right.matches(key_msg) {
            if self.drag_start(self.focus) {
                self.drop_on(self.focus + 1);
            }
        } else if self.keymap.reload.matches(key_msg) {
            return self.reload();
        } else if self.paginator.handle_key(key_msg) {
            self.cursor = 0;
        }
        None
    }

    fn start_filter_edit(&mut self) -> Option<Cmd> {
        let column = self.focused_column()?;
        if !column.filterable {
            return None;
        }
        let field = if column.kind == ColumnKind::Number {
            FilterField::Min
        } else {
            FilterField::Value
        };
        let key = column.key.clone();
        let cmd = self.inputs.focus_field(&key, field);
        self.mode = Mode::EditFilter { key, field };
        self.show_filters = true;
        Some(cmd)
    }

    /// Leaves an editing mode and takes focus away from its input.
    pub(super) fn stop_editing(&mut self) {
        self.inputs.blur_all();
        self.mode = Mode::Browse;
    }

    fn handle_search_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if self.keymap.accept.matches(key_msg) || self.keymap.cancel.matches(key_msg) {
            self.stop_editing();
            return None;
        }
        let before = self.inputs.global.value();
        let cmd = self.inputs.global.update(forward(key_msg));
        let needle = self.inputs.global.value();
        if needle != before {
            self.filters.set_global(needle);
            self.refresh();
        }
        cmd
    }

    fn handle_filter_key(&mut self, key_msg: &KeyMsg, key: String, field: FilterField) -> Option<Cmd> {
        if self.keymap.accept.matches(key_msg) || self.keymap.cancel.matches(key_msg) {
            self.stop_editing();
            return None;
        }
        if self.keymap.next_field.matches(key_msg) {
            let next = match field {
                FilterField::Min => FilterField::Max,
                FilterField::Max => FilterField::Min,
                FilterField::Value => FilterField::Value,
            };
            let cmd = self.inputs.focus_field(&key, next);
            self.mode = Mode::EditFilter { key, field: next };
            return Some(cmd);
        }

        let input = self.inputs.column_mut(&key).field_mut(field);
        let before = input.value();
        let cmd = input.update(forward(key_msg));
        if input.value() != before {
            self.apply_filter_inputs(&key, field);
        }
        cmd
    }

    fn handle_menu_key(&mut self, key_msg: &KeyMsg, cursor: usize) {
        let entries = self.columns.menu_entries();
        if self.keymap.cancel.matches(key_msg) || self.keymap.column_menu.matches(key_msg) {
            self.mode = Mode::Browse;
        } else if self.keymap.cursor_up.matches(key_msg) {
            self.mode = Mode::ColumnMenu {
                cursor: cursor.saturating_sub(1),
            };
        } else if self.keymap.cursor_down.matches(key_msg) {
            self.mode = Mode::ColumnMenu {
                cursor: (cursor + 1).min(entries.len().saturating_sub(1)),
            };
        } else if self.keymap.toggle_row.matches(key_msg) {
            if let Some(entry) = entries.get(cursor) {
                self.toggle_column(&entry.key);
                self.clamp_cursor();
            }
        } else if self.keymap.move_column_left.matches(key_msg) {
            if cursor > 0 && self.reorder_columns(cursor, cursor - 1) {
                self.mode = Mode::ColumnMenu { cursor: cursor - 1 };
            }
        } else if self.keymap.move_column_right.matches(key_msg)
            && self.reorder_columns(cursor, cursor + 1)
        {
            self.mode = Mode::ColumnMenu { cursor: cursor + 1 };
        }
    }
}

/// Re-wraps a key for a child component.
fn forward(key_msg: &KeyMsg) -> Msg {
    Box::new(KeyMsg {
        key: key_msg.key,
        modifiers: key_msg.modifiers,
    })
}
