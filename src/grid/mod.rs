//! Collapsible data grid with filtering, sorting, pagination and column
//! management.
//!
//! This module exposes a generic `Model<R: Record>` plus supporting types:
//! - `Record`: implement for an entity type to declare its columns and,
//!   optionally, a stable id and nested sub-collections
//! - `Column`: a keyed, labelled, typed accessor into a row
//! - Submodules for the individual concerns: `filter`, `sort`, `column`,
//!   `expansion`, `nested`, `keys` and `style`
//!
//! ## Derived rows
//!
//! The grid holds its rows in source order. What it shows is derived on every
//! change:
//! 1. **Filter**: rows must pass every active column filter and the global
//!    search. Text matching ignores case; numeric filters are inclusive
//!    ranges; date filters match exactly.
//! 2. **Sort**: a single column at a time, stable, in the direction chosen by
//!    header clicks (default, opposite, cleared). Priority columns start
//!    high-to-low.
//! 3. **Paginate**: the filtered count is split into pages. Changing the
//!    filters keeps the page index; reads clamp it to the last page.
//!
//! ## Per-row state
//!
//! Expansion is remembered per row, keyed by the row's stable id when it has
//! one. A row expanded, filtered out and brought back is still expanded.
//! Each expanded row owns its nested grids, which are full grids with their
//! own filters and sort.
//!
//! ## Columns
//!
//! Columns can be hidden (unless marked not hidable) and reordered, either by
//! index or by a drag on the header. Neither affects row data; hiding a
//! column takes it out of the global search.

pub mod column;
pub mod expansion;
pub mod filter;
pub mod input;
pub mod keys;
pub mod nested;
pub mod sort;
pub mod style;
mod types;

mod api;
mod model;
mod rendering;
mod update;

#[cfg(test)]
mod tests;

pub use column::{Accessor, Column, ColumnKind, ColumnModel, MenuEntry};
pub use expansion::ExpansionState;
pub use filter::{FilterValue, Filters, NumericRange};
pub use keys::GridKeyMap;
pub use model::Model;
pub use nested::{NestedSpec, NestedTable, NestedView};
pub use sort::{CompareFn, Comparator, Registry, SortDirection, SortState};
pub use style::GridStyles;
pub use types::{FilterField, Mode, Record, RowId, RowKey};

use bubbletea_widgets::help;
use bubbletea_widgets::key::{self, KeyMap};

impl<R: Record> help::KeyMap for Model<R> {
    fn short_help(&self) -> Vec<&key::Binding> {
        match self.mode {
            Mode::Browse => {
                let mut bindings = self.keymap.short_help();
                if self.config.show_pagination {
                    bindings.extend(self.paginator.keymap.short_help());
                }
                bindings
            }
            Mode::Search => vec![&self.keymap.accept, &self.keymap.cancel],
            Mode::EditFilter { .. } => vec![
                &self.keymap.accept,
                &self.keymap.cancel,
                &self.keymap.next_field,
            ],
            Mode::ColumnMenu { .. } => vec![
                &self.keymap.cursor_up,
                &self.keymap.cursor_down,
                &self.keymap.toggle_row,
                &self.keymap.move_column_left,
                &self.keymap.move_column_right,
                &self.keymap.cancel,
            ],
        }
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        let mut groups = self.keymap.full_help();
        if self.config.show_pagination {
            groups.extend(self.paginator.keymap.full_help());
        }
        groups
    }
}
