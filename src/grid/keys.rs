//! Key bindings for the grid.
//!
//! ## Browsing
//!
//! - **Rows**: `↑/k`, `↓/j` move the row cursor; `space/enter` expands it
//! - **Columns**: `←/h`, `→/l` move the column focus; `<`/`>` move the
//!   focused column; `s` sorts by it
//! - **Filtering**: `/` searches all columns, `f` shows the filter row, `e`
//!   edits the focused column's filter, `x` clears all filters
//! - **Columns menu**: `c` opens it, `space` shows or hides a column
//! - **Pages**: see [`PaginatorKeyMap`](crate::paginator::PaginatorKeyMap)
//!
//! ## Editing
//!
//! While typing into the search box or a filter input, `enter` accepts,
//! `esc` leaves the input and `tab` switches between the min and max input
//! of a range filter.

use bubbletea_widgets::key::{self, KeyMap};
use crossterm::event::KeyCode;

#[derive(Debug, Clone)]
pub struct GridKeyMap {
    pub cursor_up: key::Binding,
    pub cursor_down: key::Binding,
    pub focus_left: key::Binding,
    pub focus_right: key::Binding,
    /// Expand or collapse the row under the cursor.
    pub toggle_row: key::Binding,
    /// Sort by the focused column.
    pub sort: key::Binding,
    pub search: key::Binding,
    /// Show or hide the filter row.
    pub toggle_filters: key::Binding,
    pub edit_filter: key::Binding,
    pub clear_filters: key::Binding,
    pub column_menu: key::Binding,
    pub move_column_left: key::Binding,
    pub move_column_right: key::Binding,
    pub reload: key::Binding,
    pub accept: key::Binding,
    pub cancel: key::Binding,
    /// Switch between the min and max input of a range filter.
    pub next_field: key::Binding,
}

impl Default for GridKeyMap {
    fn default() -> Self {
        Self {
            cursor_up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')])
                .with_help("↑/k", "up"),
            cursor_down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            focus_left: key::Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev column"),
            focus_right: key::Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next column"),
            toggle_row: key::Binding::new(vec![KeyCode::Char(' '), KeyCode::Enter])
                .with_help("space", "expand"),
            sort: key::Binding::new(vec![KeyCode::Char('s')]).with_help("s", "sort"),
            search: key::Binding::new(vec![KeyCode::Char('/')]).with_help("/", "search"),
            toggle_filters: key::Binding::new(vec![KeyCode::Char('f')])
                .with_help("f", "filters"),
            edit_filter: key::Binding::new(vec![KeyCode::Char('e')])
                .with_help("e", "edit filter"),
            clear_filters: key::Binding::new(vec![KeyCode::Char('x')])
                .with_help("x", "clear filters"),
            column_menu: key::Binding::new(vec![KeyCode::Char('c')]).with_help("c", "columns"),
            move_column_left: key::new_binding(vec![
                key::with_keys_str(&["<"]),
                key::with_help("<", "move column left"),
            ]),
            move_column_right: key::new_binding(vec![
                key::with_keys_str(&[">"]),
                key::with_help(">", "move column right"),
            ]),
            reload: key::Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reload"),
            accept: key::Binding::new(vec![KeyCode::Enter]).with_help("enter", "apply"),
            cancel: key::Binding::new(vec![KeyCode::Esc]).with_help("esc", "close"),
            next_field: key::Binding::new(vec![KeyCode::Tab]).with_help("tab", "min/max"),
        }
    }
}

impl KeyMap for GridKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![
            &self.cursor_up,
            &self.cursor_down,
            &self.toggle_row,
            &self.sort,
            &self.search,
            &self.column_menu,
        ]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![
                &self.cursor_up,
                &self.cursor_down,
                &self.focus_left,
                &self.focus_right,
                &self.toggle_row,
            ],
            vec![
                &self.sort,
                &self.search,
                &self.toggle_filters,
                &self.edit_filter,
                &self.clear_filters,
            ],
            vec![
                &self.column_menu,
                &self.move_column_left,
                &self.move_column_right,
                &self.reload,
            ],
        ]
    }
}
