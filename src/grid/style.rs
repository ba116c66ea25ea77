//! Styling for the grid.
//!
//! All default styles use `AdaptiveColor`, so the grid reads well on both
//! light and dark terminals. Override individual fields to restyle parts of
//! the grid:
//!
//! ```rust
//! use patient_grid::grid::GridStyles;
//! use lipgloss_extras::prelude::*;
//!
//! let mut styles = GridStyles::default();
//! styles.header = Style::new()
//!     .foreground(AdaptiveColor { Light: "#1a1a1a", Dark: "#ffffff" })
//!     .bold(true);
//! ```

use lipgloss_extras::prelude::*;

/// Marks truncated cell content.
pub const ELLIPSIS: &str = "…";

/// Separates cells within a row.
pub const CELL_SEPARATOR: &str = " │ ";

/// Row marker of a collapsed row.
pub const COLLAPSED: &str = "▸";

/// Row marker of an expanded row.
pub const EXPANDED: &str = "▾";

#[derive(Debug, Clone)]
pub struct GridStyles {
    pub title: Style,
    /// Column labels.
    pub header: Style,
    /// Label of the column the keyboard focus is on.
    pub header_focused: Style,
    /// Label of the column being moved.
    pub header_dragging: Style,
    pub sort_arrow: Style,
    /// The rule under the header.
    pub separator: Style,
    pub cell: Style,
    pub selected_row: Style,
    pub expander: Style,
    pub filter_input: Style,
    /// The input currently being typed into.
    pub filter_input_active: Style,
    pub search_prompt: Style,
    pub nested_title: Style,
    pub no_results: Style,
    pub loading: Style,
    pub error: Style,
    pub status_bar: Style,
    pub rows_per_page: Style,
    pub menu_title: Style,
    pub menu_item: Style,
    pub menu_selected: Style,
}

impl Default for GridStyles {
    fn default() -> Self {
        let subdued_color = AdaptiveColor {
            Light: "#9B9B9B",
            Dark: "#5C5C5C",
        };
        let very_subdued_color = AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        };
        let accent = AdaptiveColor {
            Light: "#EE6FF8",
            Dark: "#EE6FF8",
        };
        let normal = AdaptiveColor {
            Light: "#1a1a1a",
            Dark: "#dddddd",
        };

        Self {
            title: Style::new()
                .background(Color::from("62"))
                .foreground(Color::from("230")),
            header: Style::new().foreground(normal.clone()).bold(true),
            header_focused: Style::new().foreground(accent.clone()).bold(true),
            header_dragging: Style::new()
                .foreground(accent.clone())
                .bold(true)
                .underline(true),
            sort_arrow: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            separator: Style::new().foreground(very_subdued_color.clone()),
            cell: Style::new().foreground(normal.clone()),
            selected_row: Style::new().foreground(accent.clone()),
            expander: Style::new().foreground(subdued_color.clone()),
            filter_input: Style::new().foreground(subdued_color.clone()),
            filter_input_active: Style::new().foreground(normal),
            search_prompt: Style::new().foreground(AdaptiveColor {
                Light: "#04B575",
                Dark: "#ECFD65",
            }),
            nested_title: Style::new().foreground(subdued_color.clone()).bold(true),
            no_results: Style::new().foreground(subdued_color.clone()),
            loading: Style::new().foreground(AdaptiveColor {
                Light: "#8E8E8E",
                Dark: "#747373",
            }),
            error: Style::new().foreground(AdaptiveColor {
                Light: "#D70000",
                Dark: "#FF5F5F",
            }),
            status_bar: Style::new().foreground(AdaptiveColor {
                Light: "#A49FA5",
                Dark: "#777777",
            }),
            rows_per_page: Style::new().foreground(subdued_color.clone()),
            menu_title: Style::new().bold(true),
            menu_item: Style::new().foreground(subdued_color.clone()),
            menu_selected: Style::new().foreground(accent),
        }
    }
}
