//! Rendering of the grid: header, filter row, rows, nested grids and footer.

use super::column::{Column, ColumnKind};
use super::model::Model;
use super::style::{CELL_SEPARATOR, COLLAPSED, ELLIPSIS, EXPANDED};
use super::types::{FilterField, Mode, Record, RowId};
use lipgloss_extras::lipgloss;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Widest a computed column gets before its cells are truncated.
const MAX_COLUMN_WIDTH: usize = 32;

/// Indentation of nested grids under their row.
const NESTED_INDENT: &str = "    ";

impl<R: Record> Model<R> {
    /// Renders the grid.
    pub fn view(&self) -> String {
        let mut sections: Vec<String> = Vec::new();

        sections.push(self.status_view());
        if let Some(search) = self.search_view() {
            sections.push(search);
        }

        let columns = self.columns.visible_columns();
        let widths = self.column_widths(&columns);
        sections.push(self.header_view(&columns, &widths));
        if self.show_filters {
            sections.push(self.filter_row_view(&columns, &widths));
        }
        sections.push(self.separator_view(&widths));

        let page = self.page_ids();
        if page.is_empty() {
            sections.push(
                self.styles
                    .no_results
                    .clone()
                    .render(&self.config.messages.no_results),
            );
        }
        for (index, &id) in page.iter().enumerate() {
            sections.push(self.row_view(id, index == self.cursor, &columns, &widths));
            if let Some(nested) = self.expanded_view(id) {
                sections.push(nested);
            }
        }

        if self.config.show_pagination {
            sections.push(self.footer_view());
        }
        if let Mode::ColumnMenu { cursor } = self.mode {
            sections.push(self.menu_view(cursor));
        }
        if self.show_help {
            sections.push(self.help_view());
        }

        sections.join("\n")
    }

    fn status_view(&self) -> String {
        let messages = &self.config.messages;
        let mut parts = Vec::new();
        if !self.title.is_empty() {
            parts.push(self.styles.title.clone().render(&self.title));
        }
        if self.is_loading() {
            parts.push(self.styles.loading.clone().render(&messages.loading));
        } else if let Some(error) = &self.loader.last_error {
            let text = format!("{} ({error})", messages.fetch_failed);
            parts.push(self.styles.error.clone().render(&text));
        }
        parts.push(
            self.styles
                .status_bar
                .clone()
                .render(&messages.results_line(self.filtered_len())),
        );
        parts.join("  ")
    }

    fn search_view(&self) -> Option<String> {
        if let Mode::EditFilter { key, .. } = &self.mode {
            let label = self.columns.get(key).map_or(key.as_str(), |c| c.label.as_str());
            let prompt = self
                .styles
                .search_prompt
                .clone()
                .render(&self.config.messages.filter_prompt);
            return Some(format!("{prompt}{label}"));
        }
        let editing = self.mode == Mode::Search;
        if !editing && self.filters.global().is_empty() {
            return None;
        }
        let prompt = self
            .styles
            .search_prompt
            .clone()
            .render(&self.config.messages.search_prompt);
        let needle = if editing {
            self.inputs.global.view()
        } else {
            self.filters.global().to_string()
        };
        Some(format!("{prompt}{needle}"))
    }

    fn gutter_width(&self) -> usize {
        // Cursor marker, then an expander when rows can expand.
        if self.nested_specs.is_empty() {
            2
        } else {
            4
        }
    }

    fn column_widths(&self, columns: &[&Column<R>]) -> Vec<usize> {
        let rows = self.page_rows();
        columns
            .iter()
            .map(|column| {
                if let Some(width) = column.width {
                    return width.max(1);
                }
                // Room for the label plus a sort arrow.
                let header = column.label.width() + 2;
                let content = rows
                    .iter()
                    .map(|row| column.value(row).to_string().width())
                    .max()
                    .unwrap_or(0);
                header.max(content).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }

    fn header_view(&self, columns: &[&Column<R>], widths: &[usize]) -> String {
        let dragging = self.columns.dragging().map(|c| c.key.as_str());
        let cells: Vec<String> = columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(index, (column, &width))| {
                let arrow = self
                    .sort
                    .as_ref()
                    .filter(|state| state.key == column.key)
                    .map(|state| state.direction.arrow());
                let label_width = if arrow.is_some() { width.saturating_sub(2) } else { width };
                let label = pad(&truncate(&column.label, label_width), label_width);
                let style = if dragging == Some(column.key.as_str()) {
                    &self.styles.header_dragging
                } else if index == self.focus {
                    &self.styles.header_focused
                } else {
                    &self.styles.header
                };
                let mut cell = style.clone().render(&label);
                if let Some(arrow) = arrow {
                    cell.push(' ');
                    cell.push_str(&self.styles.sort_arrow.clone().render(arrow));
                }
                cell
            })
            .collect();
        format!("{}{}", " ".repeat(self.gutter_width()), cells.join(CELL_SEPARATOR))
    }

    fn filter_row_view(&self, columns: &[&Column<R>], widths: &[usize]) -> String {
        let cells: Vec<String> = columns
            .iter()
            .zip(widths)
            .map(|(column, &width)| {
                if !column.filterable {
                    return " ".repeat(width);
                }
                let editing = match &self.mode {
                    Mode::EditFilter { key, field } if *key == column.key => Some(*field),
                    _ => None,
                };
                let field_text = |field: FilterField| {
                    let inputs = self.inputs.column(&column.key);
                    match inputs {
                        Some(inputs) if editing == Some(field) => inputs.field(field).view(),
                        Some(inputs) => inputs.field(field).value(),
                        None => String::new(),
                    }
                };
                let text = if column.kind == ColumnKind::Number {
                    format!("{}…{}", field_text(FilterField::Min), field_text(FilterField::Max))
                } else {
                    field_text(FilterField::Value)
                };
                if editing.is_some() {
                    // The focused input is already styled and is never cut.
                    let fill = width.saturating_sub(lipgloss::width_visible(&text));
                    let padding = self.styles.filter_input_active.clone().render(&" ".repeat(fill));
                    return format!("{text}{padding}");
                }
                self.styles
                    .filter_input
                    .clone()
                    .render(&pad(&truncate(&text, width), width))
            })
            .collect();
        format!("{}{}", " ".repeat(self.gutter_width()), cells.join(CELL_SEPARATOR))
    }

    fn separator_view(&self, widths: &[usize]) -> String {
        let rule: Vec<String> = widths.iter().map(|&w| "─".repeat(w)).collect();
        let line = format!("{}{}", "─".repeat(self.gutter_width()), rule.join("─┼─"));
        self.styles.separator.clone().render(&line)
    }

    fn row_view(&self, id: RowId, selected: bool, columns: &[&Column<R>], widths: &[usize]) -> String {
        let Some(row) = self.rows.get(id) else {
            return String::new();
        };
        let mut gutter = String::from(if selected { "> " } else { "  " });
        if !self.nested_specs.is_empty() {
            let marker = if self.is_expanded(id) { EXPANDED } else { COLLAPSED };
            gutter.push_str(&self.styles.expander.clone().render(marker));
            gutter.push(' ');
        }
        let cells: Vec<String> = columns
            .iter()
            .zip(widths)
            .map(|(column, &width)| {
                let text = column.value(row).to_string();
                pad(&truncate(&text, width), width)
            })
            .collect();
        let style = if selected {
            &self.styles.selected_row
        } else {
            &self.styles.cell
        };
        format!("{gutter}{}", style.clone().render(&cells.join(CELL_SEPARATOR)))
    }

    fn expanded_view(&self, id: RowId) -> Option<String> {
        if !self.is_expanded(id) {
            return None;
        }
        let views = self.nested(id)?;
        if views.is_empty() {
            return None;
        }
        let rendered: Vec<String> = views
            .iter()
            .map(|view| indent(&view.view(), NESTED_INDENT))
            .collect();
        Some(rendered.join("\n"))
    }

    fn footer_view(&self) -> String {
        let rows_per_page = format!(
            "{}: {}",
            self.config.messages.rows_per_page,
            self.paginator.page_size()
        );
        format!(
            "{}  {}",
            self.paginator.view(),
            self.styles.rows_per_page.clone().render(&rows_per_page)
        )
    }

    fn menu_view(&self, cursor: usize) -> String {
        let mut lines = vec![self
            .styles
            .menu_title
            .clone()
            .render(&self.config.messages.columns_title)];
        for (index, entry) in self.columns.menu_entries().iter().enumerate() {
            let check = if entry.visible { "[x]" } else { "[ ]" };
            let lock = if entry.hidable { "" } else { " *" };
            let line = format!("{check} {}{lock}", entry.label);
            if index == cursor {
                lines.push(self.styles.menu_selected.clone().render(&format!("> {line}")));
            } else {
                lines.push(self.styles.menu_item.clone().render(&format!("  {line}")));
            }
        }
        lines.join("\n")
    }

    fn help_view(&self) -> String {
        self.help.view(self)
    }
}

/// Cuts `text` to `width` columns, marking the cut with an ellipsis.
pub(super) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(ELLIPSIS);
    out
}

/// Right-pads `text` with spaces to `width` columns.
pub(super) fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(fill))
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
