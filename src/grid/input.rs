//! Text inputs behind the search box and the filter row.
//!
//! Every input is a [`textinput::Model`], so the search and filter cells get
//! cursor movement, word deletion and line editing for free. Only one input
//! holds focus at a time; the grid focuses it when entering an editing mode
//! and blurs everything when leaving.

use super::filter::{FilterValue, NumericRange};
use super::types::FilterField;
use bubbletea_rs::Cmd;
use bubbletea_widgets::textinput;
use std::collections::HashMap;

/// A single-line input without a prompt.
pub fn line_input() -> textinput::Model {
    let mut input = textinput::new();
    input.prompt = String::new();
    input
}

/// Replaces the text of an input and moves the cursor after it.
pub fn set_text(input: &mut textinput::Model, text: &str) {
    input.set_value(text);
    input.cursor_end();
}

/// The inputs of one column's filter cell.
pub struct ColumnInputs {
    pub value: textinput::Model,
    pub min: textinput::Model,
    pub max: textinput::Model,
}

impl Default for ColumnInputs {
    fn default() -> Self {
        Self {
            value: line_input(),
            min: line_input(),
            max: line_input(),
        }
    }
}

impl ColumnInputs {
    pub fn field(&self, field: FilterField) -> &textinput::Model {
        match field {
            FilterField::Value => &self.value,
            FilterField::Min => &self.min,
            FilterField::Max => &self.max,
        }
    }

    pub fn field_mut(&mut self, field: FilterField) -> &mut textinput::Model {
        match field {
            FilterField::Value => &mut self.value,
            FilterField::Min => &mut self.min,
            FilterField::Max => &mut self.max,
        }
    }

    /// Rewrites the inputs to show `value`.
    pub fn show(&mut self, value: &FilterValue) {
        match value {
            FilterValue::Text(s) | FilterValue::Date(s) => set_text(&mut self.value, s),
            FilterValue::Range(range) => {
                set_text(&mut self.min, &format_bound(range.min));
                set_text(&mut self.max, &format_bound(range.max));
            }
        }
    }

    pub fn clear(&mut self) {
        self.value.reset();
        self.min.reset();
        self.max.reset();
    }

    fn blur(&mut self) {
        self.value.blur();
        self.min.blur();
        self.max.blur();
    }
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map(|n| n.to_string()).unwrap_or_default()
}

/// All text inputs of a grid.
pub struct FilterInputs {
    pub global: textinput::Model,
    columns: HashMap<String, ColumnInputs>,
}

impl Default for FilterInputs {
    fn default() -> Self {
        Self {
            global: line_input(),
            columns: HashMap::new(),
        }
    }
}

impl FilterInputs {
    pub fn column(&self, key: &str) -> Option<&ColumnInputs> {
        self.columns.get(key)
    }

    pub fn column_mut(&mut self, key: &str) -> &mut ColumnInputs {
        self.columns.entry(key.to_string()).or_default()
    }

    /// Text of one input, empty if the column was never edited.
    pub fn text(&self, key: &str, field: FilterField) -> String {
        self.columns
            .get(key)
            .map(|inputs| inputs.field(field).value())
            .unwrap_or_default()
    }

    /// The range typed into a column's min and max inputs.
    pub fn range(&self, key: &str) -> NumericRange {
        NumericRange::new(
            NumericRange::parse_bound(&self.text(key, FilterField::Min)),
            NumericRange::parse_bound(&self.text(key, FilterField::Max)),
        )
    }

    /// Drops the inputs of a column. Returns false if it had none.
    pub fn remove(&mut self, key: &str) -> bool {
        self.columns.remove(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Moves focus to the search box.
    pub fn focus_global(&mut self) -> Cmd {
        self.blur_all();
        self.global.focus()
    }

    /// Moves focus to one field of a column's filter cell.
    pub fn focus_field(&mut self, key: &str, field: FilterField) -> Cmd {
        self.blur_all();
        self.column_mut(key).field_mut(field).focus()
    }

    pub fn blur_all(&mut self) {
        self.global.blur();
        self.columns.values_mut().for_each(ColumnInputs::blur);
    }

    pub fn clear_all(&mut self) {
        self.global.reset();
        self.columns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bubbletea_rs::{KeyMsg, Msg};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_focused_input_edits_at_cursor() {
        let mut inputs = FilterInputs::default();
        let _ = inputs.focus_global();
        inputs.global.update(key(KeyCode::Char('a')));
        inputs.global.update(key(KeyCode::Char('c')));
        inputs.global.update(key(KeyCode::Left));
        inputs.global.update(key(KeyCode::Char('b')));
        assert_eq!(inputs.global.value(), "abc");
        inputs.global.update(key(KeyCode::Backspace));
        assert_eq!(inputs.global.value(), "ac");
    }

    #[test]
    fn test_blurred_input_ignores_keys() {
        let mut inputs = FilterInputs::default();
        let _ = inputs.focus_field("amount", FilterField::Min);
        let _ = inputs.focus_global();
        inputs
            .column_mut("amount")
            .min
            .update(key(KeyCode::Char('5')));
        assert_eq!(inputs.text("amount", FilterField::Min), "");
    }

    #[test]
    fn test_range_from_inputs() {
        let mut inputs = FilterInputs::default();
        set_text(&mut inputs.column_mut("amount").min, "10");
        set_text(&mut inputs.column_mut("amount").max, "oops");
        assert_eq!(inputs.range("amount"), NumericRange::new(Some(10.0), None));
        assert_eq!(inputs.range("other"), NumericRange::default());
    }

    #[test]
    fn test_show_range() {
        let mut inputs = ColumnInputs::default();
        inputs.show(&FilterValue::Range(NumericRange::new(None, Some(2.5))));
        assert_eq!(inputs.min.value(), "");
        assert_eq!(inputs.max.value(), "2.5");
    }

    #[test]
    fn test_remove_unknown_column_inserts_nothing() {
        let mut inputs = FilterInputs::default();
        assert!(!inputs.remove("ghost"));
        assert!(inputs.is_empty());
    }
}
