//! Filter predicates: per-column filters and the global search.
//!
//! A row is kept when it passes every active column filter and the global
//! filter. Text matching is case-insensitive everywhere. The global filter
//! only scans visible columns; column filters apply whether or not their
//! column is currently shown.

use super::column::{Column, ColumnKind, ColumnModel};
use super::types::{Record, RowId};
use crate::value::{parse_date, CellValue};
use std::collections::BTreeMap;

/// An inclusive numeric range; absent bounds are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Parses the text of a min or max input. Anything that is not a finite
    /// number leaves the bound unset.
    pub fn parse_bound(input: &str) -> Option<f64> {
        input
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
    }

    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// The filter applied to one column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Substring match.
    Text(String),
    Range(NumericRange),
    /// Exact match against a date picked in a date input.
    Date(String),
}

impl FilterValue {
    /// An empty filter imposes no constraint and is not stored.
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(s) | FilterValue::Date(s) => s.trim().is_empty(),
            FilterValue::Range(range) => range.is_unbounded(),
        }
    }

    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            FilterValue::Text(needle) => match value {
                CellValue::Missing => false,
                other => contains_ignore_case(&other.to_string(), needle),
            },
            FilterValue::Range(range) => {
                if range.is_unbounded() {
                    return true;
                }
                value.as_number().is_some_and(|n| range.contains(n))
            }
            FilterValue::Date(wanted) => match value {
                CellValue::Missing => false,
                CellValue::Date { raw, date } => {
                    raw == wanted.trim()
                        || date.is_some_and(|d| parse_date(wanted) == Some(d))
                }
                other => other.to_string() == wanted.trim(),
            },
        }
    }
}

/// The complete filter state of a grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters {
    columns: BTreeMap<String, FilterValue>,
    global: String,
}

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter for a column; an empty value clears it.
    pub fn set(&mut self, key: impl Into<String>, value: FilterValue) {
        let key = key.into();
        if value.is_empty() {
            self.columns.remove(&key);
        } else {
            self.columns.insert(key, value);
        }
    }

    /// Sets the range filter of a column from the raw text of its min and max
    /// inputs.
    pub fn set_range_text(&mut self, key: impl Into<String>, min: &str, max: &str) {
        let range = NumericRange::new(NumericRange::parse_bound(min), NumericRange::parse_bound(max));
        self.set(key, FilterValue::Range(range));
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.columns.get(key)
    }

    pub fn clear(&mut self, key: &str) -> bool {
        self.columns.remove(key).is_some()
    }

    pub fn set_global(&mut self, needle: impl Into<String>) {
        self.global = needle.into();
    }

    pub fn global(&self) -> &str {
        &self.global
    }

    pub fn clear_all(&mut self) {
        self.columns.clear();
        self.global.clear();
    }

    /// Number of active column filters (the global filter not included).
    pub fn active_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_active(&self) -> bool {
        !self.columns.is_empty() || !self.global.trim().is_empty()
    }
}

/// Builds the filter value a column kind expects from the text of its input.
pub fn value_for_kind(kind: ColumnKind, input: &str) -> FilterValue {
    match kind {
        ColumnKind::Date => FilterValue::Date(input.trim().to_string()),
        ColumnKind::Number => {
            FilterValue::Range(NumericRange::new(NumericRange::parse_bound(input), None))
        }
        ColumnKind::Text | ColumnKind::Priority => FilterValue::Text(input.to_string()),
    }
}

/// Returns the ids of all rows passing `filters`, in source order.
pub fn apply<R: Record>(rows: &[R], columns: &ColumnModel<R>, filters: &Filters) -> Vec<RowId> {
    let active: Vec<(&Column<R>, &FilterValue)> = filters
        .columns
        .iter()
        .filter_map(|(key, value)| columns.get(key).map(|column| (column, value)))
        .collect();
    let visible = columns.visible_columns();
    let needle = filters.global.trim();

    rows.iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(column, value)| value.matches(&column.value(row)))
        })
        .filter(|(_, row)| needle.is_empty() || global_matches(*row, &visible, needle))
        .map(|(id, _)| id)
        .collect()
}

/// True if any of the given columns of `row` contains `needle`.
pub fn global_matches<R>(row: &R, columns: &[&Column<R>], needle: &str) -> bool {
    columns
        .iter()
        .any(|column| contains_ignore_case(&column.value(row).to_string(), needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
