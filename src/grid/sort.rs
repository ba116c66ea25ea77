//! Sort comparators and single-column sort state.

use super::column::{Column, ColumnKind};
use super::types::RowId;
use crate::value::CellValue;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reverse(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The active sort: one column and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub key: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(key: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }

    /// The sort state after the user clicks the header of `key`.
    ///
    /// A new column starts in its comparator's default direction. Clicking
    /// the active column flips it once; a second click clears the sort.
    pub fn cycle(
        current: Option<&SortState>,
        key: &str,
        default: SortDirection,
    ) -> Option<SortState> {
        match current {
            Some(state) if state.key == key => {
                if state.direction == default {
                    Some(SortState::new(key, default.reverse()))
                } else {
                    None
                }
            }
            _ => Some(SortState::new(key, default)),
        }
    }
}

/// A custom comparison between two cells.
pub type CompareFn = fn(&CellValue, &CellValue) -> Ordering;

/// A comparator resolved for one column.
#[derive(Clone, Copy)]
pub enum Comparator {
    /// Numbers numerically, everything else by display text.
    Default,
    /// Parsed calendar dates.
    Date,
    /// `low` < `medium` < `high`, descending by default.
    Priority,
    Custom(CompareFn),
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Comparator::Default => f.write_str("Default"),
            Comparator::Date => f.write_str("Date"),
            Comparator::Priority => f.write_str("Priority"),
            Comparator::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl Comparator {
    pub fn compare(&self, a: &CellValue, b: &CellValue) -> Ordering {
        match self {
            Comparator::Default => compare_default(a, b),
            Comparator::Date => compare_dates(a, b),
            Comparator::Priority => compare_priority(a, b),
            Comparator::Custom(f) => f(a, b),
        }
    }

    /// The direction a first click on the column sorts in.
    pub fn default_direction(&self) -> SortDirection {
        match self {
            Comparator::Priority => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Resolves comparators for columns, with per-key overrides.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    overrides: HashMap<String, Comparator>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, key: impl Into<String>, compare: CompareFn) {
        self.overrides.insert(key.into(), Comparator::Custom(compare));
    }

    pub fn resolve<R>(&self, column: &Column<R>) -> Comparator {
        if let Some(comparator) = self.overrides.get(&column.key) {
            return *comparator;
        }
        match column.kind {
            ColumnKind::Date => Comparator::Date,
            ColumnKind::Priority => Comparator::Priority,
            ColumnKind::Text | ColumnKind::Number => Comparator::Default,
        }
    }
}

/// Missing cells order after present ones, whatever the sort direction.
fn missing_last(a: &CellValue, b: &CellValue) -> Option<Ordering> {
    match (a.is_missing(), b.is_missing()) {
        (true, true) => Some(Ordering::Equal),
        (true, false) => Some(Ordering::Greater),
        (false, true) => Some(Ordering::Less),
        (false, false) => None,
    }
}

pub fn compare_default(a: &CellValue, b: &CellValue) -> Ordering {
    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Compares parsed dates; day-first text is never compared as a string.
/// Unparseable dates order after valid ones and among themselves by text.
pub fn compare_dates(a: &CellValue, b: &CellValue) -> Ordering {
    match (a.as_date(), b.as_date()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.to_string().cmp(&b.to_string()),
    }
}

/// Rank of a priority label; unknown labels rank 0.
pub fn priority_rank(label: &str) -> u8 {
    match label.trim().to_ascii_lowercase().as_str() {
        "low" => 1,
        "medium" => 2,
        "high" => 3,
        _ => 0,
    }
}

pub fn compare_priority(a: &CellValue, b: &CellValue) -> Ordering {
    priority_rank(&a.to_string()).cmp(&priority_rank(&b.to_string()))
}

/// Stable sort of row ids by one column.
pub fn sort_ids<R>(
    ids: &mut Vec<RowId>,
    rows: &[R],
    column: &Column<R>,
    comparator: Comparator,
    direction: SortDirection,
) {
    let mut keyed: Vec<(RowId, CellValue)> = ids
        .iter()
        .filter_map(|&id| rows.get(id).map(|row| (id, column.value(row))))
        .collect();
    keyed.sort_by(|(_, a), (_, b)| {
        missing_last(a, b).unwrap_or_else(|| direction.apply(comparator.compare(a, b)))
    });
    *ids = keyed.into_iter().map(|(id, _)| id).collect();
}
