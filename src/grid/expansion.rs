//! Per-row expanded/collapsed state.

use super::types::RowKey;
use std::collections::HashMap;

/// Tracks which rows of one grid are expanded.
///
/// Rows not in the map read as collapsed. Entries for rows that are filtered
/// out stay around untouched, so clearing the filter shows those rows
/// expanded again.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded: HashMap<RowKey, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the state of `key` and returns the new state.
    pub fn toggle(&mut self, key: impl Into<RowKey>) -> bool {
        let entry = self.expanded.entry(key.into()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set_expanded(&mut self, key: impl Into<RowKey>, expanded: bool) {
        self.expanded.insert(key.into(), expanded);
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.get(key).copied().unwrap_or(false)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Keys of all expanded rows.
    pub fn expanded_keys(&self) -> impl Iterator<Item = &RowKey> {
        self.expanded
            .iter()
            .filter(|(_, &open)| open)
            .map(|(key, _)| key)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded_keys().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_row_is_collapsed() {
        let state = ExpansionState::new();
        assert!(!state.is_expanded(&RowKey::Index(3)));
    }

    #[test]
    fn test_toggle_flips() {
        let mut state = ExpansionState::new();
        assert!(state.toggle(2usize));
        assert!(state.is_expanded(&RowKey::Index(2)));
        assert!(!state.toggle(2usize));
        assert!(!state.is_expanded(&RowKey::Index(2)));
    }

    #[test]
    fn test_stable_keys_are_independent_of_index() {
        let mut state = ExpansionState::new();
        state.toggle("task-7");
        assert!(state.is_expanded(&RowKey::Stable("task-7".into())));
        assert!(!state.is_expanded(&RowKey::Index(7)));
    }

    #[test]
    fn test_collapse_all() {
        let mut state = ExpansionState::new();
        state.toggle(1usize);
        state.set_expanded(4usize, true);
        assert_eq!(state.expanded_count(), 2);
        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
    }
}
