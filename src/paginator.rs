//! Pagination state for grids.
//!
//! The paginator tracks the page index and page size and derives the page
//! count from the number of rows that survived filtering. It does not hold the
//! rows; the grid asks it for slice bounds and renders the page itself.
//!
//! Changing the total (because a filter changed) deliberately leaves the page
//! index alone, so the stored index can point past the last page. Everything
//! that reads a page goes through [`Model::effective_page`], which clamps.

use crate::config::{GridConfig, DEFAULT_PAGE_SIZES};
use crate::error::{GridError, GridResult};
use bubbletea_widgets::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};

/// The type of pagination to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Type {
    /// Page numbers, e.g. "1/5".
    #[default]
    Arabic,
    /// One dot per page, e.g. "• ○ ○".
    Dots,
}

/// Key bindings for the first/prev/next/last page buttons and the page-size
/// selector.
#[derive(Debug, Clone)]
pub struct PaginatorKeyMap {
    pub prev_page: key::Binding,
    pub next_page: key::Binding,
    pub first_page: key::Binding,
    pub last_page: key::Binding,
    pub page_size: key::Binding,
}

impl Default for PaginatorKeyMap {
    fn default() -> Self {
        Self {
            prev_page: key::new_binding(vec![
                key::with_keys_str(&["pgup", "["]),
                key::with_help("pgup/[", "prev page"),
            ]),
            next_page: key::new_binding(vec![
                key::with_keys_str(&["pgdown", "]"]),
                key::with_help("pgdn/]", "next page"),
            ]),
            first_page: key::new_binding(vec![
                key::with_keys_str(&["home", "{"]),
                key::with_help("home", "first page"),
            ]),
            last_page: key::new_binding(vec![
                key::with_keys_str(&["end", "}"]),
                key::with_help("end", "last page"),
            ]),
            page_size: key::new_binding(vec![
                key::with_keys_str(&["p"]),
                key::with_help("p", "rows per page"),
            ]),
        }
    }
}

impl KeyMapTrait for PaginatorKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev_page, &self.next_page]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![
            &self.first_page,
            &self.prev_page,
            &self.next_page,
            &self.last_page,
            &self.page_size,
        ]]
    }
}

/// Pagination state: page index, page size and the filtered row count.
///
/// # Examples
///
/// ```rust
/// use patient_grid::paginator::Model;
///
/// let mut paginator = Model::new();
/// paginator.set_total_items(25);
/// assert_eq!(paginator.page_size(), 12);
/// assert_eq!(paginator.page_count(), 3);
///
/// paginator.last_page();
/// assert_eq!(paginator.page, 2);
/// paginator.next_page(); // already on the last page
/// assert_eq!(paginator.page, 2);
/// assert_eq!(paginator.slice_bounds(), (24, 25));
/// ```
#[derive(Debug, Clone)]
pub struct Model {
    pub paginator_type: Type,
    /// The stored page index. May exceed the last page after filtering; use
    /// [`Model::effective_page`] when reading.
    pub page: usize,
    page_size: usize,
    page_sizes: Vec<usize>,
    total_items: usize,

    pub active_dot: String,
    pub inactive_dot: String,
    /// Format for Arabic mode, the first `%d` is the page, the second the count.
    pub arabic_format: String,

    pub keymap: PaginatorKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            paginator_type: Type::default(),
            page: 0,
            page_size: DEFAULT_PAGE_SIZES[0],
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            total_items: 0,
            active_dot: "•".to_string(),
            inactive_dot: "○".to_string(),
            arabic_format: "%d/%d".to_string(),
            keymap: PaginatorKeyMap::default(),
        }
    }
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a paginator using the page sizes of a validated configuration.
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            page_size: config.default_page_size.max(1),
            page_sizes: config.page_sizes.clone(),
            ..Self::default()
        }
    }

    pub fn with_total_items(mut self, items: usize) -> Self {
        self.set_total_items(items);
        self
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Changes the page size and goes back to the first page.
    ///
    /// Sizes outside the configured options are rejected.
    ///
    /// ```rust
    /// use patient_grid::paginator::Model;
    ///
    /// let mut paginator = Model::new().with_total_items(100);
    /// paginator.next_page();
    /// paginator.set_page_size(24).unwrap();
    /// assert_eq!(paginator.page, 0);
    /// assert!(paginator.set_page_size(13).is_err());
    /// ```
    pub fn set_page_size(&mut self, size: usize) -> GridResult<()> {
        if !self.page_sizes.contains(&size) {
            return Err(GridError::InvalidPageSize {
                size,
                allowed: self.page_sizes.clone(),
            });
        }
        self.page_size = size;
        self.page = 0;
        Ok(())
    }

    /// Switches to the next configured page size, wrapping around. Returns the
    /// new size.
    pub fn cycle_page_size(&mut self) -> usize {
        let next = self
            .page_sizes
            .iter()
            .position(|&s| s == self.page_size)
            .map(|i| self.page_sizes[(i + 1) % self.page_sizes.len()])
            .or_else(|| self.page_sizes.first().copied())
            .unwrap_or(self.page_size);
        self.page_size = next;
        self.page = 0;
        next
    }

    /// Records how many rows are being paginated. The page index is left as
    /// it is.
    pub fn set_total_items(&mut self, items: usize) {
        self.total_items = items;
    }

    /// `ceil(total_items / page_size)`; zero when there is nothing to show.
    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    fn last_index(&self) -> usize {
        self.page_count().max(1) - 1
    }

    /// The stored page clamped to the last page that exists.
    pub fn effective_page(&self) -> usize {
        self.page.min(self.last_index())
    }

    /// Start (inclusive) and end (exclusive) row positions of the effective
    /// page within the filtered rows.
    pub fn slice_bounds(&self) -> (usize, usize) {
        let start = (self.effective_page() * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        (start, end)
    }

    pub fn items_on_page(&self) -> usize {
        let (start, end) = self.slice_bounds();
        end - start
    }

    pub fn prev_page(&mut self) {
        self.page = self.effective_page().saturating_sub(1);
    }

    pub fn next_page(&mut self) {
        self.page = (self.effective_page() + 1).min(self.last_index());
    }

    pub fn first_page(&mut self) {
        self.page = 0;
    }

    pub fn last_page(&mut self) {
        self.page = self.last_index();
    }

    /// Handles the paginator key bindings. Returns true if the message was
    /// consumed.
    pub fn update(&mut self, msg: &Msg) -> bool {
        let Some(key_msg) = msg.downcast_ref::<KeyMsg>() else {
            return false;
        };
        self.handle_key(key_msg)
    }

    pub(crate) fn handle_key(&mut self, key_msg: &KeyMsg) -> bool {
        if self.keymap.next_page.matches(key_msg) {
            self.next_page();
        } else if self.keymap.prev_page.matches(key_msg) {
            self.prev_page();
        } else if self.keymap.first_page.matches(key_msg) {
            self.first_page();
        } else if self.keymap.last_page.matches(key_msg) {
            self.last_page();
        } else if self.keymap.page_size.matches(key_msg) {
            self.cycle_page_size();
        } else {
            return false;
        }
        true
    }

    pub fn view(&self) -> String {
        match self.paginator_type {
            Type::Arabic => self.arabic_view(),
            Type::Dots => self.dots_view(),
        }
    }

    fn arabic_view(&self) -> String {
        self.arabic_format
            .replacen("%d", &(self.effective_page() + 1).to_string(), 1)
            .replacen("%d", &self.page_count().max(1).to_string(), 1)
    }

    fn dots_view(&self) -> String {
        let current = self.effective_page();
        (0..self.page_count().max(1))
            .map(|i| {
                if i == current {
                    self.active_dot.as_str()
                } else {
                    self.inactive_dot.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key_msg(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_page_count_is_ceiling() {
        let mut paginator = Model::new();
        paginator.set_total_items(25);
        assert_eq!(paginator.page_count(), 3);
        paginator.set_total_items(24);
        assert_eq!(paginator.page_count(), 2);
        paginator.set_total_items(0);
        assert_eq!(paginator.page_count(), 0);
        assert_eq!(paginator.effective_page(), 0);
    }

    #[test]
    fn test_next_page_clamps_on_last_page() {
        let mut paginator = Model::new().with_total_items(25);
        paginator.page = 2;
        paginator.next_page();
        assert_eq!(paginator.page, 2);
    }

    #[test]
    fn test_prev_page_clamps_on_first_page() {
        let mut paginator = Model::new().with_total_items(25);
        paginator.prev_page();
        assert_eq!(paginator.page, 0);
    }

    #[test]
    fn test_first_and_last() {
        let mut paginator = Model::new().with_total_items(100);
        paginator.last_page();
        assert_eq!(paginator.page, 8);
        paginator.first_page();
        assert_eq!(paginator.page, 0);
    }

    #[test]
    fn test_shrinking_total_keeps_stored_page() {
        let mut paginator = Model::new().with_total_items(100);
        paginator.last_page();
        paginator.set_total_items(5);
        assert_eq!(paginator.page, 8);
        assert_eq!(paginator.effective_page(), 0);
        assert_eq!(paginator.slice_bounds(), (0, 5));
    }

    #[test]
    fn test_navigation_from_out_of_range_page() {
        let mut paginator = Model::new().with_total_items(100);
        paginator.last_page();
        paginator.set_total_items(30);
        paginator.prev_page();
        assert_eq!(paginator.page, 1);
    }

    #[test]
    fn test_slice_lengths() {
        let mut paginator = Model::new().with_total_items(25);
        for page in 0..3 {
            paginator.page = page;
            let expected = 12.min(25 - page * 12);
            assert_eq!(paginator.items_on_page(), expected);
        }
    }

    #[test]
    fn test_set_page_size_resets_page() {
        let mut paginator = Model::new().with_total_items(100);
        paginator.next_page();
        paginator.next_page();
        paginator.set_page_size(48).unwrap();
        assert_eq!(paginator.page, 0);
        assert_eq!(paginator.page_size(), 48);
    }

    #[test]
    fn test_set_page_size_rejects_unknown_size() {
        let mut paginator = Model::new().with_total_items(100);
        paginator.next_page();
        assert!(paginator.set_page_size(10).is_err());
        assert_eq!(paginator.page, 1);
        assert_eq!(paginator.page_size(), 12);
    }

    #[test]
    fn test_cycle_page_size_wraps() {
        let mut paginator = Model::new();
        let sizes: Vec<usize> = (0..5).map(|_| paginator.cycle_page_size()).collect();
        assert_eq!(sizes, vec![16, 24, 48, 100, 12]);
    }

    #[test]
    fn test_from_config() {
        let config = GridConfig::new(vec![10, 20], 20).unwrap();
        let paginator = Model::from_config(&config);
        assert_eq!(paginator.page_size(), 20);
        assert_eq!(paginator.page_sizes(), &[10, 20]);
    }

    #[test]
    fn test_key_navigation() {
        let mut paginator = Model::new().with_total_items(50);
        assert!(paginator.update(&key_msg(KeyCode::PageDown)));
        assert_eq!(paginator.page, 1);
        assert!(paginator.update(&key_msg(KeyCode::End)));
        assert_eq!(paginator.page, 4);
        assert!(paginator.update(&key_msg(KeyCode::Home)));
        assert_eq!(paginator.page, 0);
        assert!(!paginator.update(&key_msg(KeyCode::Char('z'))));
    }

    #[test]
    fn test_views() {
        let mut paginator = Model::new().with_total_items(30);
        assert_eq!(paginator.view(), "1/3");
        paginator.paginator_type = Type::Dots;
        paginator.next_page();
        assert_eq!(paginator.view(), "○ • ○");
    }

    #[test]
    fn test_empty_view_shows_single_page() {
        let paginator = Model::new();
        assert_eq!(paginator.view(), "1/1");
    }
}
