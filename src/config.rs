//! Grid configuration.
//!
//! Everything a grid needs to know about its surroundings (allowed page sizes,
//! the page size the user last picked, localized strings) is resolved by the
//! embedding application and handed to [`Model::new`](crate::grid::Model::new).
//! Grids never read settings from a process-wide store on their own.
//!
//! # Examples
//!
//! ```rust
//! use patient_grid::config::GridConfig;
//!
//! let config = GridConfig::from_json(r#"{ "defaultPageSize": 24 }"#).unwrap();
//! assert_eq!(config.default_page_size, 24);
//! assert_eq!(config.page_sizes, vec![12, 16, 24, 48, 100]);
//! ```

use crate::error::{GridError, GridResult};
use serde::{Deserialize, Serialize};

/// Page sizes offered by the page-size selector unless configured otherwise.
pub const DEFAULT_PAGE_SIZES: [usize; 5] = [12, 16, 24, 48, 100];

/// Localized user-facing strings.
///
/// `results` may contain a `{count}` placeholder which is replaced with the
/// number of rows matching the current filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Messages {
    pub no_results: String,
    pub loading: String,
    pub results: String,
    pub search_prompt: String,
    pub filter_prompt: String,
    pub columns_title: String,
    pub rows_per_page: String,
    pub fetch_failed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            no_results: "No results.".to_string(),
            loading: "Loading…".to_string(),
            results: "{count} results".to_string(),
            search_prompt: "Search: ".to_string(),
            filter_prompt: "Filter: ".to_string(),
            columns_title: "Columns".to_string(),
            rows_per_page: "Rows per page".to_string(),
            fetch_failed: "Could not load data.".to_string(),
        }
    }
}

impl Messages {
    /// Formats the result-count line for `count` rows.
    ///
    /// ```rust
    /// use patient_grid::config::Messages;
    ///
    /// assert_eq!(Messages::default().results_line(3), "3 results");
    /// ```
    pub fn results_line(&self, count: usize) -> String {
        self.results.replace("{count}", &count.to_string())
    }
}

/// Configuration injected into every grid at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// Sizes the page-size selector cycles through.
    pub page_sizes: Vec<usize>,
    /// Initial page size; must be one of `page_sizes`.
    pub default_page_size: usize,
    /// Whether the paginator footer is rendered. Nested grids turn this off
    /// and show only a result count.
    pub show_pagination: bool,
    /// Whether the per-column filter inputs start out visible.
    pub show_filters: bool,
    pub messages: Messages,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_sizes: DEFAULT_PAGE_SIZES.to_vec(),
            default_page_size: DEFAULT_PAGE_SIZES[0],
            show_pagination: true,
            show_filters: false,
            messages: Messages::default(),
        }
    }
}

impl GridConfig {
    /// Builds a validated configuration with default messages.
    pub fn new(page_sizes: Vec<usize>, default_page_size: usize) -> GridResult<Self> {
        let config = Self {
            page_sizes,
            default_page_size,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON configuration document. Missing fields take their
    /// defaults; the result is validated.
    pub fn from_json(json: &str) -> GridResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(GridError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GridResult<()> {
        if self.page_sizes.is_empty() {
            return Err(GridError::InvalidConfig(
                "page_sizes cannot be empty".into(),
            ));
        }
        if self.page_sizes.contains(&0) {
            return Err(GridError::InvalidConfig(
                "page sizes must be greater than zero".into(),
            ));
        }
        if !self.page_sizes.contains(&self.default_page_size) {
            return Err(GridError::InvalidPageSize {
                size: self.default_page_size,
                allowed: self.page_sizes.clone(),
            });
        }
        Ok(())
    }

    /// Sets the initial page size, e.g. the one the user picked last session.
    pub fn with_default_page_size(mut self, size: usize) -> GridResult<Self> {
        self.default_page_size = size;
        self.validate()?;
        Ok(self)
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Derives the configuration for a grid nested under an expanded row:
    /// same messages, pagination suppressed. A grid without pagination renders
    /// every matching row and only shows the result count.
    pub fn nested(&self) -> Self {
        let largest = self
            .page_sizes
            .iter()
            .copied()
            .max()
            .unwrap_or(DEFAULT_PAGE_SIZES[4]);
        Self {
            page_sizes: vec![largest],
            default_page_size: largest,
            show_pagination: false,
            show_filters: false,
            messages: self.messages.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_page_size, 12);
        assert!(config.show_pagination);
    }

    #[test]
    fn test_rejects_default_outside_options() {
        let err = GridConfig::new(vec![12, 24], 16).unwrap_err();
        assert!(matches!(err, GridError::InvalidPageSize { size: 16, .. }));
    }

    #[test]
    fn test_rejects_empty_and_zero_sizes() {
        assert!(matches!(
            GridConfig::new(vec![], 12),
            Err(GridError::InvalidConfig(_))
        ));
        assert!(matches!(
            GridConfig::new(vec![0, 12], 12),
            Err(GridError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_json_partial_document() {
        let config = GridConfig::from_json(
            r#"{ "defaultPageSize": 48, "messages": { "noResults": "Keine Ergebnisse" } }"#,
        )
        .unwrap();
        assert_eq!(config.default_page_size, 48);
        assert_eq!(config.messages.no_results, "Keine Ergebnisse");
        assert_eq!(config.messages.loading, "Loading…");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            GridConfig::from_json("not json"),
            Err(GridError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_nested_suppresses_pagination() {
        let nested = GridConfig::default().nested();
        assert!(!nested.show_pagination);
        assert_eq!(nested.default_page_size, 100);
        assert!(nested.validate().is_ok());
    }

    #[test]
    fn test_results_line() {
        let messages = Messages {
            results: "{count} Treffer".to_string(),
            ..Messages::default()
        };
        assert_eq!(messages.results_line(7), "7 Treffer");
    }
}
