//! Nested grids shown under expanded rows.
//!
//! An expanded row can show one or more secondary grids built from its
//! sub-collections (a hospital stay shows its diagnoses, billing items and
//! procedures). Each nested grid is a full [`Model`] of its own with its own
//! filter, sort and pagination state; the parent owns them per row and never
//! shares state between them.

use super::column::Column;
use super::types::Record;
use super::Model;
use crate::config::GridConfig;
use crate::error::GridResult;
use std::fmt;
use std::sync::Arc;

/// A nested grid as seen by its parent, independent of its row type.
pub trait NestedView: Send {
    /// Collection name, e.g. `"diagnosis"`.
    fn name(&self) -> &str;

    fn title(&self) -> &str;

    /// Number of rows matching the nested grid's own filters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set_global_filter(&mut self, needle: &str);

    /// Clicks the header of `key`; see [`Model::sort_by`].
    fn sort_by(&mut self, key: &str) -> bool;

    fn view(&self) -> String;
}

/// A nested grid over a sub-collection of type `C`.
pub struct NestedTable<C: Record> {
    name: String,
    title: String,
    grid: Model<C>,
}

impl<C: Record> NestedTable<C> {
    /// Builds the nested grid with pagination suppressed.
    pub fn new(
        name: impl Into<String>,
        title: impl Into<String>,
        columns: Vec<Column<C>>,
        rows: Vec<C>,
        config: &GridConfig,
    ) -> GridResult<Self> {
        let mut grid = Model::new(columns, config.nested())?;
        grid.show_help = false;
        grid.set_rows(rows);
        Ok(Self {
            name: name.into(),
            title: title.into(),
            grid,
        })
    }

    pub fn grid(&self) -> &Model<C> {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Model<C> {
        &mut self.grid
    }
}

impl<C: Record> NestedView for NestedTable<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn len(&self) -> usize {
        self.grid.filtered_len()
    }

    fn set_global_filter(&mut self, needle: &str) {
        self.grid.set_global_filter(needle);
    }

    fn sort_by(&mut self, key: &str) -> bool {
        self.grid.sort_by(key)
    }

    fn view(&self) -> String {
        let title = self.grid.styles.nested_title.clone().render(&self.title);
        if self.grid.rows().is_empty() {
            let placeholder = self
                .grid
                .styles
                .no_results
                .clone()
                .render(&self.grid.config.messages.no_results);
            return format!("{title}\n{placeholder}");
        }
        format!("{title}\n{}", self.grid.view())
    }
}

type BuildFn<R> = dyn Fn(&R, &GridConfig) -> GridResult<Box<dyn NestedView>> + Send + Sync;

/// Declares a sub-collection of `R` that is shown as a nested grid.
pub struct NestedSpec<R> {
    name: String,
    build: Arc<BuildFn<R>>,
}

impl<R: Record> NestedSpec<R> {
    /// A nested grid over `collection(row)` using `C`'s default columns.
    pub fn new<C: Record>(
        name: impl Into<String>,
        title: impl Into<String>,
        collection: fn(&R) -> &[C],
    ) -> Self {
        Self::with_columns(name, title, collection, C::columns)
    }

    pub fn with_columns<C: Record>(
        name: impl Into<String>,
        title: impl Into<String>,
        collection: fn(&R) -> &[C],
        columns: fn() -> Vec<Column<C>>,
    ) -> Self {
        let name = name.into();
        let title = title.into();
        let table_name = name.clone();
        let build = move |row: &R, config: &GridConfig| -> GridResult<Box<dyn NestedView>> {
            let table = NestedTable::new(
                table_name.clone(),
                title.clone(),
                columns(),
                collection(row).to_vec(),
                config,
            )?;
            Ok(Box::new(table))
        };
        Self {
            name,
            build: Arc::new(build),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(&self, row: &R, config: &GridConfig) -> GridResult<Box<dyn NestedView>> {
        (self.build)(row, config)
    }
}

impl<R> Clone for NestedSpec<R> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            build: Arc::clone(&self.build),
        }
    }
}

impl<R> fmt::Debug for NestedSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedSpec").field("name", &self.name).finish()
    }
}
