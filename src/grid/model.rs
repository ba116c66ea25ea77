//! The grid controller: state, construction and the derived row view.
//!
//! All state a grid shows is owned here. Filtering, sorting and pagination
//! are pure functions of that state; the derived list of row ids is
//! recomputed after every mutation so reads are cheap and always consistent.

use super::column::{Column, ColumnModel};
use super::expansion::ExpansionState;
use super::filter::{self, Filters};
use super::input::FilterInputs;
use super::keys::GridKeyMap;
use super::nested::{NestedSpec, NestedView};
use super::sort::{self, CompareFn, Registry, SortState};
use super::style::GridStyles;
use super::types::{Mode, Record, RowId, RowKey};
use crate::config::GridConfig;
use crate::error::{FetchError, GridResult};
use crate::fetch::{DataSource, RequestTracker};
use crate::paginator;
use crate::Component;
use bubbletea_rs::Cmd;
use bubbletea_widgets::help;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Remote loading state of a grid.
pub(super) struct Loader<R> {
    pub(super) source: Option<Arc<dyn DataSource<R>>>,
    pub(super) last_query: Option<String>,
    pub(super) requests: RequestTracker,
    pub(super) last_error: Option<FetchError>,
}

impl<R> Default for Loader<R> {
    fn default() -> Self {
        Self {
            source: None,
            last_query: None,
            requests: RequestTracker::default(),
            last_error: None,
        }
    }
}

/// A collapsible, filterable, sortable, paginated grid over rows of `R`.
///
/// # Data flow
///
/// Rows are held in source order and addressed by [`RowId`]. The rows shown
/// are derived in three steps: rows failing the [`Filters`] are dropped, the
/// rest are stably sorted by the active [`SortState`], and the paginator
/// slices out the current page. Expanded rows additionally render their
/// nested grids.
///
/// Per-row UI state (expansion and nested grids) is keyed by [`RowKey`]: the
/// row's stable id when it has one, its position otherwise. It survives
/// filtering, sorting and paging.
///
/// # Examples
///
/// ```
/// use patient_grid::config::GridConfig;
/// use patient_grid::grid::{Column, Model, Record};
///
/// #[derive(Clone)]
/// struct Visit {
///     ward: String,
///     days: u32,
/// }
///
/// impl Record for Visit {
///     fn columns() -> Vec<Column<Self>> {
///         vec![
///             Column::text("ward", "Ward", |v: &Visit| v.ward.as_str().into()),
///             Column::number("days", "Days", |v: &Visit| v.days.into()),
///         ]
///     }
/// }
///
/// let mut grid = Model::<Visit>::for_record(GridConfig::default()).unwrap();
/// grid.set_rows(vec![
///     Visit { ward: "Cardiology".into(), days: 4 },
///     Visit { ward: "Neurology".into(), days: 11 },
/// ]);
/// grid.set_range_filter("days", "10", "");
/// assert_eq!(grid.filtered_len(), 1);
/// assert_eq!(grid.page_rows()[0].ward, "Neurology");
/// ```
pub struct Model<R: Record> {
    pub(super) id: i64,
    pub(super) title: String,
    pub(super) rows: Vec<R>,
    pub(super) columns: ColumnModel<R>,
    pub(super) comparators: Registry,
    pub(super) filters: Filters,
    pub(super) sort: Option<SortState>,
    pub(super) expansion: ExpansionState,
    pub(super) paginator: paginator::Model,
    pub(super) nested_specs: Vec<NestedSpec<R>>,
    pub(super) nested: HashMap<RowKey, Vec<Box<dyn NestedView>>>,
    /// Filtered and sorted row ids, all pages.
    pub(super) view_ids: Vec<RowId>,
    /// Cursor position within the current page.
    pub(super) cursor: usize,
    /// Focused column, as a position among the visible columns.
    pub(super) focus: usize,
    pub(super) mode: Mode,
    pub(super) focused: bool,
    pub(super) show_filters: bool,
    pub(super) inputs: FilterInputs,
    pub(super) loader: Loader<R>,
    pub(super) config: GridConfig,

    pub styles: GridStyles,
    pub keymap: GridKeyMap,
    /// Renders the key help line from the grid's bindings.
    pub help: help::Model,
    /// Whether the key help line is rendered.
    pub show_help: bool,
}

impl<R: Record> Model<R> {
    /// Creates an empty grid over the given columns.
    ///
    /// Fails if two columns share a key or the configuration is invalid.
    pub fn new(columns: Vec<Column<R>>, config: GridConfig) -> GridResult<Self> {
        config.validate()?;
        let columns = ColumnModel::new(columns)?;
        let mut paginator = paginator::Model::from_config(&config);
        paginator.set_total_items(0);
        Ok(Self {
            id: next_id(),
            title: String::new(),
            rows: Vec::new(),
            columns,
            comparators: Registry::new(),
            filters: Filters::new(),
            sort: None,
            expansion: ExpansionState::new(),
            paginator,
            nested_specs: Vec::new(),
            nested: HashMap::new(),
            view_ids: Vec::new(),
            cursor: 0,
            focus: 0,
            mode: Mode::Browse,
            focused: true,
            show_filters: config.show_filters,
            inputs: FilterInputs::default(),
            loader: Loader::default(),
            config,
            styles: GridStyles::default(),
            keymap: GridKeyMap::default(),
            help: help::Model::new(),
            show_help: true,
        })
    }

    /// Creates an empty grid with `R`'s default columns and nested grids.
    pub fn for_record(config: GridConfig) -> GridResult<Self> {
        let mut grid = Self::new(R::columns(), config)?;
        grid.nested_specs = R::nested();
        Ok(grid)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_nested(mut self, specs: Vec<NestedSpec<R>>) -> Self {
        self.nested_specs = specs;
        self.rebuild_nested();
        self
    }

    pub fn with_source(mut self, source: Arc<dyn DataSource<R>>) -> Self {
        self.loader.source = Some(source);
        self
    }

    pub fn with_styles(mut self, styles: GridStyles) -> Self {
        self.styles = styles;
        self
    }

    /// Replaces the comparator of one column.
    pub fn with_comparator(mut self, key: impl Into<String>, compare: CompareFn) -> Self {
        self.register_comparator(key, compare);
        self
    }

    /// Unique id of this grid; tags the messages it exchanges.
    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn columns(&self) -> &ColumnModel<R> {
        &self.columns
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    pub fn paginator(&self) -> &paginator::Model {
        &self.paginator
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn filters_shown(&self) -> bool {
        self.show_filters
    }

    pub fn set_filters_shown(&mut self, shown: bool) {
        self.show_filters = shown;
    }

    /// The column the keyboard focus is on.
    pub fn focused_column(&self) -> Option<&Column<R>> {
        self.columns.visible_columns().get(self.focus).copied()
    }

    /// Recomputes the derived row view after a state change.
    pub(super) fn refresh(&mut self) {
        let mut ids = filter::apply(&self.rows, &self.columns, &self.filters);
        if let Some(state) = &self.sort {
            match self.columns.get(&state.key) {
                Some(column) if column.sortable => {
                    let comparator = self.comparators.resolve(column);
                    sort::sort_ids(&mut ids, &self.rows, column, comparator, state.direction);
                }
                _ => tracing::debug!(key = %state.key, "sort column unavailable, keeping source order"),
            }
        }
        self.view_ids = ids;
        self.paginator.set_total_items(self.view_ids.len());
        self.clamp_cursor();
    }

    pub(super) fn clamp_cursor(&mut self) {
        let on_page = self.page_ids().len();
        self.cursor = self.cursor.min(on_page.saturating_sub(1));
        let visible = self.columns.visible_columns().len();
        self.focus = self.focus.min(visible.saturating_sub(1));
    }

    pub(super) fn row_key(&self, id: RowId) -> Option<RowKey> {
        self.rows.get(id).map(|row| RowKey::for_row(id, row))
    }

    /// Builds the nested grids of an expanded row unless they already exist.
    pub(super) fn ensure_nested(&mut self, id: RowId) {
        let Some(row) = self.rows.get(id) else {
            return;
        };
        let key = RowKey::for_row(id, row);
        if self.nested_specs.is_empty() || self.nested.contains_key(&key) {
            return;
        }
        let mut views = Vec::with_capacity(self.nested_specs.len());
        for spec in &self.nested_specs {
            match spec.build(row, &self.config) {
                Ok(view) => views.push(view),
                Err(err) => {
                    tracing::warn!(grid = self.id, nested = spec.name(), error = %err, "failed to build nested grid")
                }
            }
        }
        self.nested.insert(key, views);
    }

    /// Drops all nested grids and rebuilds those of expanded rows from the
    /// current data.
    pub(super) fn rebuild_nested(&mut self) {
        self.nested.clear();
        let expanded: Vec<RowId> = (0..self.rows.len())
            .filter(|&id| {
                self.row_key(id)
                    .is_some_and(|key| self.expansion.is_expanded(&key))
            })
            .collect();
        for id in expanded {
            self.ensure_nested(id);
        }
    }
}

impl<R: Record> Component for Model<R> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    /// Blurring also leaves any open input or menu.
    fn blur(&mut self) {
        self.focused = false;
        self.stop_editing();
        self.columns.cancel_drag();
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
