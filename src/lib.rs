//! # patient-grid
//!
//! Collapsible, filterable, sortable, paginated data grids for the terminal
//! screens of a patient-records dashboard, built on
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! ## Overview
//!
//! The dashboard shows every collection it handles (insured persons, tasks,
//! medications, hospital stays, work incapacities, rehab measures, case
//! notes) in the same grid component. A grid is a [`grid::Model`] over a row
//! type implementing [`grid::Record`]; it follows the Elm architecture with
//! `update()` and `view()` and never fetches or persists data on its own.
//!
//! ## Features
//!
//! - **Filtering**: per-column text, numeric range and exact date filters plus
//!   a case-insensitive global search
//! - **Sorting**: one column at a time, with date-aware and priority-aware
//!   comparators
//! - **Pagination** with a configurable page-size selector
//! - **Columns** that can be hidden and reordered without touching row data
//! - **Expandable rows** showing nested grids for sub-collections
//! - **Loading** through an async [`fetch::DataSource`] where only the latest
//!   request's result is applied
//!
//! ## Usage
//!
//! ```rust
//! use patient_grid::prelude::*;
//!
//! let mut grid = Model::<Task>::for_record(GridConfig::default()).unwrap();
//! grid.set_rows(vec![Task {
//!     id: "t-1".into(),
//!     title: "Call insurer".into(),
//!     patient_name: Some("Anna Smith".into()),
//!     due_date: Some("02-01-2024".into()),
//!     priority: Priority::High,
//!     assignee: None,
//!     done: false,
//! }]);
//! grid.set_global_filter("smith");
//! assert_eq!(grid.filtered_len(), 1);
//! println!("{}", grid.view());
//! ```
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use patient_grid::prelude::*;
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//!
//! struct App {
//!     people: Model<InsuredPerson>,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let people = Model::for_record(GridConfig::default())
//!             .expect("insured person columns are valid")
//!             .with_title("Insured persons");
//!         (Self { people }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.people.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.people.view()
//!     }
//! }
//! ```
//!
//! ## Focus
//!
//! A dashboard screen shows several grids at once; only the focused one
//! reacts to keys. Data messages are handled regardless of focus.
//!
//! ```rust
//! use patient_grid::prelude::*;
//!
//! let mut grid = Model::<Medication>::for_record(GridConfig::default()).unwrap();
//! assert!(grid.focused());
//! grid.blur();
//! assert!(!grid.focused());
//! let _cmd = grid.focus();
//! assert!(grid.focused());
//! ```
//!
//! ## Logging
//!
//! The crate logs through [`tracing`]; rejected interactions are reported at
//! `debug`, failed loads and mutations at `warn`. Install a subscriber in the
//! application to see them.

pub mod config;
pub mod error;
pub mod fetch;
pub mod grid;
pub mod paginator;
pub mod records;
pub mod value;

pub use error::{FetchError, GridError, GridResult};
pub use value::CellValue;

/// Components that take keyboard focus; grids implement it.
pub use bubbletea_widgets::Component;

/// Commonly used types, re-exported for glob import.
pub mod prelude {
    pub use bubbletea_widgets::key::{Binding, KeyMap};

    pub use crate::config::{GridConfig, Messages};
    pub use crate::error::{FetchError, GridError, GridResult};
    pub use crate::fetch::{
        BoxFuture, DataSource, InvalidateMsg, JsonDataSource, Mutation, RecordMutator,
        RowsLoadedMsg,
    };
    pub use crate::grid::{
        Column, ColumnKind, FilterValue, GridKeyMap, GridStyles, Model, NestedSpec, NestedView,
        NumericRange, Record, RowId, SortDirection,
    };
    pub use crate::records::*;
    pub use crate::value::CellValue;
    pub use crate::Component;
}
