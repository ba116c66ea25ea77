//! Row traits and identities shared by the grid submodules.

use super::column::Column;
use super::nested::NestedSpec;

/// Position of a row in the grid's current source collection (before any
/// filtering or sorting).
pub type RowId = usize;

/// Trait for entity types that can be shown as grid rows.
///
/// Each entity kind declares its own columns with typed accessors, so a
/// column can only read fields its row type actually has.
///
/// # Examples
///
/// ```
/// use patient_grid::grid::{Column, Record};
///
/// #[derive(Clone)]
/// struct Allergy {
///     substance: String,
///     since: String,
/// }
///
/// impl Record for Allergy {
///     fn columns() -> Vec<Column<Self>> {
///         vec![
///             Column::text("substance", "Substance", |a: &Allergy| a.substance.as_str().into()),
///             Column::date("since", "Since", |a: &Allergy| patient_grid::CellValue::date(&a.since)),
///         ]
///     }
/// }
/// ```
pub trait Record: Clone + Send + Sync + 'static {
    /// The default column set for this entity kind.
    fn columns() -> Vec<Column<Self>>;

    /// An id that stays the same across reloads, if the entity has one.
    /// Expansion state is keyed by it when present.
    fn stable_id(&self) -> Option<String> {
        None
    }

    /// Sub-collections rendered as nested grids when a row is expanded.
    fn nested() -> Vec<NestedSpec<Self>> {
        Vec::new()
    }
}

/// The identity under which per-row UI state (expansion, nested grids) is
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Index(RowId),
    Stable(String),
}

impl RowKey {
    pub(crate) fn for_row<R: Record>(id: RowId, row: &R) -> Self {
        row.stable_id()
            .map(RowKey::Stable)
            .unwrap_or(RowKey::Index(id))
    }
}

impl From<RowId> for RowKey {
    fn from(id: RowId) -> Self {
        RowKey::Index(id)
    }
}

impl From<&str> for RowKey {
    fn from(id: &str) -> Self {
        RowKey::Stable(id.to_string())
    }
}

/// Which input of the filter row is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Text or date input.
    Value,
    Min,
    Max,
}

/// Interaction mode of a grid.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Moving between rows and columns.
    #[default]
    Browse,
    /// Typing into the global search box.
    Search,
    /// Typing into a column filter input.
    EditFilter { key: String, field: FilterField },
    /// The column visibility menu is open.
    ColumnMenu { cursor: usize },
}
