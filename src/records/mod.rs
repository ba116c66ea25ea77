//! Entity rows of the patient-records dashboard.
//!
//! Each type mirrors one backend collection, deserializes from its camelCase
//! JSON and implements [`Record`](crate::grid::Record) with the columns the
//! dashboard shows by default. Collections the backend may send as `null`
//! decode to an empty list.

mod medical;
mod person;
mod task;

pub use medical::{
    BillingItem, Diagnosis, Documentation, HospitalStay, Medication, Procedure, Rehab,
    WorkIncapacity,
};
pub use person::InsuredPerson;
pub use task::{Priority, Task};

use crate::value::CellValue;
use serde::{Deserialize, Deserializer};

/// Deserializes a list that may be `null`.
pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A date cell for an optional date field.
pub(crate) fn optional_date(raw: &Option<String>) -> CellValue {
    raw.as_deref().map_or(CellValue::Missing, |d| CellValue::date(d))
}
