use super::optional_date;
use crate::grid::{Column, Record};
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

/// A case worker's to-do item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub patient_name: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub done: bool,
}

impl Record for Task {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("title", "Task", |t: &Task| t.title.as_str().into()).not_hidable(),
            Column::text("patientName", "Patient", |t: &Task| {
                t.patient_name.as_deref().into()
            }),
            Column::date("dueDate", "Due", |t: &Task| optional_date(&t.due_date)),
            Column::priority("priority", "Priority", |t: &Task| {
                CellValue::text(t.priority.to_string())
            }),
            Column::text("assignee", "Assignee", |t: &Task| t.assignee.as_deref().into()),
            Column::text("done", "Done", |t: &Task| CellValue::Bool(t.done)).not_filterable(),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}
