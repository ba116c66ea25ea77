//! Per-patient medical sub-records.

use super::{null_as_empty, optional_date};
use crate::grid::{Column, NestedSpec, Record};
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub name: String,
    #[serde(default)]
    pub active_ingredient: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub prescription_date: Option<String>,
    #[serde(default)]
    pub prescribed_by: Option<String>,
    #[serde(default)]
    pub packages: Option<u32>,
}

impl Record for Medication {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("name", "Medication", |m: &Medication| m.name.as_str().into())
                .not_hidable(),
            Column::text("activeIngredient", "Ingredient", |m: &Medication| {
                m.active_ingredient.as_deref().into()
            }),
            Column::text("dosage", "Dosage", |m: &Medication| m.dosage.as_deref().into()),
            Column::date("prescriptionDate", "Prescribed", |m: &Medication| {
                optional_date(&m.prescription_date)
            }),
            Column::text("prescribedBy", "Prescriber", |m: &Medication| {
                m.prescribed_by.as_deref().into()
            }),
            Column::number("packages", "Packages", |m: &Medication| m.packages.into()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnosis {
    pub icd_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Record for Diagnosis {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("icdCode", "ICD-10", |d: &Diagnosis| d.icd_code.as_str().into()),
            Column::text("description", "Diagnosis", |d: &Diagnosis| {
                d.description.as_deref().into()
            }),
            Column::date("date", "Date", |d: &Diagnosis| optional_date(&d.date)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingItem {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Record for BillingItem {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("code", "Code", |b: &BillingItem| b.code.as_str().into()),
            Column::text("description", "Item", |b: &BillingItem| {
                b.description.as_deref().into()
            }),
            Column::number("amount", "Amount", |b: &BillingItem| b.amount.into()),
            Column::date("date", "Date", |b: &BillingItem| optional_date(&b.date)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub ops_code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl Record for Procedure {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("opsCode", "OPS", |p: &Procedure| p.ops_code.as_str().into()),
            Column::text("description", "Procedure", |p: &Procedure| {
                p.description.as_deref().into()
            }),
            Column::date("date", "Date", |p: &Procedure| optional_date(&p.date)),
        ]
    }
}

/// An inpatient hospital stay with its coded diagnoses, billed items and
/// performed procedures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HospitalStay {
    pub id: String,
    pub hospital: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub admission_date: Option<String>,
    #[serde(default)]
    pub discharge_date: Option<String>,
    #[serde(default)]
    pub length_of_stay: Option<u32>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub diagnosis: Vec<Diagnosis>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub billing: Vec<BillingItem>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub procedures: Vec<Procedure>,
}

fn stay_diagnoses(stay: &HospitalStay) -> &[Diagnosis] {
    &stay.diagnosis
}

fn stay_billing(stay: &HospitalStay) -> &[BillingItem] {
    &stay.billing
}

fn stay_procedures(stay: &HospitalStay) -> &[Procedure] {
    &stay.procedures
}

impl Record for HospitalStay {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("hospital", "Hospital", |s: &HospitalStay| {
                s.hospital.as_str().into()
            })
            .not_hidable(),
            Column::text("department", "Department", |s: &HospitalStay| {
                s.department.as_deref().into()
            }),
            Column::date("admissionDate", "Admitted", |s: &HospitalStay| {
                optional_date(&s.admission_date)
            }),
            Column::date("dischargeDate", "Discharged", |s: &HospitalStay| {
                optional_date(&s.discharge_date)
            }),
            Column::number("lengthOfStay", "Days", |s: &HospitalStay| {
                s.length_of_stay.into()
            }),
            Column::number("totalCost", "Cost", |s: &HospitalStay| s.total_cost.into()),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn nested() -> Vec<NestedSpec<Self>> {
        vec![
            NestedSpec::new("diagnosis", "Diagnoses", stay_diagnoses),
            NestedSpec::new("billing", "Billing", stay_billing),
            NestedSpec::new("procedures", "Procedures", stay_procedures),
        ]
    }
}

/// A certified period of inability to work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkIncapacity {
    pub id: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub icd_code: Option<String>,
    #[serde(default)]
    pub certified_by: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default)]
    pub days: Option<u32>,
}

impl Record for WorkIncapacity {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::date("startDate", "From", |w: &WorkIncapacity| {
                optional_date(&w.start_date)
            })
            .not_hidable(),
            Column::date("endDate", "Until", |w: &WorkIncapacity| {
                optional_date(&w.end_date)
            }),
            Column::number("days", "Days", |w: &WorkIncapacity| w.days.into()),
            Column::text("icdCode", "ICD-10", |w: &WorkIncapacity| {
                w.icd_code.as_deref().into()
            }),
            Column::text("certifiedBy", "Physician", |w: &WorkIncapacity| {
                w.certified_by.as_deref().into()
            }),
            Column::text("employer", "Employer", |w: &WorkIncapacity| {
                w.employer.as_deref().into()
            }),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

/// A rehabilitation measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rehab {
    pub id: String,
    pub clinic: String,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub approved: bool,
}

impl Record for Rehab {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("clinic", "Clinic", |r: &Rehab| r.clinic.as_str().into()).not_hidable(),
            Column::text("kind", "Type", |r: &Rehab| r.kind.as_deref().into()),
            Column::date("startDate", "From", |r: &Rehab| optional_date(&r.start_date)),
            Column::date("endDate", "Until", |r: &Rehab| optional_date(&r.end_date)),
            Column::number("cost", "Cost", |r: &Rehab| r.cost.into()),
            Column::text("approved", "Approved", |r: &Rehab| CellValue::Bool(r.approved))
                .not_filterable(),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

/// A free-text case note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Documentation {
    pub id: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub text: String,
}

impl Record for Documentation {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::date("date", "Date", |d: &Documentation| optional_date(&d.date)),
            Column::text("author", "Author", |d: &Documentation| d.author.as_deref().into()),
            Column::text("category", "Category", |d: &Documentation| {
                d.category.as_deref().into()
            }),
            Column::text("text", "Note", |d: &Documentation| d.text.as_str().into())
                .not_hidable()
                .with_width(48),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}
