use super::optional_date;
use crate::grid::{Column, Record};
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

/// A person insured with the fund; the dashboard's top-level search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuredPerson {
    pub id: String,
    pub insurance_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub insured_since: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Record for InsuredPerson {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("insuranceNumber", "Insurance no.", |p: &InsuredPerson| {
                p.insurance_number.as_str().into()
            })
            .not_hidable(),
            Column::text("lastName", "Last name", |p: &InsuredPerson| {
                p.last_name.as_str().into()
            })
            .not_hidable(),
            Column::text("firstName", "First name", |p: &InsuredPerson| {
                p.first_name.as_str().into()
            }),
            Column::date("birthDate", "Born", |p: &InsuredPerson| {
                optional_date(&p.birth_date)
            }),
            Column::text("gender", "Gender", |p: &InsuredPerson| {
                p.gender.as_deref().into()
            }),
            Column::text("city", "City", |p: &InsuredPerson| p.city.as_deref().into()),
            Column::date("insuredSince", "Insured since", |p: &InsuredPerson| {
                optional_date(&p.insured_since)
            }),
            Column::text("active", "Active", |p: &InsuredPerson| {
                CellValue::Bool(p.active)
            })
            .not_filterable(),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::grid::Model;

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let json = r#"[
            {"id": "p-1", "insuranceNumber": "A123456789", "firstName": "Anna", "lastName": "Smith",
             "birthDate": "14-03-1961", "active": true},
            {"id": "p-2", "insuranceNumber": "B987654321", "firstName": "Ben", "lastName": "Jones",
             "city": null}
        ]"#;
        let people: Vec<InsuredPerson> = serde_json::from_str(json).unwrap();
        assert_eq!(people.len(), 2);
        assert_eq!(people[1].birth_date, None);
        assert!(!people[1].active);
    }

    #[test]
    fn test_search_by_name() {
        let json = r#"[
            {"id": "p-1", "insuranceNumber": "A1", "firstName": "Anna", "lastName": "Smith"},
            {"id": "p-2", "insuranceNumber": "B2", "firstName": "Ben", "lastName": "Jones"}
        ]"#;
        let mut grid = Model::<InsuredPerson>::for_record(GridConfig::default()).unwrap();
        grid.set_rows(serde_json::from_str(json).unwrap());
        grid.set_global_filter("SMI");
        assert_eq!(grid.page_rows()[0].id, "p-1");
        assert_eq!(grid.filtered_len(), 1);
    }
}
