use super::*;
use crate::config::GridConfig;
use crate::error::{FetchError, GridError};
use crate::fetch::{BoxFuture, DataSource, InvalidateMsg, RowsLoadedMsg};
use crate::value::CellValue;
use bubbletea_rs::{KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss::strip_ansi;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
struct Stay {
    id: String,
    ward: String,
    days: Option<f64>,
    admitted: String,
    codes: Vec<Code>,
}

#[derive(Debug, Clone, PartialEq)]
struct Code {
    code: String,
}

impl Record for Code {
    fn columns() -> Vec<Column<Self>> {
        vec![Column::text("code", "Code", |c: &Code| c.code.as_str().into())]
    }
}

fn codes_of(stay: &Stay) -> &[Code] {
    &stay.codes
}

impl Record for Stay {
    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::text("ward", "Ward", |s: &Stay| s.ward.as_str().into()).not_hidable(),
            Column::number("days", "Days", |s: &Stay| s.days.into()),
            Column::date("admitted", "Admitted", |s: &Stay| CellValue::date(&s.admitted)),
        ]
    }

    fn stable_id(&self) -> Option<String> {
        Some(self.id.clone())
    }

    fn nested() -> Vec<NestedSpec<Self>> {
        vec![NestedSpec::new("codes", "Diagnoses", codes_of)]
    }
}

fn stay(id: usize, ward: &str, days: f64) -> Stay {
    Stay {
        id: format!("s-{id}"),
        ward: ward.to_string(),
        days: Some(days),
        admitted: "01-03-2023".to_string(),
        codes: vec![Code {
            code: format!("I{id:02}"),
        }],
    }
}

fn stays(n: usize) -> Vec<Stay> {
    (0..n).map(|i| stay(i, "Cardiology", i as f64)).collect()
}

fn grid(rows: Vec<Stay>) -> Model<Stay> {
    let mut grid = Model::for_record(GridConfig::default()).unwrap();
    grid.set_rows(rows);
    grid
}

fn key(code: KeyCode) -> Msg {
    Box::new(KeyMsg {
        key: code,
        modifiers: KeyModifiers::NONE,
    })
}

fn wards(grid: &Model<Stay>) -> Vec<String> {
    grid.page_rows().iter().map(|s| s.ward.clone()).collect()
}

#[test]
fn test_duplicate_column_keys_fail_construction() {
    let mut columns = Stay::columns();
    columns.push(Column::text("ward", "Again", |s: &Stay| s.ward.as_str().into()));
    let err = Model::new(columns, GridConfig::default()).err().unwrap();
    assert!(matches!(err, GridError::DuplicateColumnKey(_)));
}

#[test]
fn test_pagination_of_25_rows() {
    let mut grid = grid(stays(25));
    assert_eq!(grid.page_size(), 12);
    assert_eq!(grid.page_count(), 3);
    assert_eq!(grid.page_ids().len(), 12);
    grid.next_page();
    grid.next_page();
    assert_eq!(grid.page(), 2);
    assert_eq!(grid.page_ids(), &[24]);
    grid.next_page();
    assert_eq!(grid.page(), 2);
    grid.first_page();
    grid.prev_page();
    assert_eq!(grid.page(), 0);
}

#[test]
fn test_page_size_change_resets_page() {
    let mut grid = grid(stays(60));
    grid.last_page();
    assert_eq!(grid.page(), 4);
    grid.set_page_size(24).unwrap();
    assert_eq!(grid.page(), 0);
    assert_eq!(grid.page_count(), 3);
    let err = grid.set_page_size(13).unwrap_err();
    assert!(matches!(err, GridError::InvalidPageSize { size: 13, .. }));
    assert_eq!(grid.page_size(), 24);
}

#[test]
fn test_filter_change_keeps_page_but_clamps_reads() {
    let mut grid = grid(stays(30));
    grid.last_page();
    assert_eq!(grid.page(), 2);
    grid.set_range_filter("days", "", "5");
    assert_eq!(grid.filtered_len(), 6);
    assert_eq!(grid.page(), 0);
    assert_eq!(grid.page_ids().len(), 6);
    grid.clear_filters();
    assert_eq!(grid.page(), 2);
}

#[test]
fn test_empty_grid_has_no_pages() {
    let grid = grid(Vec::new());
    assert_eq!(grid.page_count(), 0);
    assert!(grid.page_ids().is_empty());
    assert!(grid.selected_row().is_none());
    assert!(strip_ansi(&grid.view()).contains("No results."));
}

#[test]
fn test_numeric_min_filter() {
    let mut grid = grid(vec![
        stay(0, "A", 5.0),
        stay(1, "B", 15.0),
        stay(2, "C", 25.0),
    ]);
    assert!(grid.set_column_filter(
        "days",
        FilterValue::Range(NumericRange::new(Some(10.0), None))
    ));
    assert_eq!(wards(&grid), vec!["B", "C"]);
    assert_eq!(grid.range_input("days"), NumericRange::new(Some(10.0), None));
}

#[test]
fn test_unknown_column_filter_rejected() {
    let mut grid = grid(stays(3));
    assert!(!grid.set_column_filter("nope", FilterValue::Text("x".into())));
    assert!(!grid.set_range_filter("nope", "1", "2"));
    assert_eq!(grid.filtered_len(), 3);
}

#[test]
fn test_global_filter_ignores_case() {
    let mut rows = stays(3);
    rows[1].ward = "Dr. SMITH ward".into();
    let mut grid = grid(rows);
    grid.set_global_filter("smith");
    assert_eq!(grid.filtered_ids(), &[1]);
}

#[test]
fn test_global_filter_skips_hidden_columns() {
    let mut grid = grid(stays(12));
    grid.set_global_filter("11");
    assert_eq!(grid.filtered_ids(), &[11]);
    assert!(grid.set_column_visibility("days", false));
    assert_eq!(grid.filtered_len(), 0);
    assert!(grid.set_column_visibility("days", true));
    assert_eq!(grid.filtered_ids(), &[11]);
}

#[test]
fn test_hidden_column_filter_still_applies() {
    let mut grid = grid(stays(10));
    grid.set_range_filter("days", "8", "");
    grid.set_column_visibility("days", false);
    assert_eq!(grid.filtered_ids(), &[8, 9]);
}

#[test]
fn test_protected_column_cannot_be_hidden() {
    let mut grid = grid(stays(1));
    assert!(!grid.set_column_visibility("ward", false));
    assert!(grid.columns().is_visible("ward"));
}

#[test]
fn test_sort_cycle_through_header_clicks() {
    let mut grid = grid(vec![stay(0, "b", 1.0), stay(1, "c", 2.0), stay(2, "a", 3.0)]);
    assert!(grid.sort_by("ward"));
    assert_eq!(wards(&grid), vec!["a", "b", "c"]);
    assert!(grid.sort_by("ward"));
    assert_eq!(wards(&grid), vec!["c", "b", "a"]);
    assert!(grid.sort_by("ward"));
    assert!(grid.sort_state().is_none());
    assert_eq!(wards(&grid), vec!["b", "c", "a"]);
    assert!(!grid.sort_by("nope"));
}

#[test]
fn test_dates_sort_chronologically() {
    let mut rows = stays(3);
    rows[0].admitted = "02-01-2024".into();
    rows[1].admitted = "31-12-2023".into();
    rows[2].admitted = "15-06-2023".into();
    let mut grid = grid(rows);
    grid.sort_by("admitted");
    assert_eq!(grid.filtered_ids(), &[2, 1, 0]);
}

#[test]
fn test_custom_comparator() {
    fn by_length(a: &CellValue, b: &CellValue) -> std::cmp::Ordering {
        a.to_string().len().cmp(&b.to_string().len())
    }
    let mut grid = grid(vec![stay(0, "ccc", 1.0), stay(1, "a", 2.0), stay(2, "bb", 3.0)]);
    grid.register_comparator("ward", by_length);
    grid.set_sort("ward", SortDirection::Descending);
    assert_eq!(wards(&grid), vec!["ccc", "bb", "a"]);
}

#[test]
fn test_reorder_does_not_touch_rows() {
    let mut grid = grid(stays(5));
    let before: Vec<Stay> = grid.page_rows().into_iter().cloned().collect();
    assert!(grid.reorder_columns(0, 2));
    assert_eq!(grid.columns().order_keys(), vec!["days", "admitted", "ward"]);
    let after: Vec<Stay> = grid.page_rows().into_iter().cloned().collect();
    assert_eq!(before, after);
    assert!(!grid.reorder_columns(0, 3));
}

#[test]
fn test_drag_and_drop_header() {
    let mut grid = grid(stays(2));
    assert!(grid.drag_start(2));
    assert!(grid.drop_on(0));
    assert_eq!(grid.columns().order_keys(), vec!["admitted", "ward", "days"]);
}

#[test]
fn test_missing_days_sort_last_in_both_directions() {
    let mut rows = vec![stay(0, "A", 0.0), stay(1, "B", 0.0), stay(2, "C", 2.0)];
    rows[1].days = None;
    let mut grid = grid(rows);
    grid.set_sort("days", SortDirection::Descending);
    assert_eq!(grid.filtered_ids(), &[2, 0, 1]);
    grid.set_sort("days", SortDirection::Ascending);
    assert_eq!(grid.filtered_ids(), &[0, 2, 1]);
}

#[test]
fn test_expansion_survives_filtering() {
    let mut rows = stays(3);
    rows[0].ward = "Neurology".into();
    let mut grid = grid(rows);
    assert!(grid.toggle_row(0));
    assert!(grid.is_expanded(0));

    grid.set_column_filter("ward", FilterValue::Text("cardio".into()));
    assert!(!grid.filtered_ids().contains(&0));
    assert!(grid.is_expanded(0));
    assert!(!strip_ansi(&grid.view()).contains("I00"));

    grid.clear_column_filter("ward");
    assert!(grid.filtered_ids().contains(&0));
    assert!(grid.is_expanded(0));
    assert!(strip_ansi(&grid.view()).contains("I00"));
}

#[test]
fn test_expansion_follows_stable_id_after_reload() {
    let mut grid = grid(stays(3));
    grid.toggle_row(1);
    let mut reloaded = stays(3);
    reloaded.reverse();
    grid.set_rows(reloaded);
    assert!(grid.is_expanded(1));
    assert_eq!(grid.row(1).unwrap().id, "s-1");
    assert!(!grid.is_expanded(0));
}

#[test]
fn test_nested_grid_is_independent() {
    let mut rows = stays(2);
    rows[0].codes = vec![
        Code { code: "B".into() },
        Code { code: "A".into() },
    ];
    let mut grid = grid(rows);
    grid.toggle_row(0);
    let nested = grid.nested_mut(0, "codes").unwrap();
    assert_eq!(nested.len(), 2);
    assert!(nested.sort_by("code"));
    nested.set_global_filter("a");
    assert_eq!(nested.len(), 1);
    assert_eq!(grid.filtered_len(), 2);
    assert!(grid.filters().global().is_empty());
    assert!(grid.sort_state().is_none());
}

#[test]
fn test_nested_grid_without_rows_shows_placeholder() {
    let mut rows = stays(1);
    rows[0].codes.clear();
    let mut grid = grid(rows);
    grid.toggle_row(0);
    let view = strip_ansi(&grid.nested(0).unwrap()[0].view());
    assert!(view.contains("Diagnoses"));
    assert!(view.contains("No results."));
}

#[test]
fn test_nested_grid_has_no_paginator() {
    let mut rows = stays(1);
    rows[0].codes = (0..30).map(|i| Code { code: format!("C{i}") }).collect();
    let mut grid = grid(rows);
    grid.toggle_row(0);
    let view = strip_ansi(&grid.nested(0).unwrap()[0].view());
    assert!(view.contains("30 results"));
    assert!(view.contains("C29"));
    assert!(!view.contains("Rows per page"));
}

#[test]
fn test_help_line_follows_mode() {
    let mut grid = grid(stays(25));
    let view = strip_ansi(&grid.view());
    assert!(view.contains("/ search"));
    assert!(view.contains("next page"));
    grid.update(key(KeyCode::Char('/')));
    let view = strip_ansi(&grid.view());
    assert!(view.contains("esc close"));
    assert!(!view.contains("next page"));
}

#[test]
fn test_view_shows_header_arrow_and_footer() {
    let mut grid = grid(stays(25));
    grid.sort_by("days");
    let view = strip_ansi(&grid.view());
    assert!(view.contains("Ward"));
    assert!(view.contains("Days ▲"));
    assert!(view.contains("1/3"));
    assert!(view.contains("Rows per page: 12"));
    assert!(view.contains("25 results"));
}

#[test]
fn test_keys_drive_cursor_expand_and_paging() {
    let mut grid = grid(stays(25));
    grid.update(key(KeyCode::Down));
    assert_eq!(grid.selected_id(), Some(1));
    grid.update(key(KeyCode::Char(' ')));
    assert!(grid.is_expanded(1));
    grid.update(key(KeyCode::PageDown));
    assert_eq!(grid.page(), 1);
    assert_eq!(grid.selected_id(), Some(12));
}

#[test]
fn test_search_mode_types_into_global_filter() {
    let mut grid = grid(stays(20));
    grid.update(key(KeyCode::Char('/')));
    assert_eq!(grid.mode(), &Mode::Search);
    grid.update(key(KeyCode::Char('1')));
    grid.update(key(KeyCode::Char('9')));
    assert_eq!(grid.global_filter(), "19");
    assert_eq!(grid.filtered_ids(), &[19]);
    grid.update(key(KeyCode::Backspace));
    assert_eq!(grid.global_filter(), "1");
    grid.update(key(KeyCode::Enter));
    assert_eq!(grid.mode(), &Mode::Browse);
}

#[test]
fn test_search_input_edits_at_cursor() {
    let mut rows = stays(3);
    rows[1].ward = "Cardiology".into();
    rows[0].ward = "Neurology".into();
    rows[2].ward = "Neurology".into();
    let mut grid = grid(rows);
    grid.update(key(KeyCode::Char('/')));
    for c in ['c', 'r', 'd'] {
        grid.update(key(KeyCode::Char(c)));
    }
    grid.update(key(KeyCode::Left));
    grid.update(key(KeyCode::Left));
    grid.update(key(KeyCode::Char('a')));
    assert_eq!(grid.global_filter(), "card");
    assert_eq!(grid.filtered_ids(), &[1]);
    grid.update(key(KeyCode::Esc));
    assert!(!grid.inputs.global.focused());
}

#[test]
fn test_min_text_keeps_typed_max() {
    let mut grid = grid(stays(10));
    assert!(grid.set_range_filter("days", "", "5"));
    assert!(grid.set_column_filter_text("days", "2"));
    assert_eq!(grid.range_input("days"), NumericRange::new(Some(2.0), Some(5.0)));
    assert_eq!(grid.filtered_ids(), &[2, 3, 4, 5]);
}

#[test]
fn test_clearing_unknown_column_leaves_inputs_alone() {
    let mut grid = grid(stays(3));
    assert!(!grid.clear_column_filter("ghost"));
    assert!(grid.inputs.is_empty());
    grid.set_column_filter("ward", FilterValue::Text("card".into()));
    assert!(grid.clear_column_filter("ward"));
    assert!(grid.inputs.is_empty());
}

#[test]
fn test_range_filter_editing_with_keys() {
    let mut grid = grid(stays(20));
    grid.update(key(KeyCode::Right));
    grid.update(key(KeyCode::Char('e')));
    assert_eq!(
        grid.mode(),
        &Mode::EditFilter {
            key: "days".into(),
            field: FilterField::Min
        }
    );
    grid.update(key(KeyCode::Char('5')));
    grid.update(key(KeyCode::Tab));
    grid.update(key(KeyCode::Char('7')));
    assert_eq!(grid.filtered_ids(), &[5, 6, 7]);
    grid.update(key(KeyCode::Esc));
    assert_eq!(grid.mode(), &Mode::Browse);
    grid.update(key(KeyCode::Char('x')));
    assert_eq!(grid.filtered_len(), 20);
}

#[test]
fn test_column_menu_hides_columns() {
    let mut grid = grid(stays(2));
    grid.update(key(KeyCode::Char('c')));
    grid.update(key(KeyCode::Char(' ')));
    assert!(grid.columns().is_visible("ward"));
    grid.update(key(KeyCode::Down));
    grid.update(key(KeyCode::Char(' ')));
    assert!(!grid.columns().is_visible("days"));
    let view = strip_ansi(&grid.view());
    assert!(view.contains("[ ] Days"));
    grid.update(key(KeyCode::Esc));
    assert_eq!(grid.mode(), &Mode::Browse);
}

#[test]
fn test_move_column_with_keys() {
    let mut grid = grid(stays(2));
    grid.update(Box::new(KeyMsg {
        key: KeyCode::Char('>'),
        modifiers: KeyModifiers::SHIFT,
    }));
    assert_eq!(grid.columns().order_keys(), vec!["days", "ward", "admitted"]);
    assert_eq!(grid.focused_column().unwrap().key, "ward");
}

fn loaded(grid: &Model<Stay>, tag: u64, result: Result<Vec<Stay>, FetchError>) -> Msg {
    Box::new(RowsLoadedMsg {
        grid_id: grid.id(),
        tag,
        result,
    })
}

#[test]
fn test_stale_load_is_discarded() {
    let mut grid = grid(Vec::new());
    let source: Arc<dyn DataSource<Stay>> =
        Arc::new(|_: Option<String>| -> BoxFuture<Result<Vec<Stay>, FetchError>> {
            Box::pin(async { Ok(Vec::new()) })
        });
    grid = grid.with_source(source);
    let _first = grid.load(Some("a".into())).unwrap();
    let _second = grid.load(Some("b".into())).unwrap();
    assert!(grid.is_loading());

    grid.update(loaded(&grid, 2, Ok(vec![stay(0, "Second", 1.0)])));
    grid.update(loaded(&grid, 1, Ok(vec![stay(0, "First", 1.0)])));
    assert_eq!(wards(&grid), vec!["Second"]);
    assert!(!grid.is_loading());
}

#[test]
fn test_failed_load_keeps_rows() {
    let mut grid = grid(stays(3));
    let source: Arc<dyn DataSource<Stay>> =
        Arc::new(|_: Option<String>| -> BoxFuture<Result<Vec<Stay>, FetchError>> {
            Box::pin(async { Err(FetchError::Transport("offline".into())) })
        });
    grid = grid.with_source(source);
    let _cmd = grid.load(None);
    grid.update(loaded(&grid, 1, Err(FetchError::Transport("offline".into()))));
    assert_eq!(grid.rows().len(), 3);
    assert!(matches!(grid.last_error(), Some(FetchError::Transport(_))));
    assert!(strip_ansi(&grid.view()).contains("Could not load data."));
}

#[test]
fn test_load_for_another_grid_is_ignored() {
    let mut grid = grid(stays(1));
    grid.update(Box::new(RowsLoadedMsg::<Stay> {
        grid_id: grid.id() + 1000,
        tag: 1,
        result: Ok(Vec::new()),
    }));
    assert_eq!(grid.rows().len(), 1);
}

#[test]
fn test_load_without_source_is_none() {
    let mut grid = grid(Vec::new());
    assert!(grid.load(None).is_none());
}

#[tokio::test]
async fn test_invalidate_reruns_last_query() {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let seen = queries.clone();
    let source: Arc<dyn DataSource<Stay>> = Arc::new(
        move |query: Option<String>| -> BoxFuture<Result<Vec<Stay>, FetchError>> {
            seen.lock().unwrap().push(query.clone());
            Box::pin(async move { Ok(vec![stay(0, &query.unwrap_or_default(), 1.0)]) })
        },
    );
    let mut grid = grid(Vec::new()).with_source(source);

    let msg = grid.load(Some("patient-7".into())).unwrap().await.unwrap();
    grid.update(msg);
    assert_eq!(wards(&grid), vec!["patient-7"]);

    let reload = grid.update(Box::new(InvalidateMsg { grid_id: grid.id() })).unwrap();
    let msg = reload.await.unwrap();
    grid.update(msg);
    assert_eq!(
        queries.lock().unwrap().as_slice(),
        [Some("patient-7".to_string()), Some("patient-7".to_string())]
    );
    assert_eq!(grid.last_query(), Some("patient-7"));
}

#[test]
fn test_blurred_grid_ignores_keys() {
    use crate::Component;
    let mut grid = grid(stays(3));
    grid.blur();
    grid.update(key(KeyCode::Down));
    assert_eq!(grid.cursor(), 0);
    let _ = grid.focus();
    grid.update(key(KeyCode::Down));
    assert_eq!(grid.cursor(), 1);
}
