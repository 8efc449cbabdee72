//! Filter/sort pipeline behavior.

use chrono::NaiveDate;
use sungrid::pipeline::{
    self, DateFilter, DatePreset, FilterState, SortState, FIELD_CUSTOMER_TYPE, FIELD_STATE,
    FIELD_TAGS,
};
use sungrid::row::{CellValue, Row};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_rows() -> Vec<Row> {
    vec![
        Row::new("1")
            .field("name", "Cid")
            .field("detail", "Solar Install")
            .field(FIELD_CUSTOMER_TYPE, "Residential")
            .field(FIELD_STATE, "CA")
            .field(FIELD_TAGS, CellValue::Tags(vec!["rush".into()]))
            .field("cost", 30_000.0)
            .field("install_date", date(2024, 5, 14)),
        Row::new("2")
            .field("name", "Bob")
            .field("detail", "Roof Repair")
            .field(FIELD_CUSTOMER_TYPE, "Commercial")
            .field(FIELD_STATE, "CA")
            .field(FIELD_TAGS, CellValue::Tags(vec!["warranty".into()]))
            .field("cost", 12_000.0)
            .field("install_date", date(2024, 4, 2)),
        Row::new("3")
            .field("name", "Amy")
            .field("detail", "PV+Battery")
            .field(FIELD_CUSTOMER_TYPE, "Residential")
            .field(FIELD_STATE, "TX")
            .field(
                FIELD_TAGS,
                CellValue::Tags(vec!["rush".into(), "referral".into()]),
            )
            .field("install_date", date(2024, 5, 20)),
    ]
}

fn search_fields() -> Vec<String> {
    vec!["name".to_string(), "detail".to_string()]
}

#[test]
fn test_identity_filter_keeps_source_order() {
    let rows = sample_rows();
    let filter = FilterState::new(search_fields());
    assert!(filter.is_empty());

    let out = pipeline::apply(&rows, &filter, &SortState::default());
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn test_search_is_case_insensitive_across_fields() {
    let rows = sample_rows();
    let mut filter = FilterState::new(search_fields());
    filter.search = "soLAr".to_string();

    let out = pipeline::apply(&rows, &filter, &SortState::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "1");
}

#[test]
fn test_sort_by_name_both_directions() {
    let rows = sample_rows();
    let filter = FilterState::new(search_fields());
    let mut sort = SortState::default();

    sort.toggle("name");
    let out = pipeline::apply(&rows, &filter, &sort);
    let names: Vec<String> = out.iter().map(|r| r.display("name")).collect();
    assert_eq!(names, ["Amy", "Bob", "Cid"]);

    sort.toggle("name");
    let out = pipeline::apply(&rows, &filter, &sort);
    let names: Vec<String> = out.iter().map(|r| r.display("name")).collect();
    assert_eq!(names, ["Cid", "Bob", "Amy"]);
}

#[test]
fn test_missing_values_sort_last_regardless_of_direction() {
    // Row 3 has no cost.
    let rows = sample_rows();
    let filter = FilterState::new(search_fields());
    let mut sort = SortState::default();

    sort.toggle("cost");
    let out = pipeline::apply(&rows, &filter, &sort);
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["2", "1", "3"]);

    sort.toggle("cost");
    let out = pipeline::apply(&rows, &filter, &sort);
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn test_amount_sort_places_null_after_largest() {
    let rows = vec![
        Row::new("bob").field("name", "Bob").field("amount", 50.0),
        Row::new("amy").field("name", "Amy"),
        Row::new("cid").field("name", "Cid").field("amount", 10.0),
    ];
    let filter = FilterState::new(Vec::new());
    let mut sort = SortState::default();
    sort.toggle("amount");

    let out = pipeline::apply(&rows, &filter, &sort);
    let names: Vec<String> = out.iter().map(|r| r.display("name")).collect();
    assert_eq!(names, ["Cid", "Bob", "Amy"]);
}

#[test]
fn test_sort_is_stable_for_ties() {
    let rows = vec![
        Row::new("a").field("state", "CA").field("n", 1.0),
        Row::new("b").field("state", "CA").field("n", 2.0),
        Row::new("c").field("state", "CA").field("n", 3.0),
    ];
    let filter = FilterState::new(Vec::new());
    let mut sort = SortState::default();
    sort.toggle("state");

    let out = pipeline::apply(&rows, &filter, &sort);
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
}

#[test]
fn test_facets_and_across_dimensions_or_within() {
    let rows = sample_rows();
    let mut filter = FilterState::new(search_fields());

    // Two states selected: OR within the dimension.
    filter.states.insert("CA".to_string());
    filter.states.insert("TX".to_string());
    assert_eq!(pipeline::apply(&rows, &filter, &SortState::default()).len(), 3);

    // Adding a customer type: AND across dimensions.
    filter.customer_types.insert("Residential".to_string());
    let out = pipeline::apply(&rows, &filter, &SortState::default());
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn test_tag_facet_matches_on_intersection() {
    let rows = sample_rows();
    let mut filter = FilterState::new(search_fields());
    filter.tags.insert("referral".to_string());

    let out = pipeline::apply(&rows, &filter, &SortState::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].id, "3");
}

#[test]
fn test_date_filter_bounds_are_inclusive() {
    let rows = sample_rows();
    let mut filter = FilterState::new(search_fields());
    filter.date = Some(DateFilter {
        field: "install_date".to_string(),
        range: DatePreset::ThisMonth.resolve(date(2024, 5, 15)),
    });

    let out = pipeline::apply(&rows, &filter, &SortState::default());
    let ids: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["1", "3"]);
}

#[test]
fn test_date_presets_resolve_to_expected_bounds() {
    // 2024-05-15 is a Wednesday.
    let today = date(2024, 5, 15);

    let range = DatePreset::Today.resolve(today);
    assert_eq!((range.from, range.to), (today, today));

    let range = DatePreset::ThisWeek.resolve(today);
    assert_eq!((range.from, range.to), (date(2024, 5, 13), date(2024, 5, 19)));

    let range = DatePreset::ThisMonth.resolve(today);
    assert_eq!((range.from, range.to), (date(2024, 5, 1), date(2024, 5, 31)));

    let range = DatePreset::ThisQuarter.resolve(today);
    assert_eq!((range.from, range.to), (date(2024, 4, 1), date(2024, 6, 30)));

    let range = DatePreset::ThisYear.resolve(today);
    assert_eq!((range.from, range.to), (date(2024, 1, 1), date(2024, 12, 31)));
}

#[test]
fn test_december_preset_crosses_year_boundary() {
    let range = DatePreset::ThisMonth.resolve(date(2024, 12, 10));
    assert_eq!((range.from, range.to), (date(2024, 12, 1), date(2024, 12, 31)));
}

#[test]
fn test_clear_keeps_search_fields() {
    let mut filter = FilterState::new(search_fields());
    filter.search = "amy".to_string();
    filter.states.insert("CA".to_string());

    filter.clear();
    assert!(filter.is_empty());
    assert_eq!(filter.search_fields, search_fields());
}

#[test]
fn test_sort_toggle_new_key_resets_to_ascending() {
    let mut sort = SortState::default();
    sort.toggle("name");
    sort.toggle("name");
    assert!(!sort.ascending);

    sort.toggle("cost");
    assert_eq!(sort.key.as_deref(), Some("cost"));
    assert!(sort.ascending);
}
