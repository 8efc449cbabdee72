//! Pure filter/sort derivation of display rows.
//!
//! Given `(rows, filter, sort)` the pipeline produces the ordered row
//! sequence handed to the renderer. There is no pagination; the full
//! result is recomputed synchronously on every state change.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::row::{CellValue, Row};

/// Field keys the domain facets test against.
pub const FIELD_CUSTOMER_TYPE: &str = "customer_type";
pub const FIELD_STATE: &str = "state";
pub const FIELD_PORTAL: &str = "portal";
pub const FIELD_TAGS: &str = "tags";

/// Inclusive date bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

/// Named date presets, resolved to concrete bounds at selection time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePreset {
    Today,
    ThisWeek,
    ThisMonth,
    ThisQuarter,
    ThisYear,
}

impl DatePreset {
    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::ThisWeek => "This week",
            DatePreset::ThisMonth => "This month",
            DatePreset::ThisQuarter => "This quarter",
            DatePreset::ThisYear => "This year",
        }
    }

    /// Resolve against a concrete "today".
    ///
    /// Weeks run Monday through Sunday.
    pub fn resolve(self, today: NaiveDate) -> DateRange {
        match self {
            DatePreset::Today => DateRange {
                from: today,
                to: today,
            },
            DatePreset::ThisWeek => {
                let week = today.week(Weekday::Mon);
                DateRange {
                    from: week.first_day(),
                    to: week.last_day(),
                }
            }
            DatePreset::ThisMonth => DateRange {
                from: first_of_month(today.year(), today.month()),
                to: last_of_month(today.year(), today.month()),
            },
            DatePreset::ThisQuarter => {
                let start_month = ((today.month() - 1) / 3) * 3 + 1;
                DateRange {
                    from: first_of_month(today.year(), start_month),
                    to: last_of_month(today.year(), start_month + 2),
                }
            }
            DatePreset::ThisYear => DateRange {
                from: first_of_month(today.year(), 1),
                to: last_of_month(today.year(), 12),
            },
        }
    }
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    // Month is always 1..=12 here.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or_default()
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    first_of_month(next_year, next_month).pred_opt().unwrap_or_default()
}

/// Active date filter: which field, and what bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFilter {
    pub field: String,
    pub range: DateRange,
}

/// Transient page-level filter state.
///
/// Free-text search plus domain facets. Facets compose with logical AND
/// across dimensions and logical OR within one multi-select dimension.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    /// Case-insensitive substring search term.
    pub search: String,
    /// Fields the search term is matched against.
    pub search_fields: Vec<String>,
    pub customer_types: HashSet<String>,
    pub states: HashSet<String>,
    pub portals: HashSet<String>,
    pub tags: HashSet<String>,
    pub date: Option<DateFilter>,
}

impl FilterState {
    pub fn new(search_fields: Vec<String>) -> Self {
        Self {
            search_fields,
            ..Self::default()
        }
    }

    /// True when no criterion is active (the identity filter).
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.customer_types.is_empty()
            && self.states.is_empty()
            && self.portals.is_empty()
            && self.tags.is_empty()
            && self.date.is_none()
    }

    /// Clear every criterion, keeping the configured search fields.
    pub fn clear(&mut self) {
        let fields = std::mem::take(&mut self.search_fields);
        *self = Self::new(fields);
    }

    fn matches(&self, row: &Row) -> bool {
        self.matches_search(row)
            && facet_matches(&self.customer_types, row.get(FIELD_CUSTOMER_TYPE))
            && facet_matches(&self.states, row.get(FIELD_STATE))
            && facet_matches(&self.portals, row.get(FIELD_PORTAL))
            && tags_match(&self.tags, row.get(FIELD_TAGS))
            && self.matches_date(row)
    }

    fn matches_search(&self, row: &Row) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let term = self.search.to_lowercase();
        self.search_fields
            .iter()
            .any(|field| row.display(field).to_lowercase().contains(&term))
    }

    fn matches_date(&self, row: &Row) -> bool {
        let Some(filter) = &self.date else { return true };
        match row.get(&filter.field) {
            CellValue::Date(d) => filter.range.contains(*d),
            _ => false,
        }
    }
}

/// A facet with no chosen values is inactive and accepts every row.
fn facet_matches(chosen: &HashSet<String>, value: &CellValue) -> bool {
    chosen.is_empty() || chosen.contains(&value.display())
}

/// The tag facet matches when the row's tag list intersects the selection.
fn tags_match(chosen: &HashSet<String>, value: &CellValue) -> bool {
    if chosen.is_empty() {
        return true;
    }
    match value {
        CellValue::Tags(tags) => tags.iter().any(|t| chosen.contains(t)),
        _ => false,
    }
}

/// Single active sort. Toggling the same key flips direction; selecting
/// a new key resets to ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<String>,
    pub ascending: bool,
}

impl SortState {
    pub fn toggle(&mut self, key: &str) {
        match &self.key {
            Some(current) if current == key => self.ascending = !self.ascending,
            _ => {
                self.key = Some(key.to_string());
                self.ascending = true;
            }
        }
    }

    pub fn clear(&mut self) {
        self.key = None;
        self.ascending = false;
    }
}

/// Derive the ordered display rows from a dataset.
///
/// Filtering applies first, then a stable sort on the selected field's
/// natural ordering. `Null` and missing values sort to the end
/// regardless of direction; ties keep their prior relative order.
pub fn apply(rows: &[Row], filter: &FilterState, sort: &SortState) -> Vec<Row> {
    let mut result: Vec<Row> = rows.iter().filter(|r| filter.matches(r)).cloned().collect();

    if let Some(key) = &sort.key {
        result.sort_by(|a, b| {
            let va = a.get(key);
            let vb = b.get(key);
            match (va.is_null(), vb.is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ord = va.compare(vb);
                    if sort.ascending { ord } else { ord.reverse() }
                }
            }
        });
    }

    result
}
