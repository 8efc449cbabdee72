//! Row and cell value types.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cell's data.
///
/// Tables hold heterogeneous fields: plain text, currency amounts,
/// dates, enumerated statuses, percentages, tag lists, and nested
/// customer records. Missing fields read as `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Null,
    Text(String),
    Number(f64),
    Percent(f64),
    Date(NaiveDate),
    Status(String),
    Tags(Vec<String>),
    Customer { name: String, address: String },
}

impl CellValue {
    /// Whether this value counts as absent for sorting purposes.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Natural ordering between two values.
    ///
    /// Numbers and percents compare numerically, dates chronologically,
    /// everything else by case-insensitive display text. Null placement
    /// is the pipeline's concern, not handled here.
    pub fn compare(&self, other: &CellValue) -> Ordering {
        match (self, other) {
            (CellValue::Number(a), CellValue::Number(b))
            | (CellValue::Percent(a), CellValue::Percent(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (CellValue::Date(a), CellValue::Date(b)) => a.cmp(b),
            _ => self
                .display()
                .to_lowercase()
                .cmp(&other.display().to_lowercase()),
        }
    }

    /// Human-readable text for this value.
    ///
    /// Used by search, content measurement, and rendering.
    pub fn display(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Text(s) | CellValue::Status(s) => s.clone(),
            CellValue::Number(n) => format_currency(*n),
            CellValue::Percent(p) => format!("{}%", p.round() as i64),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Tags(tags) => tags.join(", "),
            CellValue::Customer { name, address } => format!("{name} — {address}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

/// Format a currency amount as `$1,234.56`.
fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${grouped}.{frac:02}")
    } else {
        format!("${grouped}.{frac:02}")
    }
}

/// One record in a table's dataset.
///
/// Rows have a stable identifier and an open set of named fields. They
/// are supplied externally; the engine does not own their lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    pub fields: HashMap<String, CellValue>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Get a field's value, `Null` if absent.
    pub fn get(&self, key: &str) -> &CellValue {
        self.fields.get(key).unwrap_or(&CellValue::Null)
    }

    /// Display text for a field.
    pub fn display(&self, key: &str) -> String {
        self.get(key).display()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_formatting() {
        assert_eq!(CellValue::Number(1234.5).display(), "$1,234.50");
        assert_eq!(CellValue::Number(0.0).display(), "$0.00");
        assert_eq!(CellValue::Number(-42.0).display(), "-$42.00");
        assert_eq!(CellValue::Number(1_000_000.0).display(), "$1,000,000.00");
    }

    #[test]
    fn test_missing_field_is_null() {
        let row = Row::new("1").field("name", "Amy");
        assert!(row.get("amount").is_null());
        assert_eq!(row.display("name"), "Amy");
    }

    #[test]
    fn test_numeric_compare_is_numeric_not_lexical() {
        let a = CellValue::Number(9.0);
        let b = CellValue::Number(10.0);
        assert_eq!(a.compare(&b), Ordering::Less);
    }
}
