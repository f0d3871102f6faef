//! Row sorting by a single field.
//!
//! # Design Decisions
//! - Ascending only, no secondary key; `sort_by` is stable so ties keep
//!   their upstream order
//! - Lexical order is ordinal (byte-wise UTF-8), not locale collation
//! - Numeric order converts values like JavaScript `Number()`
//! - Missing fields and non-numeric values sort after everything else

use std::borrow::Cow;
use std::cmp::Ordering;

use serde_json::Value;

use crate::sheet::model::Sheet;

/// Reorder `sheet.data` by `field`. No other part of the sheet changes.
pub fn sort_sheet<'a>(sheet: &'a mut Sheet, field: &str, numeric: bool) -> &'a mut Sheet {
    tracing::debug!(field, numeric, rows = sheet.data.len(), "Sorting rows");

    if numeric {
        sheet.data.sort_by(|a, b| {
            missing_last(numeric_value(a.get(field)), numeric_value(b.get(field)), |x, y| {
                x.partial_cmp(&y).unwrap_or(Ordering::Equal)
            })
        });
    } else {
        sheet.data.sort_by(|a, b| {
            missing_last(text_value(a.get(field)), text_value(b.get(field)), |x, y| x.cmp(&y))
        });
    }

    sheet
}

fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl FnOnce(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn text_value(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        other => Some(Cow::Owned(other.to_string())),
    }
}

/// Numeric view of a cell; `None` stands for "not a number".
fn numeric_value(value: Option<&Value>) -> Option<f64> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_number(s)?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => return None,
    };
    (!n.is_nan()).then_some(n)
}

fn parse_number(s: &str) -> Option<f64> {
    let t = s.trim();
    match t {
        "" => Some(0.0),
        "Infinity" | "+Infinity" => Some(f64::INFINITY),
        "-Infinity" => Some(f64::NEG_INFINITY),
        // Rust also accepts "inf" and "nan"; those are not numbers here
        _ if t.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => None,
        _ => t.parse().ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn people() -> Sheet {
        Sheet::from_value(json!({
            "data": [
                { "name": "Fred", "age": "010" },
                { "name": "Wilma", "age": "8" },
                { "name": "Barney", "age": "30" },
                { "name": "Betty", "age": "28" }
            ]
        }))
        .unwrap()
    }

    fn column<'a>(sheet: &'a Sheet, field: &str) -> Vec<&'a str> {
        sheet
            .data
            .iter()
            .map(|r| r.get(field).and_then(Value::as_str).unwrap_or("-"))
            .collect()
    }

    #[test]
    fn test_sort_by_name() {
        let mut sheet = people();
        sort_sheet(&mut sheet, "name", false);
        assert_eq!(column(&sheet, "name"), vec!["Barney", "Betty", "Fred", "Wilma"]);
    }

    #[test]
    fn test_numeric_sort() {
        let mut sheet = people();
        sort_sheet(&mut sheet, "age", true);
        assert_eq!(column(&sheet, "name"), vec!["Wilma", "Fred", "Betty", "Barney"]);
        assert_eq!(column(&sheet, "age"), vec!["8", "010", "28", "30"]);
    }

    #[test]
    fn test_lexical_sort_of_numbers() {
        let mut sheet = people();
        sort_sheet(&mut sheet, "age", false);
        assert_eq!(column(&sheet, "age"), vec!["010", "28", "30", "8"]);
    }

    #[test]
    fn test_lexical_sort_is_ordinal() {
        let mut sheet = Sheet::from_value(json!({
            "data": [{ "k": "b" }, { "k": "B" }, { "k": "a" }, { "k": "A" }]
        }))
        .unwrap();
        sort_sheet(&mut sheet, "k", false);
        assert_eq!(column(&sheet, "k"), vec!["A", "B", "a", "b"]);
    }

    #[test]
    fn test_missing_field_sorts_last() {
        let mut sheet = Sheet::from_value(json!({
            "data": [{ "id": "x" }, { "id": "y", "k": "b" }, { "id": "z", "k": "a" }]
        }))
        .unwrap();
        sort_sheet(&mut sheet, "k", false);
        assert_eq!(column(&sheet, "id"), vec!["z", "y", "x"]);

        sort_sheet(&mut sheet, "k", true);
        assert_eq!(column(&sheet, "id").last(), Some(&"x"));
    }

    #[test]
    fn test_non_numeric_sorts_last_and_keeps_order() {
        let mut sheet = Sheet::from_value(json!({
            "data": [
                { "id": "a", "n": "abc" },
                { "id": "b", "n": "3" },
                { "id": "c", "n": "nan" },
                { "id": "d", "n": 1 },
                { "id": "e", "n": "-2.5" }
            ]
        }))
        .unwrap();
        sort_sheet(&mut sheet, "n", true);
        assert_eq!(column(&sheet, "id"), vec!["e", "d", "b", "a", "c"]);
    }

    #[test]
    fn test_number_conversion() {
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number(""), Some(0.0));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12px"), None);
        assert_eq!(numeric_value(Some(&json!(true))), Some(1.0));
        assert_eq!(numeric_value(Some(&json!(null))), Some(0.0));
        assert_eq!(numeric_value(Some(&json!([1]))), None);
        assert_eq!(numeric_value(None), None);
    }

    #[test]
    fn test_sort_leaves_envelope_untouched() {
        let mut sheet = Sheet::from_value(json!({
            "data": [{ "k": "b" }, { "k": "a" }],
            "offset": 0, "limit": 2, "total": 2, ":type": "sheet"
        }))
        .unwrap();
        let before = sheet.clone();
        sort_sheet(&mut sheet, "k", false);
        assert_eq!(sheet.limit, before.limit);
        assert_eq!(sheet.total, before.total);
        assert_eq!(sheet.extra, before.extra);
    }
}
