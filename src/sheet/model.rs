//! Sheet data model.
//!
//! A sheet is the JSON envelope `{columns, data, offset, limit, total}`
//! plus whatever other metadata the upstream adds (e.g. `:type`).

use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{QueryError, QueryResult};

/// A single row: field name to opaque value.
pub type Row = Map<String, Value>;

/// Tabular sheet document as served by the upstream.
///
/// Serializes with the top-level keys in the order the upstream sent them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Sheet {
    /// Column names, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,

    /// Row collection.
    pub data: Vec<Row>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,

    /// Any other top-level field, passed through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,

    #[serde(skip)]
    key_order: Vec<String>,
}

impl Sheet {
    /// Interpret an upstream document as a sheet.
    ///
    /// A document without a `data` array cannot be transformed and is
    /// reported as an internal error.
    pub fn from_value(value: Value) -> QueryResult<Self> {
        let key_order = match &value {
            Value::Object(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };
        let mut sheet: Sheet = serde_json::from_value(value)
            .map_err(|e| QueryError::Internal(format!("Upstream document is not a sheet: {}", e)))?;
        sheet.key_order = key_order;
        Ok(sheet)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Serialize for Sheet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let envelope = ["columns", "data", "offset", "limit", "total"];

        // Upstream order first, then anything the upstream did not send.
        let known = self.key_order.iter().map(String::as_str);
        let rest = envelope
            .into_iter()
            .chain(self.extra.keys().map(String::as_str))
            .filter(|key| !self.key_order.iter().any(|k| k.as_str() == *key));

        for key in known.chain(rest) {
            match key {
                "columns" => {
                    if let Some(columns) = &self.columns {
                        map.serialize_entry(key, columns)?;
                    }
                }
                "data" => map.serialize_entry(key, &self.data)?,
                "offset" | "limit" | "total" => {
                    let field = match key {
                        "offset" => self.offset,
                        "limit" => self.limit,
                        _ => self.total,
                    };
                    if let Some(n) = field {
                        map.serialize_entry(key, &n)?;
                    }
                }
                _ => {
                    if let Some(value) = self.extra.get(key) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }
        map.end()
    }
}

/// One filter clause: every listed field must equal the given value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Clause(pub Map<String, Value>);

impl Clause {
    /// AND across fields. Comparison is exact: `"1"` never equals `1`.
    pub fn matches(&self, row: &Row) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| row.get(field) == Some(expected))
    }
}

/// A list of clauses combined with OR.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FilterSpec(pub Vec<Clause>);

impl FilterSpec {
    pub fn matches(&self, row: &Row) -> bool {
        self.0.iter().any(|clause| clause.matches(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        match value {
            Value::Object(map) => map,
            _ => panic!("row fixture must be an object"),
        }
    }

    #[test]
    fn test_sheet_roundtrip_keeps_metadata() {
        let doc = json!({
            ":type": "sheet",
            "columns": ["path", "title"],
            "data": [{ "path": "/a", "title": "A" }],
            "offset": 0,
            "limit": 1,
            "total": 1
        });
        let sheet = Sheet::from_value(doc.clone()).unwrap();
        assert_eq!(sheet.extra.get(":type"), Some(&json!("sheet")));
        assert_eq!(sheet.len(), 1);
        assert_eq!(serde_json::to_value(&sheet).unwrap(), doc);
    }

    #[test]
    fn test_missing_envelope_fields_are_not_invented() {
        let doc = json!({ "data": [] });
        let sheet = Sheet::from_value(doc.clone()).unwrap();
        assert!(sheet.is_empty());
        assert_eq!(serde_json::to_value(&sheet).unwrap(), doc);
    }

    #[test]
    fn test_row_key_order_is_kept() {
        let raw = r#"{"data":[{"title":"T","path":"/a"}],"offset":0,"limit":1,"total":1,":type":"sheet"}"#;
        let sheet = Sheet::from_value(serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(serde_json::to_string(&sheet.data[0]).unwrap(), r#"{"title":"T","path":"/a"}"#);
        assert_eq!(serde_json::to_string(&sheet).unwrap(), raw);
    }

    #[test]
    fn test_upstream_envelope_order_is_kept() {
        let raw = r#"{"total":2,"offset":0,"limit":2,"data":[{"b":1,"a":2}],":type":"sheet","columns":["b","a"]}"#;
        let mut sheet = Sheet::from_value(serde_json::from_str(raw).unwrap()).unwrap();
        assert_eq!(serde_json::to_string(&sheet).unwrap(), raw);

        sheet.limit = Some(1);
        sheet.total = Some(1);
        assert_eq!(
            serde_json::to_string(&sheet).unwrap(),
            r#"{"total":1,"offset":0,"limit":1,"data":[{"b":1,"a":2}],":type":"sheet","columns":["b","a"]}"#
        );
    }

    #[test]
    fn test_untouched_document_keeps_key_order() {
        let raw = r#"{":type":"sheet","total":1,"data":[{"title":"T","path":"/a"}],"offset":0,"limit":1}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), raw);
    }

    #[test]
    fn test_missing_data_is_internal_error() {
        let err = Sheet::from_value(json!({ "columns": [] })).unwrap_err();
        assert!(matches!(err, QueryError::Internal(_)));

        let err = Sheet::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, QueryError::Internal(_)));
    }

    #[test]
    fn test_clause_is_and_across_fields() {
        let clause: Clause = serde_json::from_value(json!({ "a": "1", "b": "2" })).unwrap();
        assert!(clause.matches(&row(json!({ "a": "1", "b": "2", "c": "3" }))));
        assert!(!clause.matches(&row(json!({ "a": "1", "b": "3" }))));
        assert!(!clause.matches(&row(json!({ "a": "1" }))));
    }

    #[test]
    fn test_clause_equality_is_exact() {
        let clause: Clause = serde_json::from_value(json!({ "n": 1 })).unwrap();
        assert!(clause.matches(&row(json!({ "n": 1 }))));
        assert!(!clause.matches(&row(json!({ "n": "1" }))));
    }

    #[test]
    fn test_filter_spec_is_or_across_clauses() {
        let spec: FilterSpec =
            serde_json::from_value(json!([{ "a": "x" }, { "b": "y" }])).unwrap();
        assert!(spec.matches(&row(json!({ "a": "x" }))));
        assert!(spec.matches(&row(json!({ "b": "y" }))));
        assert!(!spec.matches(&row(json!({ "a": "y", "b": "x" }))));
        assert!(!FilterSpec::default().matches(&row(json!({ "a": "x" }))));
    }
}
