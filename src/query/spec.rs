//! The `query` parameter.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{QueryError, QueryResult};
use crate::sheet::FilterSpec;

/// Client-specified transformations, decoded from JSON.
///
/// ```json
/// {"sort": "path", "num-sort": "true", "keep": [{"category": "cat1"}], "drop": [{"path": "/blah"}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuerySpec {
    /// Field to sort by.
    #[serde(default)]
    pub sort: Option<String>,

    /// `"true"` selects numeric comparison; anything else is lexical.
    #[serde(default, rename = "num-sort")]
    pub num_sort: Option<Value>,

    /// Rows to retain.
    #[serde(default)]
    pub keep: Option<FilterSpec>,

    /// Rows to remove.
    #[serde(default)]
    pub drop: Option<FilterSpec>,
}

impl QuerySpec {
    /// Decode the raw (already URL-decoded) parameter value.
    pub fn parse(raw: &str) -> QueryResult<Self> {
        serde_json::from_str(raw).map_err(|e| QueryError::BadRequest(format!("Invalid query: {}", e)))
    }

    /// Sort field, if a non-empty one was given.
    pub fn sort_field(&self) -> Option<&str> {
        self.sort.as_deref().filter(|f| !f.is_empty())
    }

    pub fn numeric_sort(&self) -> bool {
        matches!(&self.num_sort, Some(Value::String(s)) if s == "true")
    }
}
