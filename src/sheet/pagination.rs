//! Pagination preconditions.
//!
//! The proxy never requests further pages, so a sheet that is offset or
//! truncated is rejected instead of silently serving partial data.

use crate::error::{QueryError, QueryResult};
use crate::sheet::model::Sheet;

/// Fail with 412 unless the sheet holds the complete result set.
pub fn validate_pagination(sheet: &Sheet) -> QueryResult<()> {
    if sheet.offset != Some(0) {
        return Err(QueryError::PreconditionFailed(
            "Only offset=0 is supported".to_string(),
        ));
    }

    if sheet.limit != sheet.total {
        return Err(QueryError::PreconditionFailed(format!(
            "Pagination is not supported, limit={}, total={}",
            display(sheet.limit),
            display(sheet.total)
        )));
    }

    Ok(())
}

fn display(value: Option<i64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| v.to_string())
}
