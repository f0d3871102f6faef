//! Request orchestration: resolve, fetch, transform.

use std::sync::Arc;

use axum::http::HeaderMap;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::error::QueryResult;
use crate::observability::metrics;
use crate::query::spec::QuerySpec;
use crate::routing::UpstreamTarget;
use crate::security::headers::copy_headers;
use crate::sheet::{drop_objects, keep_objects, sort_sheet, validate_pagination, Sheet};
use crate::upstream::SheetFetcher;

/// Result of a successfully handled request.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// No query: the upstream document, untouched.
    PassThrough(Value),
    /// Query applied; headers are the allowlisted upstream headers.
    Transformed { sheet: Sheet, headers: HeaderMap },
}

/// Runs the query pipeline for one request at a time; holds no per-request state.
#[derive(Clone)]
pub struct Orchestrator {
    upstream: UpstreamConfig,
    fetcher: Arc<dyn SheetFetcher>,
}

impl Orchestrator {
    pub fn new(upstream: UpstreamConfig, fetcher: Arc<dyn SheetFetcher>) -> Self {
        Self { upstream, fetcher }
    }

    /// Handle an inbound request path and optional raw `query` value.
    pub async fn handle(&self, path: &str, query: Option<&str>) -> QueryResult<Outcome> {
        let target = UpstreamTarget::from_path(path)?;
        let url = target.url(&self.upstream)?;

        tracing::info!(
            org = %target.org,
            site = %target.site,
            branch = %target.branch,
            upstream = %url,
            "Resolved upstream"
        );

        let document = self.fetcher.fetch(&url).await?;
        tracing::debug!(status = %document.status, upstream = %url, "Fetched upstream document");

        let Some(query) = query.filter(|q| !q.is_empty()) else {
            tracing::debug!("No query, passing document through");
            return Ok(Outcome::PassThrough(document.body));
        };

        tracing::debug!(query, "Applying query");
        let spec = QuerySpec::parse(query)?;
        let mut sheet = Sheet::from_value(document.body)?;
        apply_query(&mut sheet, &spec)?;

        Ok(Outcome::Transformed {
            sheet,
            headers: copy_headers(&document.headers),
        })
    }
}

/// Validate the sheet, then apply keep, drop and sort in that order.
pub fn apply_query(sheet: &mut Sheet, spec: &QuerySpec) -> QueryResult<()> {
    validate_pagination(sheet)?;

    if let Some(keep) = &spec.keep {
        keep_objects(sheet, keep);
        metrics::record_transform("keep", sheet.len());
    }

    if let Some(drop) = &spec.drop {
        drop_objects(sheet, drop);
        metrics::record_transform("drop", sheet.len());
    }

    if let Some(field) = spec.sort_field() {
        sort_sheet(sheet, field, spec.numeric_sort());
        metrics::record_transform("sort", sheet.len());
    }

    Ok(())
}
