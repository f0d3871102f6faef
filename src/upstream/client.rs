//! HTTP client for the upstream content host.

use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::error::{QueryError, QueryResult};

/// A fetched upstream document: status, headers and decoded JSON body.
#[derive(Debug, Clone)]
pub struct UpstreamDocument {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Capability to fetch a JSON document from the upstream.
pub trait SheetFetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, QueryResult<UpstreamDocument>>;
}

/// reqwest-backed fetcher used in production.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured timeouts and user agent.
    pub fn new(upstream: &UpstreamConfig, timeouts: &TimeoutConfig) -> QueryResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(upstream.user_agent.clone())
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .build()
            .map_err(|e| QueryError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn get(&self, url: &Url) -> QueryResult<UpstreamDocument> {
        tracing::debug!(url = %url, "Fetching upstream document");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| QueryError::upstream(format!("Upstream request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = %status, "Upstream returned error status");
            return Err(QueryError::Upstream {
                status: Some(status),
                message: format!("Upstream returned {} for {}", status, url),
            });
        }

        let headers = response.headers().clone();
        let body = response
            .json::<Value>()
            .await
            .map_err(|e| QueryError::upstream(format!("Upstream returned invalid JSON: {}", e)))?;

        Ok(UpstreamDocument { status, headers, body })
    }
}

impl SheetFetcher for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, QueryResult<UpstreamDocument>> {
        self.get(url).boxed()
    }
}
