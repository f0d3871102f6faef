//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Bind server to listener
//! - Dispatch requests to the query orchestrator
//! - Observability (metrics, request IDs in spans)

use axum::{
    body::Body,
    extract::State,
    http::{Request, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::error::QueryResult;
use crate::http::request::{query_param, request_id, request_id_layer};
use crate::observability::metrics;
use crate::query::Orchestrator;
use crate::upstream::{HttpFetcher, SheetFetcher};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Orchestrator,
}

/// HTTP server for the sheet proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server fetching from the configured upstream.
    pub fn new(config: ProxyConfig) -> QueryResult<Self> {
        let fetcher = HttpFetcher::new(&config.upstream, &config.timeouts)?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Create a server with a caller-supplied fetcher.
    pub fn with_fetcher(config: ProxyConfig, fetcher: Arc<dyn SheetFetcher>) -> Self {
        let state = AppState {
            orchestrator: Orchestrator::new(config.upstream.clone(), fetcher),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(|| async { "ok" }))
            .route("/{*path}", get(query_handler))
            .route("/", get(query_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request),
                )
            }))
            .layer(request_id_layer())
    }

    /// The fully layered router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream_host = %self.config.upstream.host,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Query handler: resolve, fetch, transform, render.
async fn query_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let start_time = Instant::now();
    let query = query_param(uri.query());

    let response = match state.orchestrator.handle(uri.path(), query.as_deref()).await {
        Ok(outcome) => outcome.into_response(),
        Err(e) => {
            let status = e.status();
            if status.is_server_error() {
                tracing::error!(status = %status, error = %e, "Request failed");
            } else {
                tracing::warn!(status = %status, error = %e, "Request rejected");
            }
            e.into_response()
        }
    };

    metrics::record_request(response.status().as_u16(), start_time);
    response
}
