//! Sheet Query Proxy
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     /<org>/<site>/<branch>/<path>?query={...}
//!         │
//!         ▼
//!  ┌─────────────┐    ┌─────────────┐    ┌──────────────┐
//!  │ http server │───▶│   routing   │───▶│   upstream   │──── GET https://<branch>--<site>--<org>.<host>/<path>
//!  └─────────────┘    │   target    │    │   fetcher    │
//!                     └─────────────┘    └──────┬───────┘
//!                                               │ JSON + headers
//!                                               ▼
//!  ┌─────────────┐    ┌─────────────────────────────────────────┐
//!  │  response   │◀───│ query pipeline                           │
//!  │ + allowlist │    │ pagination → keep → drop → sort          │
//!  └─────────────┘    └─────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use sheet_proxy::config::loader::load_config;
use sheet_proxy::lifecycle::{wait_for_signal, Shutdown};
use sheet_proxy::observability::{logging, metrics};
use sheet_proxy::{HttpServer, ProxyConfig};

#[derive(Parser)]
#[command(name = "sheet-proxy")]
#[command(about = "Query-transform proxy for JSON sheets", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init_logging(&config.observability);

    tracing::info!("sheet-proxy v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_scheme = %config.upstream.scheme,
        upstream_host = %config.upstream.host,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    wait_for_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
