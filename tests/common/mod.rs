//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use sheet_proxy::config::ProxyConfig;
use sheet_proxy::http::HttpServer;
use sheet_proxy::lifecycle::Shutdown;
use sheet_proxy::upstream::HttpFetcher;

/// Upstream host suffix used by the tests; resolved to the mock upstream.
pub const UPSTREAM_HOST: &str = "sheets.test";

/// Start a mock upstream serving `app` on an ephemeral port.
pub async fn start_mock_upstream(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    addr
}

/// Start the proxy with `<branch>--<site>--<org>.sheets.test` resolving to `upstream`.
///
/// `hosts` lists the upstream host names (without suffix) the test will hit.
pub async fn start_proxy(upstream: SocketAddr, hosts: &[&str]) -> (SocketAddr, Shutdown) {
    let mut config = ProxyConfig::default();
    config.upstream.scheme = "http".into();
    config.upstream.host = format!("{}:{}", UPSTREAM_HOST, upstream.port());

    let mut builder = reqwest::Client::builder().no_proxy();
    for host in hosts {
        builder = builder.resolve(&format!("{}.{}", host, UPSTREAM_HOST), upstream);
    }
    let fetcher = HttpFetcher::from_client(builder.build().unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::with_fetcher(config, Arc::new(fetcher));
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Client that never goes through an environment proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
