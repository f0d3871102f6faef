//! Sheet Query Proxy Library
//!
//! Fetches JSON sheets from `<branch>--<site>--<org>.<host>` and applies
//! client-supplied keep/drop filters and sorting before returning them.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod routing;
pub mod security;
pub mod sheet;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use error::{QueryError, QueryResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
