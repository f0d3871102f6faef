//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, `query` parameter extraction)
//!     → query::Orchestrator (resolve, fetch, transform)
//!     → response.rs (render Outcome or QueryError)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{query_param, MakeRequestUuid, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
