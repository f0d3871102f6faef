//! Query processing pipeline.
//!
//! # Data Flow
//! ```text
//! inbound path + `query` parameter
//!     → routing (UpstreamTarget → upstream URL)
//!     → upstream (fetch JSON + headers)
//!     → no query: pass the document through untouched
//!     → spec.rs (parse QuerySpec)
//!     → orchestrator.rs: validate pagination → keep → drop → sort
//!     → security::headers (allowlisted upstream headers)
//!     → Outcome, rendered by the http layer
//! ```
//!
//! # Design Decisions
//! - Pagination is only validated when a query is supplied
//! - keep always runs before drop
//! - No partial success: any stage error aborts the request

pub mod orchestrator;
pub mod spec;

pub use orchestrator::{apply_query, Orchestrator, Outcome};
pub use spec::QuerySpec;
