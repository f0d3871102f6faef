//! Upstream sheet fetching.
//!
//! # Responsibilities
//! - Issue one GET per inbound request to the resolved upstream URL
//! - Decode the body as JSON and keep the response headers
//! - Map transport, status and decoding failures to `QueryError::Upstream`
//!
//! # Design Decisions
//! - Fetching sits behind the `SheetFetcher` trait so the pipeline can
//!   be driven by an in-memory source in tests
//! - No retries and no caching: one failed fetch fails the request
//! - Timeouts are owned by the reqwest client, not by the pipeline

pub mod client;

pub use client::{HttpFetcher, SheetFetcher, UpstreamDocument};
