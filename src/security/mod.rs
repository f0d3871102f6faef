//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Upstream response headers:
//!     → headers.rs (strict allowlist)
//!     → outbound response
//! ```
//!
//! # Design Decisions
//! - Allowlist, not blocklist: new upstream headers stay invisible
//!   until explicitly added
//! - Headers are copied verbatim, never rewritten

pub mod headers;
