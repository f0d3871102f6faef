//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path /<org>/<site>/<branch>/<rest...>
//!     → target.rs (split, validate segment count)
//!     → UpstreamTarget + UpstreamConfig
//!     → <scheme>://<branch>--<site>--<org>.<host>/<rest...>
//! ```
//!
//! # Design Decisions
//! - The route is fully determined by the path; no route table
//! - Empty segments are ignored, so `//org//site/...` is accepted
//! - Deterministic: same input always resolves to the same upstream URL

pub mod target;

pub use target::{UpstreamTarget, USAGE};
