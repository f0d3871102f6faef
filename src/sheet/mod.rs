//! Sheet documents and the in-memory transforms applied to them.
//!
//! # Data Flow
//! ```text
//! upstream JSON (serde_json::Value)
//!     → model.rs (Sheet::from_value)
//!     → pagination.rs (reject offset/paginated sheets)
//!     → filter.rs (keep, then drop)
//!     → sort.rs (order rows by one field)
//!     → serialized back to JSON
//! ```
//!
//! # Design Decisions
//! - All transforms are synchronous and mutate the sheet in place
//! - Rows are opaque key/value maps; values are never rewritten
//! - Filtering rewrites `limit` and `total`; nothing else in the envelope changes

pub mod filter;
pub mod model;
pub mod pagination;
pub mod sort;

pub use filter::{drop_objects, keep_objects};
pub use model::{Clause, FilterSpec, Row, Sheet};
pub use pagination::validate_pagination;
pub use sort::sort_sheet;
