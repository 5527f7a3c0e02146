//! Data models
//!
//! Shapes returned by the remote API. JSON uses camelCase keys.
//! All IDs are `i64`, table numbers are `u32`.

pub mod dining_table;
pub mod order;

// Re-exports
pub use dining_table::*;
pub use order::*;
