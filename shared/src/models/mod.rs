//! Data models
//!
//! Shared between loyalty-server and in-process consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod customer;
pub mod membership;
pub mod preference;
pub mod provisioning;

// Re-exports
pub use customer::*;
pub use membership::*;
pub use preference::*;
pub use provisioning::*;
