//! Shared types for the loyalty service
//!
//! Data models, report structures and utility helpers used by
//! `loyalty-server` and any in-process consumer of its contracts.
//!
//! DB row types gate their `sqlx` derives behind the `db` feature so
//! frontend-facing consumers can depend on this crate without pulling
//! in the database stack.

pub mod models;
pub mod reports;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
