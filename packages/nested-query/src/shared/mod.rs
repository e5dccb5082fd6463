//! Shared module - Common types used across features
//!
//! Only depends on serde_json (import/export) and the crate error type.

pub mod models;

// Re-exports for convenience
pub use models::*;
