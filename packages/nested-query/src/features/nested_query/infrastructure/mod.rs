//! Infrastructure layer: traversal and comparison

pub mod deep_equal;
pub mod query_engine;
pub mod walker;

pub use deep_equal::DeepEqual;
pub use query_engine::QueryEngine;
pub use walker::{Visit, Walker};
