//! Node graph models

pub mod document;
pub mod node;

pub use document::{Document, NodeRef};
pub use node::{Node, NodeId, Scalar};
