//! Error types for nested-query
//!
//! "Not found" is never an error here: lookups return `Ok(None)` / `Ok(false)`.
//! Errors are reserved for inputs the traversal cannot finish on.

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;
use crate::shared::models::NodeId;

/// Error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A container references one of its ancestors
    CyclicStructure,
    /// Nesting deeper than `QueryConfig::max_depth`
    DepthLimitExceeded,
    /// More nodes visited than `QueryConfig::max_nodes`
    NodeBudgetExceeded,
    /// Dangling node ids, unsupported comparisons
    InvalidInput,
    /// Configuration errors
    Config,
    /// JSON import/export errors
    Serialization,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CyclicStructure => "cyclic_structure",
            ErrorKind::DepthLimitExceeded => "depth_limit_exceeded",
            ErrorKind::NodeBudgetExceeded => "node_budget_exceeded",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Config => "config",
            ErrorKind::Serialization => "serialization",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for query operations
#[derive(Debug, Error)]
pub enum QueryError {
    /// Container re-entered while still on the current traversal path
    #[error("Cyclic structure: node {node} references one of its ancestors")]
    CyclicStructure { node: NodeId },

    #[error("Nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Traversal visited more than {limit} nodes")]
    NodeBudgetExceeded { limit: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::CyclicStructure { .. } => ErrorKind::CyclicStructure,
            QueryError::DepthLimitExceeded { .. } => ErrorKind::DepthLimitExceeded,
            QueryError::NodeBudgetExceeded { .. } => ErrorKind::NodeBudgetExceeded,
            QueryError::InvalidInput(_) => ErrorKind::InvalidInput,
            QueryError::Config(_) => ErrorKind::Config,
            QueryError::Json(_) => ErrorKind::Serialization,
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        QueryError::InvalidInput(msg.into())
    }

    /// Create a dangling node error
    pub fn dangling(node: NodeId) -> Self {
        QueryError::InvalidInput(format!("node {} does not belong to this document", node))
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, QueryError::CyclicStructure { .. })
    }
}

/// Result type alias for query operations
pub type Result<T> = std::result::Result<T, QueryError>;
