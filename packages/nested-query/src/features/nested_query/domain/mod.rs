//! Domain models for nested queries
//!
//! Pure value types with no traversal logic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step from a container to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathSegment {
    /// Sequence element
    Index(usize),
    /// Mapping field
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "[{}]", i),
            PathSegment::Key(k) => write!(f, ".{}", k),
        }
    }
}

/// Render a path rooted at `$`, e.g. `$[0].data[3].name`
pub fn format_path(path: &[PathSegment]) -> String {
    let mut out = String::from("$");
    for segment in path {
        out.push_str(&segment.to_string());
    }
    out
}

/// Borrowed path step used while walking; converted to `PathSegment` on a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge<'a> {
    Index(usize),
    Key(&'a str),
}

impl<'a> Edge<'a> {
    pub fn to_segment(&self) -> PathSegment {
        match self {
            Edge::Index(i) => PathSegment::Index(*i),
            Edge::Key(k) => PathSegment::Key((*k).to_string()),
        }
    }
}

/// Per-query traversal counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub nodes_visited: usize,
    pub max_depth_reached: usize,
}

/// Visiting order for a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOrder {
    /// Node before its children
    PreOrder,
    /// All descendants before the node itself (children-first)
    PostOrder,
}
