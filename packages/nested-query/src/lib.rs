/*
 * nested-query - Nested-Structure Query Engine
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Node graph models (Document arena, Node, Scalar)
 * - config/      : QueryConfig, presets, YAML v1 loading
 * - features/    : nested_query (application → infrastructure → domain)
 *
 * Traversal:
 * - Explicit work-list stack (no native recursion)
 * - Cycle detection by NodeId on the current path
 * - Depth limit and node budget from QueryConfig
 */

#![allow(clippy::should_implement_trait)] // from_str naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

pub mod config;
pub mod errors;
pub mod features;
pub mod shared;

pub use config::{MappingEquality, QueryConfig, QueryPreset};
pub use errors::{ErrorKind, QueryError, Result};
pub use features::nested_query::{
    format_path, NestedQueryUseCase, NestedQueryUseCaseImpl, PathSegment, TraversalStats,
};
pub use shared::models::{Document, Node, NodeId, NodeRef, Scalar};

// ═══════════════════════════════════════════════════════════════════════════
// Function-call API (default QueryConfig)
// ═══════════════════════════════════════════════════════════════════════════

fn default_usecase() -> NestedQueryUseCaseImpl {
    NestedQueryUseCaseImpl::default()
}

/// First value stored under `key` anywhere below `root`, descendants first.
///
/// `Ok(None)` is "not found"; a key holding null is `Ok(Some(null leaf))`.
pub fn find_first_value_by_key<'a>(
    doc: &'a Document,
    root: NodeId,
    key: &str,
) -> Result<Option<NodeRef<'a>>> {
    default_usecase().find_first_value_by_key(doc, root, key)
}

pub fn find_all_values_by_key<'a>(
    doc: &'a Document,
    root: NodeId,
    key: &str,
) -> Result<Vec<NodeRef<'a>>> {
    default_usecase().find_all_values_by_key(doc, root, key)
}

pub fn find_path_by_key(
    doc: &Document,
    root: NodeId,
    key: &str,
) -> Result<Option<Vec<PathSegment>>> {
    default_usecase().find_path_by_key(doc, root, key)
}

/// Whether any mapping below `root` has own field `key`
pub fn contains_key(doc: &Document, root: NodeId, key: &str) -> Result<bool> {
    default_usecase().contains_key(doc, root, key)
}

/// Whether any node below `root` (root included) deep-equals `target`
pub fn contains_value(
    doc: &Document,
    root: NodeId,
    target_doc: &Document,
    target: NodeId,
) -> Result<bool> {
    default_usecase().contains_value(doc, root, target_doc, target)
}

pub fn deep_equal(
    left_doc: &Document,
    left: NodeId,
    right_doc: &Document,
    right: NodeId,
) -> Result<bool> {
    default_usecase().deep_equal(left_doc, left, right_doc, right)
}
