//! Nested Query UseCase
//!
//! Entry point for callers. Owns a validated `QueryConfig` and delegates to
//! the infrastructure `QueryEngine`.

use crate::config::{QueryConfig, Validatable};
use crate::errors::Result;
use crate::features::nested_query::domain::{PathSegment, TraversalStats};
use crate::features::nested_query::infrastructure::{DeepEqual, QueryEngine};
use crate::shared::models::{Document, NodeId, NodeRef};

/// Nested Query UseCase Trait
pub trait NestedQueryUseCase: Send + Sync {
    /// First value under `key`, descendants checked before the node itself
    fn find_first_value_by_key<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<Option<NodeRef<'a>>>;

    fn find_all_values_by_key<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<Vec<NodeRef<'a>>>;

    fn find_path_by_key(
        &self,
        doc: &Document,
        root: NodeId,
        key: &str,
    ) -> Result<Option<Vec<PathSegment>>>;

    fn contains_key(&self, doc: &Document, root: NodeId, key: &str) -> Result<bool>;

    /// `target` may live in a different document than `root`
    fn contains_value(
        &self,
        doc: &Document,
        root: NodeId,
        target_doc: &Document,
        target: NodeId,
    ) -> Result<bool>;

    fn deep_equal(
        &self,
        left_doc: &Document,
        left: NodeId,
        right_doc: &Document,
        right: NodeId,
    ) -> Result<bool>;
}

/// Nested Query UseCase Implementation
#[derive(Debug, Clone, Default)]
pub struct NestedQueryUseCaseImpl {
    config: QueryConfig,
}

impl NestedQueryUseCaseImpl {
    /// Create with a validated config
    pub fn new(config: QueryConfig) -> Result<Self> {
        if let Err(e) = config.validate() {
            tracing::warn!("{} rejected: {}", config.config_name(), e);
            return Err(e.into());
        }
        tracing::info!(
            "nested_query_initialized (max_depth={}, max_nodes={:?}, mapping_equality={:?})",
            config.max_depth,
            config.max_nodes,
            config.mapping_equality
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn engine(&self) -> QueryEngine<'_> {
        QueryEngine::new(&self.config)
    }

    /// `find_first_value_by_key` plus traversal counters
    pub fn find_first_value_by_key_with_stats<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<(Option<NodeRef<'a>>, TraversalStats)> {
        self.engine().find_first_value_by_key(doc, root, key)
    }

    /// `contains_key` plus traversal counters
    pub fn contains_key_with_stats(
        &self,
        doc: &Document,
        root: NodeId,
        key: &str,
    ) -> Result<(bool, TraversalStats)> {
        self.engine().contains_key(doc, root, key)
    }

    /// `contains_value` plus traversal counters
    pub fn contains_value_with_stats(
        &self,
        doc: &Document,
        root: NodeId,
        target_doc: &Document,
        target: NodeId,
    ) -> Result<(bool, TraversalStats)> {
        self.engine().contains_value(doc, root, target_doc, target)
    }
}

impl NestedQueryUseCase for NestedQueryUseCaseImpl {
    fn find_first_value_by_key<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<Option<NodeRef<'a>>> {
        Ok(self.engine().find_first_value_by_key(doc, root, key)?.0)
    }

    fn find_all_values_by_key<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<Vec<NodeRef<'a>>> {
        Ok(self.engine().find_all_values_by_key(doc, root, key)?.0)
    }

    fn find_path_by_key(
        &self,
        doc: &Document,
        root: NodeId,
        key: &str,
    ) -> Result<Option<Vec<PathSegment>>> {
        Ok(self.engine().find_path_by_key(doc, root, key)?.0)
    }

    fn contains_key(&self, doc: &Document, root: NodeId, key: &str) -> Result<bool> {
        Ok(self.engine().contains_key(doc, root, key)?.0)
    }

    fn contains_value(
        &self,
        doc: &Document,
        root: NodeId,
        target_doc: &Document,
        target: NodeId,
    ) -> Result<bool> {
        Ok(self
            .engine()
            .contains_value(doc, root, target_doc, target)?
            .0)
    }

    fn deep_equal(
        &self,
        left_doc: &Document,
        left: NodeId,
        right_doc: &Document,
        right: NodeId,
    ) -> Result<bool> {
        DeepEqual::new(&self.config).equals(left_doc, left, right_doc, right)
    }
}
