//! Key and value queries built on the `Walker`
//!
//! Key queries walk children-first: a node's own fields are checked only
//! after every descendant. Only mapping nodes take part in key lookup.
//! Value queries walk pre-order and compare each node with `DeepEqual`.
//!
//! First-match and existence queries skip shared containers that already
//! came up empty. `find_all_values_by_key` reports one hit per route, so it
//! walks every route.

use std::ops::ControlFlow;

use crate::config::QueryConfig;
use crate::errors::Result;
use crate::features::nested_query::domain::{PathSegment, TraversalStats, VisitOrder};
use crate::features::nested_query::infrastructure::deep_equal::DeepEqual;
use crate::features::nested_query::infrastructure::walker::Walker;
use crate::shared::models::{Document, NodeId, NodeRef};

/// Query engine over a borrowed config
pub struct QueryEngine<'c> {
    config: &'c QueryConfig,
}

impl<'c> QueryEngine<'c> {
    pub fn new(config: &'c QueryConfig) -> Self {
        Self { config }
    }

    /// First value stored under `key`, descendants before the node itself.
    ///
    /// `Ok(None)` means no mapping anywhere has the key. A key holding null
    /// comes back as `Some` of a null leaf.
    pub fn find_first_value_by_key<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<(Option<NodeRef<'a>>, TraversalStats)> {
        let mut walker = Walker::new(doc, self.config).skip_exhausted();
        let found = walker.walk(root, VisitOrder::PostOrder, |visit| {
            Ok(match visit.node.field(key) {
                Some(value) => ControlFlow::Break(value),
                None => ControlFlow::Continue(()),
            })
        })?;
        let stats = walker.stats();
        tracing::debug!(
            "find_first_value_by_key key={} found={} nodes_visited={}",
            key,
            found.is_some(),
            stats.nodes_visited
        );
        Ok((found.map(|id| doc.node(id)), stats))
    }

    /// Every value stored under `key`, in the same order as
    /// `find_first_value_by_key` would reach them.
    pub fn find_all_values_by_key<'a>(
        &self,
        doc: &'a Document,
        root: NodeId,
        key: &str,
    ) -> Result<(Vec<NodeRef<'a>>, TraversalStats)> {
        let mut walker = Walker::new(doc, self.config);
        let mut hits = Vec::new();
        walker.walk::<(), _>(root, VisitOrder::PostOrder, |visit| {
            if let Some(value) = visit.node.field(key) {
                hits.push(doc.node(value));
            }
            Ok(ControlFlow::Continue(()))
        })?;
        let stats = walker.stats();
        tracing::debug!(
            "find_all_values_by_key key={} matches={} nodes_visited={}",
            key,
            hits.len(),
            stats.nodes_visited
        );
        Ok((hits, stats))
    }

    /// Path from `root` to the value `find_first_value_by_key` returns
    pub fn find_path_by_key(
        &self,
        doc: &Document,
        root: NodeId,
        key: &str,
    ) -> Result<(Option<Vec<PathSegment>>, TraversalStats)> {
        let mut walker = Walker::new(doc, self.config).skip_exhausted();
        let found = walker.walk(root, VisitOrder::PostOrder, |visit| {
            if !visit.node.has_field(key) {
                return Ok(ControlFlow::Continue(()));
            }
            let mut path: Vec<PathSegment> = visit.path.iter().map(|e| e.to_segment()).collect();
            path.push(PathSegment::Key(key.to_string()));
            Ok(ControlFlow::Break(path))
        })?;
        let stats = walker.stats();
        tracing::debug!(
            "find_path_by_key key={} found={} nodes_visited={}",
            key,
            found.is_some(),
            stats.nodes_visited
        );
        Ok((found, stats))
    }

    /// Whether any mapping in the structure has own field `key`
    pub fn contains_key(
        &self,
        doc: &Document,
        root: NodeId,
        key: &str,
    ) -> Result<(bool, TraversalStats)> {
        let mut walker = Walker::new(doc, self.config).skip_exhausted();
        let found = walker.walk(root, VisitOrder::PostOrder, |visit| {
            Ok(if visit.node.has_field(key) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        })?;
        let stats = walker.stats();
        tracing::debug!(
            "contains_key key={} found={} nodes_visited={}",
            key,
            found.is_some(),
            stats.nodes_visited
        );
        Ok((found.is_some(), stats))
    }

    /// Whether any node (root included) deep-equals `target`
    pub fn contains_value(
        &self,
        doc: &Document,
        root: NodeId,
        target_doc: &Document,
        target: NodeId,
    ) -> Result<(bool, TraversalStats)> {
        // Reject a foreign target id up front, even for an empty walk
        target_doc.try_get(target)?;

        let equal = DeepEqual::new(self.config);
        let mut walker = Walker::new(doc, self.config).skip_exhausted();
        let found = walker.walk(root, VisitOrder::PreOrder, |visit| {
            Ok(if equal.equals(doc, visit.id, target_doc, target)? {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            })
        })?;
        let stats = walker.stats();
        tracing::debug!(
            "contains_value target={} found={} nodes_visited={}",
            target,
            found.is_some(),
            stats.nodes_visited
        );
        Ok((found.is_some(), stats))
    }
}
