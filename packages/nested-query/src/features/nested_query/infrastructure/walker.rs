//! Explicit-stack traversal over a `Document`
//!
//! Algorithm:
//! 1. Pop a frame. `Enter` checks the depth limit and node budget.
//! 2. Containers are added to the on-path set (re-entry = cycle) before the
//!    visitor sees them, then an `Exit` frame and the children (reversed, so
//!    index 0 runs first) are pushed.
//! 3. `Exit` removes the container from the on-path set.
//!
//! The visitor runs on `Enter` for `PreOrder` and on `Exit` for `PostOrder`.
//! Leaves are visited immediately in both orders. Returning
//! `ControlFlow::Break` stops the walk.
//!
//! Shared sub-structures (the same id under two parents) are not cycles: only
//! ancestors are on the path. By default they are walked once per parent.
//! With `skip_exhausted`, a container whose `Exit` was reached without a
//! break is recorded and skipped on every later entry, which keeps doubling
//! DAGs linear. Only valid when the visitor's answer for a node does not
//! depend on how it was reached.

use std::collections::HashSet;
use std::ops::ControlFlow;

use crate::config::QueryConfig;
use crate::errors::{QueryError, Result};
use crate::features::nested_query::domain::{Edge, TraversalStats, VisitOrder};
use crate::shared::models::{Document, Node, NodeId};

/// What the visitor sees for each node
#[derive(Debug)]
pub struct Visit<'a, 'p> {
    pub id: NodeId,
    pub node: &'a Node,
    pub depth: usize,
    /// Edges from the root to this node
    pub path: &'p [Edge<'a>],
}

enum Frame<'a> {
    Enter {
        id: NodeId,
        depth: usize,
        via: Option<Edge<'a>>,
    },
    Exit {
        id: NodeId,
        node: &'a Node,
        depth: usize,
        via: bool,
    },
}

pub struct Walker<'a> {
    doc: &'a Document,
    config: &'a QueryConfig,
    stats: TraversalStats,
    skip_exhausted: bool,
}

impl<'a> Walker<'a> {
    pub fn new(doc: &'a Document, config: &'a QueryConfig) -> Self {
        Self {
            doc,
            config,
            stats: TraversalStats::default(),
            skip_exhausted: false,
        }
    }

    /// Builder: Skip containers already explored without a break
    pub fn skip_exhausted(mut self) -> Self {
        self.skip_exhausted = true;
        self
    }

    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Walk from `root`, calling `visit` in the given order until it breaks.
    pub fn walk<T, F>(&mut self, root: NodeId, order: VisitOrder, mut visit: F) -> Result<Option<T>>
    where
        F: FnMut(&Visit<'a, '_>) -> Result<ControlFlow<T>>,
    {
        let doc = self.doc;
        let mut frames = vec![Frame::Enter {
            id: root,
            depth: 0,
            via: None,
        }];
        let mut on_path: HashSet<NodeId> = HashSet::new();
        let mut exhausted: HashSet<NodeId> = HashSet::new();
        let mut path: Vec<Edge<'a>> = Vec::new();

        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Enter { id, depth, via } => {
                    self.enter(depth)?;
                    let node = doc.try_get(id)?;
                    if exhausted.contains(&id) {
                        continue;
                    }
                    let has_via = via.is_some();
                    if let Some(edge) = via {
                        path.push(edge);
                    }
                    if node.is_container() {
                        self.mark_on_path(&mut on_path, id)?;
                    }

                    let pre_visit = order == VisitOrder::PreOrder || !node.is_container();
                    if pre_visit {
                        let hit = visit(&Visit {
                            id,
                            node,
                            depth,
                            path: &path,
                        })?;
                        if let ControlFlow::Break(found) = hit {
                            return Ok(Some(found));
                        }
                    }

                    match node {
                        Node::Leaf(_) => {
                            if has_via {
                                path.pop();
                            }
                        }
                        Node::Sequence(items) => {
                            frames.push(Frame::Exit {
                                id,
                                node,
                                depth,
                                via: has_via,
                            });
                            frames.extend(items.iter().enumerate().rev().map(|(i, child)| {
                                Frame::Enter {
                                    id: *child,
                                    depth: depth + 1,
                                    via: Some(Edge::Index(i)),
                                }
                            }));
                        }
                        Node::Mapping(fields) => {
                            frames.push(Frame::Exit {
                                id,
                                node,
                                depth,
                                via: has_via,
                            });
                            frames.extend(fields.iter().rev().map(|(key, child)| Frame::Enter {
                                id: *child,
                                depth: depth + 1,
                                via: Some(Edge::Key(key.as_str())),
                            }));
                        }
                    }
                }
                Frame::Exit {
                    id,
                    node,
                    depth,
                    via,
                } => {
                    if order == VisitOrder::PostOrder {
                        let hit = visit(&Visit {
                            id,
                            node,
                            depth,
                            path: &path,
                        })?;
                        if let ControlFlow::Break(found) = hit {
                            return Ok(Some(found));
                        }
                    }
                    on_path.remove(&id);
                    if self.skip_exhausted {
                        exhausted.insert(id);
                    }
                    if via {
                        path.pop();
                    }
                }
            }
        }

        Ok(None)
    }

    fn enter(&mut self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            tracing::warn!(
                "traversal aborted: depth {} exceeds limit {}",
                depth,
                self.config.max_depth
            );
            return Err(QueryError::DepthLimitExceeded {
                limit: self.config.max_depth,
            });
        }

        self.stats.nodes_visited += 1;
        if let Some(limit) = self.config.max_nodes {
            if self.stats.nodes_visited > limit {
                tracing::warn!("traversal aborted: node budget {} exhausted", limit);
                return Err(QueryError::NodeBudgetExceeded { limit });
            }
        }

        self.stats.max_depth_reached = self.stats.max_depth_reached.max(depth);
        Ok(())
    }

    fn mark_on_path(&self, on_path: &mut HashSet<NodeId>, id: NodeId) -> Result<()> {
        if !on_path.insert(id) {
            tracing::warn!("traversal aborted: node {} is its own ancestor", id);
            return Err(QueryError::CyclicStructure { node: id });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn collect(doc: &Document, root: NodeId, order: VisitOrder) -> Vec<String> {
        let config = QueryConfig::default();
        let mut walker = Walker::new(doc, &config);
        let mut seen = Vec::new();
        walker
            .walk::<(), _>(root, order, |visit| {
                let label = match visit.node {
                    Node::Leaf(_) => doc.node(visit.id).to_json()?.to_string(),
                    other => other.kind_name().to_string(),
                };
                seen.push(label);
                Ok(ControlFlow::Continue(()))
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_pre_order_visits_parent_first() {
        let (doc, root) = Document::from_json(&json!([1, [2, 3]]));
        assert_eq!(
            collect(&doc, root, VisitOrder::PreOrder),
            vec!["sequence", "1", "sequence", "2", "3"]
        );
    }

    #[test]
    fn test_post_order_visits_children_first() {
        let (doc, root) = Document::from_json(&json!([1, [2, 3]]));
        assert_eq!(
            collect(&doc, root, VisitOrder::PostOrder),
            vec!["1", "2", "3", "sequence", "sequence"]
        );
    }

    #[test]
    fn test_path_tracks_edges() {
        let (doc, root) = Document::from_json(&json!({"a": [{"b": true}]}));
        let config = QueryConfig::default();
        let mut walker = Walker::new(&doc, &config);
        let path = walker
            .walk(root, VisitOrder::PreOrder, |visit| {
                if matches!(visit.node, Node::Leaf(_)) {
                    return Ok(ControlFlow::Break(visit.path.to_vec()));
                }
                Ok(ControlFlow::Continue(()))
            })
            .unwrap()
            .unwrap();
        assert_eq!(path, vec![Edge::Key("a"), Edge::Index(0), Edge::Key("b")]);
    }

    #[test]
    fn test_stats_count_nodes_and_depth() {
        let (doc, root) = Document::from_json(&json!([[[]], 1]));
        let config = QueryConfig::default();
        let mut walker = Walker::new(&doc, &config);
        walker
            .walk::<(), _>(root, VisitOrder::PreOrder, |_| Ok(ControlFlow::Continue(())))
            .unwrap();
        assert_eq!(walker.stats().nodes_visited, 4);
        assert_eq!(walker.stats().max_depth_reached, 2);
    }

    #[test]
    fn test_shared_substructure_is_not_a_cycle() {
        let mut doc = Document::new();
        let shared = doc.string("x");
        let inner = doc.sequence(vec![shared]).unwrap();
        let root = doc.sequence(vec![inner, inner]).unwrap();
        let config = QueryConfig::default();
        let mut walker = Walker::new(&doc, &config);
        let result = walker.walk::<(), _>(root, VisitOrder::PostOrder, |_| {
            Ok(ControlFlow::Continue(()))
        });
        assert!(result.is_ok());
        assert_eq!(walker.stats().nodes_visited, 5);
    }

    #[test]
    fn test_skip_exhausted_enters_shared_container_once() {
        let mut doc = Document::new();
        let shared = doc.string("x");
        let inner = doc.sequence(vec![shared]).unwrap();
        let root = doc.sequence(vec![inner, inner]).unwrap();
        let config = QueryConfig::default();
        let mut walker = Walker::new(&doc, &config).skip_exhausted();
        let mut visited = Vec::new();
        walker
            .walk::<(), _>(root, VisitOrder::PostOrder, |visit| {
                visited.push(visit.id);
                Ok(ControlFlow::Continue(()))
            })
            .unwrap();
        // second `inner` is counted on entry but not descended into
        assert_eq!(visited, vec![shared, inner, root]);
        assert_eq!(walker.stats().nodes_visited, 4);
    }

    #[test]
    fn test_ancestor_reference_is_a_cycle() {
        let mut doc = Document::new();
        let root = doc.empty_sequence();
        let child = doc.empty_mapping();
        doc.push(root, child).unwrap();
        doc.insert(child, "parent", root).unwrap();

        let config = QueryConfig::default();
        let mut walker = Walker::new(&doc, &config);
        let err = walker
            .walk::<(), _>(root, VisitOrder::PreOrder, |_| Ok(ControlFlow::Continue(())))
            .unwrap_err();
        assert!(matches!(err, QueryError::CyclicStructure { node } if node == root));
    }

    #[test]
    fn test_depth_limit() {
        let (doc, root) = Document::from_json(&json!([[[1]]]));
        let config = QueryConfig::default().max_depth(2);
        let mut walker = Walker::new(&doc, &config);
        let err = walker
            .walk::<(), _>(root, VisitOrder::PreOrder, |_| Ok(ControlFlow::Continue(())))
            .unwrap_err();
        assert!(matches!(err, QueryError::DepthLimitExceeded { limit: 2 }));
    }

    #[test]
    fn test_node_budget() {
        let (doc, root) = Document::from_json(&json!([1, 2, 3]));
        let config = QueryConfig::default().max_nodes(Some(3));
        let mut walker = Walker::new(&doc, &config);
        let err = walker
            .walk::<(), _>(root, VisitOrder::PreOrder, |_| Ok(ControlFlow::Continue(())))
            .unwrap_err();
        assert!(matches!(err, QueryError::NodeBudgetExceeded { limit: 3 }));
    }

    #[test]
    fn test_dangling_root() {
        let doc = Document::new();
        let config = QueryConfig::default();
        let mut walker = Walker::new(&doc, &config);
        let err = walker
            .walk::<(), _>(NodeId(0), VisitOrder::PreOrder, |_| {
                Ok(ControlFlow::Continue(()))
            })
            .unwrap_err();
        assert_eq!(err.kind(), crate::errors::ErrorKind::InvalidInput);
    }
}
