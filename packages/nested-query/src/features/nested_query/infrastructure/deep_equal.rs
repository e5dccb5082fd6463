//! Structural equality between two nodes, possibly from different documents
//!
//! - sequences: same length, pairwise equal in order
//! - scalars: `Scalar::strict_eq`
//! - mappings: same key set, pairwise equal values (or `InvalidInput` when
//!   `MappingEquality::Unsupported`)
//! - anything else: not equal
//!
//! Uses a work-list of node pairs. A pair that is re-entered while still being
//! compared means both sides are cyclic along the same route. A pair whose
//! `Leave` step is reached has been proven equal and is not compared again.

use std::collections::HashSet;

use crate::config::{MappingEquality, QueryConfig};
use crate::errors::{QueryError, Result};
use crate::shared::models::{Document, Node, NodeId};

enum Step {
    Compare {
        left: NodeId,
        right: NodeId,
        depth: usize,
    },
    Leave {
        left: NodeId,
        right: NodeId,
    },
}

pub struct DeepEqual<'c> {
    config: &'c QueryConfig,
}

impl<'c> DeepEqual<'c> {
    pub fn new(config: &'c QueryConfig) -> Self {
        Self { config }
    }

    pub fn equals(
        &self,
        left_doc: &Document,
        left: NodeId,
        right_doc: &Document,
        right: NodeId,
    ) -> Result<bool> {
        let same_doc = std::ptr::eq(left_doc, right_doc);
        let mut steps = vec![Step::Compare {
            left,
            right,
            depth: 0,
        }];
        let mut on_path: HashSet<(NodeId, NodeId)> = HashSet::new();
        let mut proven: HashSet<(NodeId, NodeId)> = HashSet::new();
        let structural = self.config.mapping_equality == MappingEquality::Structural;

        while let Some(step) = steps.pop() {
            let (left, right, depth) = match step {
                Step::Compare { left, right, depth } => (left, right, depth),
                Step::Leave { left, right } => {
                    on_path.remove(&(left, right));
                    proven.insert((left, right));
                    continue;
                }
            };

            if depth > self.config.max_depth {
                return Err(QueryError::DepthLimitExceeded {
                    limit: self.config.max_depth,
                });
            }

            let l = left_doc.try_get(left)?;
            let r = right_doc.try_get(right)?;

            // Same node in the same arena. Without structural mapping
            // equality any mapping below must still be rejected.
            if structural && same_doc && left == right {
                continue;
            }
            if proven.contains(&(left, right)) {
                continue;
            }

            match (l, r) {
                (Node::Leaf(a), Node::Leaf(b)) => {
                    if !a.strict_eq(b) {
                        return Ok(false);
                    }
                }
                (Node::Sequence(a), Node::Sequence(b)) => {
                    if a.len() != b.len() {
                        return Ok(false);
                    }
                    self.descend(&mut on_path, &mut steps, left, right)?;
                    steps.extend(a.iter().zip(b.iter()).rev().map(|(x, y)| Step::Compare {
                        left: *x,
                        right: *y,
                        depth: depth + 1,
                    }));
                }
                (Node::Mapping(a), Node::Mapping(b)) => {
                    if self.config.mapping_equality == MappingEquality::Unsupported {
                        return Err(QueryError::invalid_input(format!(
                            "mapping equality is disabled (comparing {} with {})",
                            left, right
                        )));
                    }
                    if a.len() != b.len() {
                        return Ok(false);
                    }
                    let mut pairs = Vec::with_capacity(a.len());
                    for (key, x) in a {
                        match r.field(key) {
                            Some(y) => pairs.push((*x, y)),
                            None => return Ok(false),
                        }
                    }
                    self.descend(&mut on_path, &mut steps, left, right)?;
                    steps.extend(pairs.into_iter().rev().map(|(x, y)| Step::Compare {
                        left: x,
                        right: y,
                        depth: depth + 1,
                    }));
                }
                _ => return Ok(false),
            }
        }

        Ok(true)
    }

    fn descend(
        &self,
        on_path: &mut HashSet<(NodeId, NodeId)>,
        steps: &mut Vec<Step>,
        left: NodeId,
        right: NodeId,
    ) -> Result<()> {
        if !on_path.insert((left, right)) {
            return Err(QueryError::CyclicStructure { node: left });
        }
        steps.push(Step::Leave { left, right });
        Ok(())
    }
}
