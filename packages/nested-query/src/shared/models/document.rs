//! Arena-owned node graph
//!
//! Every node lives in one `Document` and is addressed by `NodeId`. Containers
//! refer to children by id, so a sub-structure can be shared between parents
//! and, through `push`/`insert`, a container can list one of its ancestors.
//! Queries detect the latter and fail with `QueryError::CyclicStructure`.

use super::node::{Node, NodeId, Scalar};
use crate::errors::{QueryError, Result};
use serde_json::{Map, Number, Value};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Like `get`, but a foreign id is an `InvalidInput` error
    pub fn try_get(&self, id: NodeId) -> Result<&Node> {
        self.get(id).ok_or_else(|| QueryError::dangling(id))
    }

    /// Borrowed handle to a node
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { doc: self, id }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    pub fn leaf(&mut self, scalar: impl Into<Scalar>) -> NodeId {
        self.alloc(Node::Leaf(scalar.into()))
    }

    pub fn null(&mut self) -> NodeId {
        self.alloc(Node::Leaf(Scalar::Null))
    }

    pub fn string(&mut self, v: impl Into<String>) -> NodeId {
        self.alloc(Node::Leaf(Scalar::String(v.into())))
    }

    pub fn integer(&mut self, v: i64) -> NodeId {
        self.alloc(Node::Leaf(Scalar::Integer(v)))
    }

    pub fn float(&mut self, v: f64) -> NodeId {
        self.alloc(Node::Leaf(Scalar::Float(v)))
    }

    pub fn boolean(&mut self, v: bool) -> NodeId {
        self.alloc(Node::Leaf(Scalar::Bool(v)))
    }

    /// New sequence. Children must already belong to this document.
    pub fn sequence(&mut self, items: Vec<NodeId>) -> Result<NodeId> {
        for id in &items {
            self.try_get(*id)?;
        }
        Ok(self.alloc(Node::Sequence(items)))
    }

    /// New mapping. A repeated key keeps its first position and takes the
    /// last value.
    pub fn mapping<K: Into<String>>(&mut self, entries: Vec<(K, NodeId)>) -> Result<NodeId> {
        let mut fields: Vec<(String, NodeId)> = Vec::with_capacity(entries.len());
        for (key, id) in entries {
            self.try_get(id)?;
            upsert(&mut fields, key.into(), id);
        }
        Ok(self.alloc(Node::Mapping(fields)))
    }

    pub fn empty_sequence(&mut self) -> NodeId {
        self.alloc(Node::Sequence(Vec::new()))
    }

    pub fn empty_mapping(&mut self) -> NodeId {
        self.alloc(Node::Mapping(Vec::new()))
    }

    /// Append `child` to sequence `seq`
    pub fn push(&mut self, seq: NodeId, child: NodeId) -> Result<()> {
        self.try_get(child)?;
        match self.nodes.get_mut(seq.0) {
            Some(Node::Sequence(items)) => {
                items.push(child);
                Ok(())
            }
            Some(other) => Err(QueryError::invalid_input(format!(
                "push target {} is a {}, not a sequence",
                seq,
                other.kind_name()
            ))),
            None => Err(QueryError::dangling(seq)),
        }
    }

    /// Set field `key` of mapping `map` to `child`
    pub fn insert(&mut self, map: NodeId, key: impl Into<String>, child: NodeId) -> Result<()> {
        self.try_get(child)?;
        match self.nodes.get_mut(map.0) {
            Some(Node::Mapping(fields)) => {
                upsert(fields, key.into(), child);
                Ok(())
            }
            Some(other) => Err(QueryError::invalid_input(format!(
                "insert target {} is a {}, not a mapping",
                map,
                other.kind_name()
            ))),
            None => Err(QueryError::dangling(map)),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // JSON import / export
    // ═══════════════════════════════════════════════════════════════════════

    /// Build a new document from a JSON value, returning it with its root
    pub fn from_json(value: &Value) -> (Self, NodeId) {
        let mut doc = Self::new();
        let root = doc.import_json(value);
        (doc, root)
    }

    pub fn parse_json(text: &str) -> Result<(Self, NodeId)> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_json(&value))
    }

    /// Add a JSON value to this document. Iterative, so deeply nested input
    /// cannot exhaust the call stack.
    pub fn import_json(&mut self, value: &Value) -> NodeId {
        enum Step<'v> {
            Visit(&'v Value),
            FinishSeq(usize),
            FinishMap(Vec<&'v String>),
        }

        let mut steps = vec![Step::Visit(value)];
        let mut built: Vec<NodeId> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(Value::Array(items)) => {
                    steps.push(Step::FinishSeq(items.len()));
                    steps.extend(items.iter().rev().map(Step::Visit));
                }
                Step::Visit(Value::Object(map)) => {
                    steps.push(Step::FinishMap(map.keys().collect()));
                    steps.extend(map.values().rev().map(Step::Visit));
                }
                Step::Visit(scalar) => {
                    let id = self.alloc(Node::Leaf(scalar_from_json(scalar)));
                    built.push(id);
                }
                Step::FinishSeq(len) => {
                    let items = built.split_off(built.len() - len);
                    let id = self.alloc(Node::Sequence(items));
                    built.push(id);
                }
                Step::FinishMap(keys) => {
                    let values = built.split_off(built.len() - keys.len());
                    let fields = keys.into_iter().cloned().zip(values).collect();
                    let id = self.alloc(Node::Mapping(fields));
                    built.push(id);
                }
            }
        }

        // Exactly one value remains: the root
        built.pop().unwrap_or_else(|| self.alloc(Node::Leaf(Scalar::Null)))
    }

    /// Export a sub-structure as JSON. Fails on cycles; shared sub-structures
    /// are duplicated.
    pub fn to_json(&self, root: NodeId) -> Result<Value> {
        enum Step<'d> {
            Visit(NodeId),
            FinishSeq(NodeId, usize),
            FinishMap(NodeId, &'d [(String, NodeId)]),
        }

        let mut steps = vec![Step::Visit(root)];
        let mut on_path: HashSet<NodeId> = HashSet::new();
        let mut built: Vec<Value> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(id) => match self.try_get(id)? {
                    Node::Leaf(scalar) => built.push(scalar_to_json(scalar)),
                    Node::Sequence(items) => {
                        if !on_path.insert(id) {
                            return Err(QueryError::CyclicStructure { node: id });
                        }
                        steps.push(Step::FinishSeq(id, items.len()));
                        steps.extend(items.iter().rev().map(|c| Step::Visit(*c)));
                    }
                    Node::Mapping(fields) => {
                        if !on_path.insert(id) {
                            return Err(QueryError::CyclicStructure { node: id });
                        }
                        steps.push(Step::FinishMap(id, fields.as_slice()));
                        steps.extend(fields.iter().rev().map(|(_, c)| Step::Visit(*c)));
                    }
                },
                Step::FinishSeq(id, len) => {
                    on_path.remove(&id);
                    let items = built.split_off(built.len() - len);
                    built.push(Value::Array(items));
                }
                Step::FinishMap(id, fields) => {
                    on_path.remove(&id);
                    let values = built.split_off(built.len() - fields.len());
                    let map: Map<String, Value> = fields
                        .iter()
                        .map(|(k, _)| k.clone())
                        .zip(values)
                        .collect();
                    built.push(Value::Object(map));
                }
            }
        }

        built
            .pop()
            .ok_or_else(|| QueryError::invalid_input("empty export"))
    }
}

fn upsert(fields: &mut Vec<(String, NodeId)>, key: String, id: NodeId) {
    match fields.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = id,
        None => fields.push((key, id)),
    }
}

fn scalar_from_json(value: &Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Bool(b) => Scalar::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Scalar::String(s.clone()),
        // Containers are handled by the caller
        Value::Array(_) | Value::Object(_) => Scalar::Null,
    }
}

fn scalar_to_json(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Integer(i) => Value::Number((*i).into()),
        // Non-finite floats have no JSON form
        Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Scalar::String(s) => Value::String(s.clone()),
    }
}

/// Borrowed `(document, id)` pair returned by lookups
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn node(&self) -> Option<&'a Node> {
        self.doc.get(self.id)
    }

    pub fn as_scalar(&self) -> Option<&'a Scalar> {
        match self.node()? {
            Node::Leaf(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        match self.as_scalar()? {
            Scalar::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.as_scalar()? {
            Scalar::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.as_scalar()? {
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar()? {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Found, but the value is null
    pub fn is_null(&self) -> bool {
        matches!(self.as_scalar(), Some(Scalar::Null))
    }

    pub fn to_json(&self) -> Result<Value> {
        self.doc.to_json(self.id)
    }
}
