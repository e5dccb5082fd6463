//! Test fixtures

#![allow(dead_code)]

use nested_query::{Document, Node, NodeId, PathSegment};
use serde_json::{json, Value};

/// Build a document from JSON
pub fn json_doc(value: Value) -> (Document, NodeId) {
    Document::from_json(&value)
}

/// `[{data: [{foo:"foo"},{bar:"bar"},{fizz:"fizz"},{name:"buzz"}]}]`
pub fn data_list() -> (Document, NodeId) {
    json_doc(json!([
        {
            "data": [
                {"foo": "foo"},
                {"bar": "bar"},
                {"fizz": "fizz"},
                {"name": "buzz"}
            ]
        }
    ]))
}

/// A mapping whose `child.parent` field points back at the root mapping
pub fn parent_cycle() -> (Document, NodeId) {
    let mut doc = Document::new();
    let root = doc.empty_mapping();
    let child = doc.empty_mapping();
    let label = doc.string("leaf");
    doc.insert(child, "label", label).unwrap();
    doc.insert(root, "child", child).unwrap();
    doc.insert(child, "parent", root).unwrap();
    (doc, root)
}

/// `depth` nested single-element sequences around an integer leaf
pub fn nested_sequences(depth: usize) -> (Document, NodeId) {
    let mut doc = Document::with_capacity(depth + 1);
    let mut current = doc.integer(7);
    for _ in 0..depth {
        current = doc.sequence(vec![current]).unwrap();
    }
    (doc, current)
}

/// Follow `path` from `root`
pub fn resolve_path(doc: &Document, root: NodeId, path: &[PathSegment]) -> Option<NodeId> {
    let mut current = root;
    for segment in path {
        current = match (doc.get(current)?, segment) {
            (Node::Sequence(items), PathSegment::Index(i)) => *items.get(*i)?,
            (node @ Node::Mapping(_), PathSegment::Key(k)) => node.field(k)?,
            _ => return None,
        };
    }
    Some(current)
}

/// `levels` sequences, each holding its predecessor twice, over `{"k": 1}`.
///
/// `levels + 2` distinct nodes but `2^levels` routes to the bottom mapping.
pub fn doubling_dag(levels: usize) -> (Document, NodeId) {
    let mut doc = Document::new();
    let one = doc.integer(1);
    let mut top = doc.mapping(vec![("k", one)]).unwrap();
    for _ in 0..levels {
        top = doc.sequence(vec![top, top]).unwrap();
    }
    (doc, top)
}
