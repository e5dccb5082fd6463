//! Node model
//!
//! A node's shape is fixed when it is created: sequence, mapping or leaf.
//! Containers hold child `NodeId`s into the owning `Document`.

use std::fmt;

/// Arena index of a node (its structural identity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Leaf value
#[derive(Debug, Clone)]
pub enum Scalar {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Scalar {
    /// Primitive type name; `Integer` and `Float` are both "number"
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "boolean",
            Scalar::Integer(_) | Scalar::Float(_) => "number",
            Scalar::String(_) => "string",
        }
    }

    /// Same primitive type and same value.
    ///
    /// Numbers compare numerically across `Integer`/`Float`; NaN is never equal.
    pub fn strict_eq(&self, other: &Scalar) -> bool {
        match (self, other) {
            (Scalar::Null, Scalar::Null) => true,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Integer(a), Scalar::Integer(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Integer(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Integer(a)) => {
                int_eq_float(*a, *b)
            }
            (Scalar::String(a), Scalar::String(b)) => a == b,
            _ => false,
        }
    }
}

/// Exact comparison; `i64 as f64` alone would round large integers.
fn int_eq_float(i: i64, f: f64) -> bool {
    if f.fract() != 0.0 || !f.is_finite() {
        return false;
    }
    // 2^63 is exactly representable; anything at or above it is out of i64 range
    if f >= 9_223_372_036_854_775_808.0 || f < -9_223_372_036_854_775_808.0 {
        return false;
    }
    f as i64 == i
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.strict_eq(other)
    }
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Scalar::Integer(v)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Scalar::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Scalar::String(v)
    }
}

/// Node shape
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Ordered, index-addressed children
    Sequence(Vec<NodeId>),
    /// Unique string keys in insertion order
    Mapping(Vec<(String, NodeId)>),
    Leaf(Scalar),
}

impl Node {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
            Node::Leaf(_) => "leaf",
        }
    }

    pub fn is_container(&self) -> bool {
        !matches!(self, Node::Leaf(_))
    }

    /// Own-field lookup. Only mappings have fields.
    pub fn field(&self, key: &str) -> Option<NodeId> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, id)| *id),
            _ => None,
        }
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.field(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_same_type_same_value() {
        assert_eq!(Scalar::from("foo"), Scalar::from("foo"));
        assert_ne!(Scalar::from("foo"), Scalar::from("bar"));
        assert_eq!(Scalar::Null, Scalar::Null);
        assert_eq!(Scalar::Bool(true), Scalar::Bool(true));
    }

    #[test]
    fn test_scalar_type_mismatch_never_equal() {
        assert_ne!(Scalar::from("1"), Scalar::Integer(1));
        assert_ne!(Scalar::Bool(false), Scalar::Integer(0));
        assert_ne!(Scalar::Null, Scalar::Bool(false));
        assert_ne!(Scalar::Null, Scalar::from(""));
    }

    #[test]
    fn test_numbers_compare_across_representations() {
        assert_eq!(Scalar::Integer(2), Scalar::Float(2.0));
        assert_eq!(Scalar::Float(2.0), Scalar::Integer(2));
        assert_ne!(Scalar::Integer(2), Scalar::Float(2.5));
        assert_eq!(Scalar::Integer(1).type_name(), Scalar::Float(1.0).type_name());
    }

    #[test]
    fn test_large_integer_not_equal_to_rounded_float() {
        // i64::MAX as f64 rounds up to 2^63
        assert_ne!(Scalar::Integer(i64::MAX), Scalar::Float(i64::MAX as f64));
        assert_eq!(Scalar::Integer(i64::MIN), Scalar::Float(i64::MIN as f64));
    }

    #[test]
    fn test_nan_never_equal() {
        assert_ne!(Scalar::Float(f64::NAN), Scalar::Float(f64::NAN));
        assert_ne!(Scalar::Integer(0), Scalar::Float(f64::NAN));
    }

    #[test]
    fn test_only_mappings_have_fields() {
        let mapping = Node::Mapping(vec![("a".to_string(), NodeId(1))]);
        assert_eq!(mapping.field("a"), Some(NodeId(1)));
        assert!(!mapping.has_field("b"));

        let sequence = Node::Sequence(vec![NodeId(1)]);
        assert!(!sequence.has_field("0"));

        let leaf = Node::Leaf(Scalar::from("a"));
        assert!(!leaf.has_field("a"));
    }
}
