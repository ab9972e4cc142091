//! AST for H# - values and expression nodes
//!
//! Two things live here:
//! - `Value`: what sits in the evaluation context (one variant at a time)
//! - `Node`: the expression tree that consumes the context
//!
//! Nodes form an owned tree. A composite node exclusively owns its two
//! children; nothing is shared and there are no cycles.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// A value that can be pushed into the context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A 32-bit signed integer (the only type `add` accepts)
    Int(i32),
    /// A text value
    Text(String),
    /// A boolean value
    Bool(bool),
    /// Nil - no value
    Nil,
}

impl Value {
    /// Returns the integer payload, or None for every other variant
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Text(_) | Value::Bool(_) | Value::Nil => None,
        }
    }

    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Text(_) => "text",
            Value::Bool(_) => "bool",
            Value::Nil => "nil",
        }
    }

    /// Convert to a JSON value for structured output
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Int(n) => JsonValue::Number((*n).into()),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Nil => JsonValue::Null,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Nil => write!(f, "nil"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// An expression node in the H# language
///
/// Serialized externally tagged: `"simple"` or
/// `{"composite": {"first": ..., "second": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Node {
    /// Pops the top two operands off the context and adds them
    Simple,
    /// Evaluates `first`, then `second`, and adds the results.
    /// Never touches the context itself.
    Composite { first: Box<Node>, second: Box<Node> },
}

impl Node {
    pub fn simple() -> Self {
        Node::Simple
    }

    pub fn composite(first: Node, second: Node) -> Self {
        Node::Composite {
            first: Box::new(first),
            second: Box::new(second),
        }
    }

    /// Height of the tree; a lone simple node has depth 1
    pub fn depth(&self) -> usize {
        match self {
            Node::Simple => 1,
            Node::Composite { first, second } => 1 + first.depth().max(second.depth()),
        }
    }

    /// Number of simple leaves in the tree
    pub fn simple_count(&self) -> usize {
        match self {
            Node::Simple => 1,
            Node::Composite { first, second } => first.simple_count() + second.simple_count(),
        }
    }

    /// Operands a full, successful evaluation consumes from the context
    pub fn operands_required(&self) -> usize {
        self.simple_count() * 2
    }

    pub fn is_simple(&self) -> bool {
        matches!(self, Node::Simple)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_int_only_matches_int() {
        assert_eq!(Value::Int(7).as_int(), Some(7));
        assert_eq!(Value::from("7").as_int(), None);
        assert_eq!(Value::Bool(true).as_int(), None);
        assert_eq!(Value::Nil.as_int(), None);
    }

    #[test]
    fn value_deserializes_untagged() {
        let vals: Vec<Value> = serde_json::from_str(r#"[3, "x", false, null]"#).unwrap();
        assert_eq!(
            vals,
            vec![Value::Int(3), Value::from("x"), Value::Bool(false), Value::Nil]
        );
    }

    #[test]
    fn value_rejects_out_of_range_numbers() {
        assert!(serde_json::from_str::<Value>("4294967296").is_err());
        assert!(serde_json::from_str::<Value>("1.5").is_err());
    }

    #[test]
    fn node_shape_helpers() {
        let tree = Node::composite(
            Node::composite(Node::simple(), Node::simple()),
            Node::simple(),
        );
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.simple_count(), 3);
        assert_eq!(tree.operands_required(), 6);
        assert!(!tree.is_simple());
    }

    #[test]
    fn node_json_shape() {
        let tree = Node::composite(Node::simple(), Node::simple());
        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json, r#"{"composite":{"first":"simple","second":"simple"}}"#);
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tree);
    }
}
