//! Common test utilities for hellsharp integration tests

pub use hellsharp::{evaluate, evaluate_with, Context, EvalError, Node, Value};

/// Build a context from (key, value) pairs, pushed in order
#[allow(dead_code)]
pub fn context(operands: &[(&str, Value)]) -> Context {
    let mut ctx = Context::new();
    for (key, value) in operands {
        assert!(ctx.push(*key, value.clone()), "duplicate operand {}", key);
    }
    ctx
}

/// Build a context of integer operands, pushed in order
#[allow(dead_code)]
pub fn int_context(operands: &[(&str, i32)]) -> Context {
    let mut ctx = Context::new();
    for (key, value) in operands {
        assert!(ctx.push(*key, *value), "duplicate operand {}", key);
    }
    ctx
}

/// A composite chain `depth` levels deep; every level's first child is a
/// simple node and the deepest level has two simple children
#[allow(dead_code)]
pub fn left_simple_chain(depth: usize) -> Node {
    let mut node = Node::composite(Node::simple(), Node::simple());
    for _ in 1..depth {
        node = Node::composite(Node::simple(), node);
    }
    node
}
