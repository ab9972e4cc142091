//! Evaluator for H# - recursive evaluation of node trees against a context
//!
//! - Simple nodes pop the top two operands and add them
//! - Composite nodes evaluate `first`, then `second`, and add the results
//!
//! Pops are destructive: an operand consumed by a simple node is gone,
//! even if the evaluation then fails its type check. Errors propagate
//! unchanged to the caller; the first failing child stops the walk.

mod composite;
mod simple;

use crate::ast::Node;
use crate::context::Context;
use thiserror::Error;
use tracing::debug;

/// Operands a simple add consumes
pub const ADD_ARITY: usize = 2;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("H# program error: empty stack: add needs {needed} operands, found {available}")]
    EmptyStack { needed: usize, available: usize },
    #[error("H# program error: non-integer operand: `{key}` is {got}, expected int")]
    NonIntegerOperand { key: String, got: &'static str },
    #[error("H# program error: undefined operand: {0}")]
    UndefinedOperand(String),
}

impl EvalError {
    /// Stable identifier for the error condition
    pub fn kind(&self) -> &'static str {
        match self {
            EvalError::EmptyStack { .. } => "empty-stack",
            EvalError::NonIntegerOperand { .. } => "non-integer-operand",
            EvalError::UndefinedOperand(_) => "undefined-operand",
        }
    }
}

/// Walks a node tree against one context, reporting each entered node
pub(crate) struct Walker<'a> {
    pub(crate) ctx: &'a mut Context,
    observer: &'a mut dyn FnMut(&Node, usize),
}

impl Walker<'_> {
    pub(crate) fn eval_node(&mut self, node: &Node, depth: usize) -> Result<i32, EvalError> {
        (self.observer)(node, depth);
        match node {
            Node::Simple => self.eval_simple(depth),
            Node::Composite { first, second } => self.eval_composite(first, second, depth),
        }
    }
}

/// Evaluate `node` against `ctx`
pub fn evaluate(node: &Node, ctx: &mut Context) -> Result<i32, EvalError> {
    evaluate_with(node, ctx, |_, _| {})
}

/// Evaluate `node` against `ctx`, calling `observer(node, depth)` on
/// entry to every node. The root has depth 0.
pub fn evaluate_with<F>(node: &Node, ctx: &mut Context, mut observer: F) -> Result<i32, EvalError>
where
    F: FnMut(&Node, usize),
{
    debug!(depth = node.depth(), operands = ctx.len(), "evaluate");
    let mut walker = Walker {
        ctx,
        observer: &mut observer,
    };
    let result = walker.eval_node(node, 0);
    match &result {
        Ok(value) => debug!(value, "evaluation finished"),
        Err(e) => debug!(kind = e.kind(), error = %e, "evaluation failed"),
    }
    result
}

impl Node {
    /// Evaluate this node as the root of an evaluation session
    pub fn evaluate(&self, ctx: &mut Context) -> Result<i32, EvalError> {
        evaluate(self, ctx)
    }
}
