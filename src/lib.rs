//! H# - a stack-consuming expression interpreter
//!
//! # Overview
//!
//! An H# program is a tree of add nodes evaluated against an operand
//! stack (the *context*). Operands are pushed by name before evaluation;
//! the last one pushed is the top of the stack.
//!
//! # Core Concepts
//!
//! ## Simple nodes
//!
//! ```text
//! # Pops the top two operands and adds them
//! [a=3, b=4]  simple      # pops b, then a -> 7, context now empty
//! ```
//!
//! ## Composite nodes
//!
//! ```text
//! # Evaluate first, then second, add the results
//! [w=10, x=5, y=3, z=4]  composite(simple, simple)
//!                         # first pops z,y -> 7; second pops x,w -> 15; -> 22
//! ```
//!
//! Pops are destructive and evaluation stops at the first error.
//!
//! # Example
//!
//! ```rust
//! use hellsharp::{Context, Node};
//!
//! let mut ctx = Context::new();
//! ctx.push("a", 3);
//! ctx.push("b", 4);
//! let value = Node::simple().evaluate(&mut ctx).unwrap();
//! assert_eq!(value, 7);
//! assert!(ctx.is_empty());
//! ```

pub mod ast;
pub mod context;
pub mod display;
pub mod eval;
pub mod program;

// Re-export commonly used items
pub use ast::{Node, Value};
pub use context::Context;
pub use eval::{evaluate, evaluate_with, EvalError};
pub use program::{Program, ProgramError, RunOutcome};

/// Convenience function to run a JSON program in a fresh context
pub fn run(source: &str) -> Result<i32, ProgramError> {
    let program = Program::from_json(source)?;
    let outcome = program.run(context::DEFAULT_CAPACITY)?;
    Ok(outcome.value)
}
