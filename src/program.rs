//! Loadable H# programs
//!
//! A program is a list of operands to push (in order) plus the root node
//! to evaluate. Programs are plain JSON data:
//!
//! ```text
//! {
//!   "operands": [["a", 3], ["b", 4]],
//!   "root": "simple"
//! }
//! ```

use crate::ast::{Node, Value};
use crate::context::Context;
use crate::eval::{evaluate_with, EvalError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid program: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate operand: {0}")]
    DuplicateOperand(String),
    #[error("{0}")]
    Eval(#[from] EvalError),
}

/// A root node plus the operands it runs against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    #[serde(default)]
    pub operands: Vec<(String, Value)>,
    pub root: Node,
}

/// Result of running a program
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Value the root evaluated to
    pub value: i32,
    /// Operands left unconsumed, bottom to top
    pub remaining: Vec<(String, Value)>,
}

impl Program {
    pub fn new(root: Node) -> Self {
        Program {
            operands: Vec::new(),
            root,
        }
    }

    /// Append an operand (builder style)
    pub fn with_operand(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.operands.push((key.into(), value.into()));
        self
    }

    pub fn from_json(source: &str) -> Result<Self, ProgramError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProgramError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String, ProgramError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the evaluation context for one session
    pub fn context(&self, capacity: usize) -> Result<Context, ProgramError> {
        let capacity = capacity.max(self.operands.len());
        Context::from_operands_with_capacity(capacity, self.operands.iter().cloned())
            .map_err(ProgramError::DuplicateOperand)
    }

    /// Run in a fresh context
    pub fn run(&self, capacity: usize) -> Result<RunOutcome, ProgramError> {
        self.run_with(capacity, |_, _| {})
    }

    /// Run in a fresh context, reporting every entered node to `observer`
    pub fn run_with<F>(&self, capacity: usize, observer: F) -> Result<RunOutcome, ProgramError>
    where
        F: FnMut(&Node, usize),
    {
        let mut ctx = self.context(capacity)?;
        if ctx.len() < self.root.operands_required() {
            info!(
                have = ctx.len(),
                need = self.root.operands_required(),
                "program has fewer operands than the tree consumes"
            );
        }
        let value = evaluate_with(&self.root, &mut ctx, observer)?;
        Ok(RunOutcome {
            value,
            remaining: ctx.into_entries(),
        })
    }
}

/// Built-in demonstration programs, by name
pub mod demos {
    use super::{Program, ProgramError};

    const SIMPLE: &str = include_str!("../demos/simple.json");
    const COMPOSITE: &str = include_str!("../demos/composite.json");
    const UNDERFLOW: &str = include_str!("../demos/underflow.json");
    const TEXT: &str = include_str!("../demos/text.json");

    /// Name and one-line description of every demo
    pub const ALL: &[(&str, &str)] = &[
        ("simple", "3 + 4 popped straight off the stack"),
        ("composite", "(3 + 4) + (10 + 5) across two simple nodes"),
        ("underflow", "a simple node with only one operand available"),
        ("text", "a text operand on top of the stack"),
    ];

    pub fn source(name: &str) -> Option<&'static str> {
        match name {
            "simple" => Some(SIMPLE),
            "composite" => Some(COMPOSITE),
            "underflow" => Some(UNDERFLOW),
            "text" => Some(TEXT),
            _ => None,
        }
    }

    pub fn load(name: &str) -> Option<Result<Program, ProgramError>> {
        source(name).map(Program::from_json)
    }
}
