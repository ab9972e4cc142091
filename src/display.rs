//! Display formatting for contexts, node trees and run results
//!
//! Everything here returns a `String`; printing is left to the caller.

use crate::ast::{Node, Value};
use crate::context::Context;
use crate::eval::EvalError;
use crate::program::RunOutcome;
use serde_json::{json, Value as JsonValue};

/// Format a value for terminal display
pub fn format_value(val: &Value) -> String {
    match val {
        Value::Text(s) => format!("{:?}", s),
        _ => val.to_string(),
    }
}

/// Format a context top-first, one entry per line
pub fn format_context(ctx: &Context) -> String {
    format_entries(ctx.iter())
}

fn format_entries<'a>(entries: impl DoubleEndedIterator<Item = (&'a str, &'a Value)>) -> String {
    let lines: Vec<String> = entries
        .rev()
        .enumerate()
        .map(|(i, (key, val))| {
            let marker = if i == 0 { "top" } else { "   " };
            format!("{} {} = {}", marker, key, format_value(val))
        })
        .collect();
    if lines.is_empty() {
        "(empty)".to_string()
    } else {
        lines.join("\n")
    }
}

/// Render a node tree with box-drawing characters
///
/// ```text
/// composite
/// ├── simple
/// └── simple
/// ```
pub fn format_tree(node: &Node) -> String {
    let mut out = String::new();
    write_tree(node, "", None, &mut out);
    out.trim_end().to_string()
}

fn write_tree(node: &Node, prefix: &str, last: Option<bool>, out: &mut String) {
    let (branch, child_prefix) = match last {
        None => ("", prefix.to_string()),
        Some(true) => ("└── ", format!("{}    ", prefix)),
        Some(false) => ("├── ", format!("{}│   ", prefix)),
    };
    out.push_str(prefix);
    out.push_str(branch);
    match node {
        Node::Simple => out.push_str("simple\n"),
        Node::Composite { first, second } => {
            out.push_str("composite\n");
            write_tree(first, &child_prefix, Some(false), out);
            write_tree(second, &child_prefix, Some(true), out);
        }
    }
}

/// Plain-text summary of a successful run
pub fn format_outcome(outcome: &RunOutcome) -> String {
    if outcome.remaining.is_empty() {
        return outcome.value.to_string();
    }
    let leftovers = format_entries(outcome.remaining.iter().map(|(k, v)| (k.as_str(), v)));
    format!("{}\n\nunconsumed operands:\n{}", outcome.value, leftovers)
}

/// Structured form of a successful run
pub fn outcome_to_json(outcome: &RunOutcome) -> JsonValue {
    let remaining: Vec<JsonValue> = outcome
        .remaining
        .iter()
        .map(|(k, v)| json!([k, v.to_json()]))
        .collect();
    json!({
        "ok": true,
        "value": outcome.value,
        "remaining": remaining,
    })
}

/// Structured form of an evaluation failure
pub fn error_to_json(err: &EvalError) -> JsonValue {
    json!({
        "ok": false,
        "error": err.kind(),
        "message": err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_lists_top_first() {
        let mut ctx = Context::new();
        ctx.push("a", 1);
        ctx.push("b", "two");
        assert_eq!(format_context(&ctx), "top b = \"two\"\n    a = 1");
        assert_eq!(format_context(&Context::new()), "(empty)");
    }

    #[test]
    fn tree_rendering() {
        let tree = Node::composite(
            Node::composite(Node::simple(), Node::simple()),
            Node::simple(),
        );
        let expected = "composite\n├── composite\n│   ├── simple\n│   └── simple\n└── simple";
        assert_eq!(format_tree(&tree), expected);
    }

    #[test]
    fn outcome_json_shape() {
        let outcome = RunOutcome {
            value: 3,
            remaining: vec![("x".into(), Value::Nil)],
        };
        assert_eq!(
            outcome_to_json(&outcome),
            json!({"ok": true, "value": 3, "remaining": [["x", null]]})
        );
    }

    #[test]
    fn outcome_text_mentions_leftovers() {
        let outcome = RunOutcome {
            value: 3,
            remaining: vec![("x".into(), Value::Int(1))],
        };
        assert!(format_outcome(&outcome).contains("top x = 1"));
        let clean = RunOutcome { value: 9, remaining: vec![] };
        assert_eq!(format_outcome(&clean), "9");
    }
}
