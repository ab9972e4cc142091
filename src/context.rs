//! Evaluation context - the operand stack for simple nodes
//!
//! The context is an insertion-ordered map from operand name to value.
//! The most recently inserted key is the top of the stack. Keys are
//! unique: pushing an existing key is rejected, never overwritten.
//!
//! ```text
//! push(a, 3); push(b, 4)   # [a=3, b=4]   top = b
//! pop(b)                   # [a=3]        top = a
//! push(a, 9)               # rejected, still [a=3]
//! ```

use crate::ast::Value;
use tracing::trace;

/// Preallocated slots for a fresh context
pub const DEFAULT_CAPACITY: usize = 20;

/// Upper bound on preallocation; larger requests are clamped
pub const MAX_CAPACITY: usize = 1 << 16;

/// One evaluation session's operand stack
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    /// Entries bottom to top
    entries: Vec<(String, Value)>,
}

impl Context {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Preallocate `capacity` slots, clamped to `MAX_CAPACITY`
    pub fn with_capacity(capacity: usize) -> Self {
        Context {
            entries: Vec::with_capacity(capacity.min(MAX_CAPACITY)),
        }
    }

    /// Build a context from operands in push order.
    /// Fails on the first duplicate key, returning that key.
    pub fn from_operands<K, I>(operands: I) -> Result<Self, String>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::from_operands_with_capacity(DEFAULT_CAPACITY, operands)
    }

    /// Same as `from_operands`, preallocating `capacity` slots
    pub fn from_operands_with_capacity<K, I>(capacity: usize, operands: I) -> Result<Self, String>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut ctx = Context::with_capacity(capacity);
        for (key, value) in operands {
            let key = key.into();
            if !ctx.push(key.clone(), value) {
                return Err(key);
            }
        }
        Ok(ctx)
    }

    /// Insert `key` as the new top. Returns false (and changes nothing)
    /// if the key is already present.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if self.position(&key).is_some() {
            trace!(key = %key, "push rejected: duplicate key");
            return false;
        }
        trace!(key = %key, depth = self.entries.len() + 1, "push");
        self.entries.push((key, value.into()));
        true
    }

    /// Remove `key`. Returns false (and changes nothing) if absent.
    pub fn pop(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    /// Remove `key` and hand back its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let idx = self.position(key)?;
        let (_, value) = self.entries.remove(idx);
        trace!(key, remaining = self.entries.len(), "pop");
        Some(value)
    }

    /// Most recently inserted remaining key
    pub fn peek_top_key(&self) -> Option<&str> {
        self.entries.last().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries bottom to top
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Consume the context, yielding the remaining entries bottom to top
    pub fn into_entries(self) -> Vec<(String, Value)> {
        self.entries
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}
