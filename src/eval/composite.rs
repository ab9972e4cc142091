use super::{EvalError, Walker};
use crate::ast::Node;
use tracing::trace;

impl Walker<'_> {
    /// Composite add. `second` is never entered if `first` fails.
    ///
    /// Children return `i32` directly, so the int check on their results
    /// is carried by the type rather than done here.
    pub(super) fn eval_composite(
        &mut self,
        first: &Node,
        second: &Node,
        depth: usize,
    ) -> Result<i32, EvalError> {
        let a = self.eval_node(first, depth + 1)?;
        let b = self.eval_node(second, depth + 1)?;
        let sum = a.wrapping_add(b);
        trace!(depth, first = a, second = b, sum, "composite add");
        Ok(sum)
    }
}
