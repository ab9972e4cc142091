use super::{EvalError, Walker, ADD_ARITY};
use crate::ast::Value;
use tracing::trace;

impl Walker<'_> {
    /// Simple add: pop the top operand, then the new top, then add.
    /// Both pops happen before the type check.
    pub(super) fn eval_simple(&mut self, depth: usize) -> Result<i32, EvalError> {
        let available = self.ctx.len();
        if available < ADD_ARITY {
            return Err(EvalError::EmptyStack {
                needed: ADD_ARITY,
                available,
            });
        }

        let (first_key, first) = self.pop_top()?;
        let (second_key, second) = self.pop_top()?;

        let a = expect_int(&first_key, &first)?;
        let b = expect_int(&second_key, &second)?;
        let sum = a.wrapping_add(b);
        trace!(depth, first = a, second = b, sum, "simple add");
        Ok(sum)
    }

    fn pop_top(&mut self) -> Result<(String, Value), EvalError> {
        let key = self
            .ctx
            .peek_top_key()
            .map(str::to_owned)
            .ok_or_else(|| EvalError::UndefinedOperand("top of stack".into()))?;
        match self.ctx.remove(&key) {
            Some(value) => Ok((key, value)),
            None => Err(EvalError::UndefinedOperand(key)),
        }
    }
}

fn expect_int(key: &str, value: &Value) -> Result<i32, EvalError> {
    value.as_int().ok_or_else(|| EvalError::NonIntegerOperand {
        key: key.to_string(),
        got: value.type_name(),
    })
}
