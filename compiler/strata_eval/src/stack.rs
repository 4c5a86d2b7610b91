//! Bounded operand stack.

use crate::{EvalError, Value};

/// Default operand-stack limit.
pub const DEFAULT_STACK_LIMIT: usize = 64 * 1024;

/// LIFO operand stack with a hard depth limit.
///
/// Exceeding the limit is reported as `OperandStackOverflow`; nothing is
/// dropped to make room.
#[derive(Clone, Debug)]
pub struct OperandStack {
    values: Vec<Value>,
    limit: usize,
}

impl OperandStack {
    pub fn new(limit: usize) -> Self {
        OperandStack {
            values: Vec::new(),
            limit,
        }
    }

    #[inline]
    pub fn push(&mut self, value: Value) -> Result<(), EvalError> {
        if self.values.len() >= self.limit {
            return Err(EvalError::OperandStackOverflow { limit: self.limit });
        }
        self.values.push(value);
        Ok(())
    }

    /// Pop the top value. An empty stack means malformed bytecode at `pc`.
    #[inline]
    pub fn pop(&mut self, pc: usize) -> Result<Value, EvalError> {
        self.values
            .pop()
            .ok_or(EvalError::OperandStackUnderflow { pc })
    }

    #[inline]
    pub fn peek(&self) -> Option<&Value> {
        self.values.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::new(DEFAULT_STACK_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = OperandStack::default();
        assert!(stack.push(Value::int(1)).is_ok());
        assert!(stack.push(Value::int(2)).is_ok());
        assert_eq!(stack.pop(0), Ok(Value::int(2)));
        assert_eq!(stack.peek(), Some(&Value::int(1)));
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut stack = OperandStack::new(2);
        assert!(stack.push(Value::Null).is_ok());
        assert!(stack.push(Value::Null).is_ok());
        assert_eq!(
            stack.push(Value::Null),
            Err(EvalError::OperandStackOverflow { limit: 2 })
        );
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_underflow_is_fatal() {
        let mut stack = OperandStack::default();
        let err = stack.pop(7);
        assert_eq!(err, Err(EvalError::OperandStackUnderflow { pc: 7 }));
        assert!(err.is_err_and(|e| e.is_fatal()));
    }
}
