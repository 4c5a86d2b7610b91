//! Evaluation errors.
//!
//! # Categories
//!
//! Every error reports an [`ErrorCategory`] so a host can tell a compiler bug
//! from a language-level failure:
//! - `Fatal`: the code unit is inconsistent (bad index, truncated bytecode,
//!   unbalanced frame pop). Abort the execution unit.
//! - `Runtime`: a well-formed program failed (unresolved name, read before
//!   initialization, write to an immutable binding). Convert to a
//!   language-visible exception.
//! - `Resource`: a limit was hit (operand stack).
//! - `Interrupt`: the host asked the loop to stop.

use strata_ir::LoadError;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse classification of an [`EvalError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Fatal,
    Runtime,
    Resource,
    Interrupt,
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    // Runtime
    #[error("unresolved binding: {name}")]
    UnresolvedBinding { name: String },

    #[error("binding used before initialization: {name}")]
    UsedBeforeInitialization { name: String },

    #[error("cannot assign to immutable binding: {name}")]
    ImmutableBinding { name: String },

    // Resource
    #[error("operand stack overflow (limit {limit})")]
    OperandStackOverflow { limit: usize },

    // Interrupt
    #[error("interrupted at pc {pc}")]
    Interrupted { pc: usize },

    // Fatal
    #[error("malformed code unit: {0}")]
    Malformed(#[from] LoadError),

    #[error("operand stack underflow at pc {pc}")]
    OperandStackUnderflow { pc: usize },

    #[error("cannot pop the base frame")]
    FrameUnderflow,
}

impl EvalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EvalError::UnresolvedBinding { .. }
            | EvalError::UsedBeforeInitialization { .. }
            | EvalError::ImmutableBinding { .. } => ErrorCategory::Runtime,
            EvalError::OperandStackOverflow { .. } => ErrorCategory::Resource,
            EvalError::Interrupted { .. } => ErrorCategory::Interrupt,
            EvalError::Malformed(_)
            | EvalError::OperandStackUnderflow { .. }
            | EvalError::FrameUnderflow => ErrorCategory::Fatal,
        }
    }

    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Fatal
    }
}

// Constructors

pub fn unresolved_binding(name: impl Into<String>) -> EvalError {
    EvalError::UnresolvedBinding { name: name.into() }
}

pub fn used_before_initialization(name: impl Into<String>) -> EvalError {
    EvalError::UsedBeforeInitialization { name: name.into() }
}

pub fn immutable_binding(name: impl Into<String>) -> EvalError {
    EvalError::ImmutableBinding { name: name.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(unresolved_binding("x").category(), ErrorCategory::Runtime);
        assert_eq!(
            EvalError::OperandStackOverflow { limit: 4 }.category(),
            ErrorCategory::Resource
        );
        assert!(EvalError::FrameUnderflow.is_fatal());
        assert!(EvalError::from(LoadError::MultinameOutOfRange { index: 3, len: 2 }).is_fatal());
        assert!(!EvalError::Interrupted { pc: 0 }.is_fatal());
    }

    #[test]
    fn test_messages() {
        assert_eq!(unresolved_binding("b").to_string(), "unresolved binding: b");
        assert_eq!(
            EvalError::from(LoadError::MultinameOutOfRange { index: 3, len: 2 }).to_string(),
            "malformed code unit: multiname index 3 out of range (table has 2)"
        );
    }
}
