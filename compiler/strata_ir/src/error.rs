//! Load-time and decode errors.
//!
//! Every variant describes a code unit that is inconsistent with itself:
//! an upstream compiler or loader bug. The evaluator treats them as fatal.

use crate::InternError;

/// A malformed or internally inconsistent code unit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("multiname index {index} out of range (table has {len})")]
    MultinameOutOfRange { index: usize, len: usize },

    #[error("frame template index {index} out of range (arena has {len})")]
    FrameOutOfRange { index: usize, len: usize },

    #[error("constant index {index} out of range (pool has {len})")]
    ConstantOutOfRange { index: usize, len: usize },

    #[error("unknown opcode 0x{opcode:02x} at offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("truncated operand at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedOperand {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("frame template {child} names parent {parent}, which is not an earlier template")]
    ParentNotDeclared { child: usize, parent: usize },

    #[error("frame template {frame} declares slot `{name}` more than once")]
    DuplicateSlot { frame: usize, name: String },

    #[error("table exceeds 16-bit operand width ({len} entries)")]
    TableTooLarge { len: usize },

    #[error(transparent)]
    Intern(#[from] InternError),

    #[cfg(feature = "serde")]
    #[error("cannot decode code-unit image: {0}")]
    Image(String),
}
