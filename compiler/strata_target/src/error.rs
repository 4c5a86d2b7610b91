//! Register-model errors.

use crate::{RegisterClass, RegisterCode, RegisterMask};

/// A query against, or a consistency check of, an architecture descriptor failed.
///
/// Every variant is `Copy` so descriptors can be checked in `const` context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
    /// The caller is using the wrong descriptor for this code.
    #[error("{class} register code {code} out of range (class has {total})")]
    CodeOutOfRange {
        class: RegisterClass,
        code: RegisterCode,
        total: u32,
    },

    #[error("{class} class has {total} registers; masks hold at most 32")]
    TooManyRegisters { class: RegisterClass, total: u32 },

    #[error("{class} register {code} has an empty name")]
    EmptyName { class: RegisterClass, code: RegisterCode },

    #[error("{class} register {code} reuses the name of an earlier register")]
    DuplicateName { class: RegisterClass, code: RegisterCode },

    #[error("{class} {role} mask {mask} names registers outside the class")]
    OutsideClass {
        class: RegisterClass,
        role: &'static str,
        mask: RegisterMask,
    },

    #[error("{class} registers {overlap} are both volatile and non-volatile")]
    OverlappingSaveRoles {
        class: RegisterClass,
        overlap: RegisterMask,
    },

    #[error("{class} allocatable mask is {actual}, expected all registers minus reserved ({expected})")]
    AllocatableMismatch {
        class: RegisterClass,
        expected: RegisterMask,
        actual: RegisterMask,
    },

    #[error("{class} class declares {declared} allocatable registers but its mask holds {actual}")]
    AllocatableCountMismatch {
        class: RegisterClass,
        declared: u32,
        actual: u32,
    },

    #[error("{class} allocatable registers {mask} are neither volatile nor non-volatile")]
    UnclassifiedAllocatable {
        class: RegisterClass,
        mask: RegisterMask,
    },

    #[error("{class} temp mask is {actual}, expected volatile minus reserved ({expected})")]
    TempMismatch {
        class: RegisterClass,
        expected: RegisterMask,
        actual: RegisterMask,
    },

    #[error("stack pointer (code {code}) must be a reserved general register")]
    StackPointerNotReserved { code: RegisterCode },

    #[error("stack slot size {size} is not a power of two")]
    BadStackSlotSize { size: u32 },
}
