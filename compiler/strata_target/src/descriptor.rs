//! Architecture descriptors.
//!
//! A descriptor is a compile-time constant: both register classes, the stack
//! pointer, and the native frame layout constants. Differences between
//! targets and calling conventions live only in these values.

use crate::{RegisterClass, RegisterCode, RegisterError, RegisterSet};

/// Native stack frame layout constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameLayout {
    /// Bytes per spill slot.
    pub stack_slot_size: u32,
    pub max_stack_slots: u32,
    /// Slots a spilled double is aligned to.
    pub double_stack_alignment: u32,
    /// Bytes kept free below a compiled frame for the call sequence.
    pub frame_slack_size: u32,
    /// Bytes the caller reserves for the callee to spill register arguments.
    pub shadow_stack_space: u32,
    /// Marker for "no stack slot assigned".
    pub invalid_stack_slot: i32,
}

/// Register model of one target under one calling convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchDescriptor {
    pub(crate) name: &'static str,
    pub(crate) general: RegisterSet,
    pub(crate) float: RegisterSet,
    pub(crate) stack_pointer: RegisterCode,
    pub(crate) frame: FrameLayout,
}

impl ArchDescriptor {
    /// Short target name, e.g. `x64-sysv`.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn general(&self) -> &RegisterSet {
        &self.general
    }

    #[inline]
    pub const fn float(&self) -> &RegisterSet {
        &self.float
    }

    pub const fn registers(&self, class: RegisterClass) -> &RegisterSet {
        match class {
            RegisterClass::General => &self.general,
            RegisterClass::Float => &self.float,
        }
    }

    /// General-register code of the stack pointer.
    #[inline]
    pub const fn stack_pointer(&self) -> RegisterCode {
        self.stack_pointer
    }

    #[inline]
    pub const fn frame(&self) -> &FrameLayout {
        &self.frame
    }

    /// Check every invariant of the descriptor.
    ///
    /// Const-evaluable; [`ArchDescriptor::validate`] is the same check at run time.
    pub const fn check(&self) -> Result<(), RegisterError> {
        if let Err(e) = self.general.check() {
            return Err(e);
        }
        if let Err(e) = self.float.check() {
            return Err(e);
        }
        if !self.general.reserved.contains(self.stack_pointer) {
            return Err(RegisterError::StackPointerNotReserved {
                code: self.stack_pointer,
            });
        }
        if !self.frame.stack_slot_size.is_power_of_two() {
            return Err(RegisterError::BadStackSlotSize {
                size: self.frame.stack_slot_size,
            });
        }
        Ok(())
    }

    /// Run-time form of [`ArchDescriptor::check`].
    pub fn validate(&self) -> Result<(), RegisterError> {
        self.check()
    }
}
