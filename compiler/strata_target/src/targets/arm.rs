//! 32-bit ARM, AAPCS with hardware floating point.

use crate::{ArchDescriptor, FrameLayout, RegisterClass, RegisterCode, RegisterMask, RegisterSet};

pub const R0: RegisterCode = 0;
pub const R1: RegisterCode = 1;
pub const R2: RegisterCode = 2;
pub const R3: RegisterCode = 3;
pub const R12: RegisterCode = 12;
pub const SP: RegisterCode = 13;
pub const LR: RegisterCode = 14;
pub const PC: RegisterCode = 15;

/// Intra-procedure-call scratch register.
pub const SCRATCH: RegisterCode = R12;
pub const SCRATCH_FLOAT: RegisterCode = 15;

const ALL: RegisterMask = RegisterMask::low(16);
const ARGUMENTS: RegisterMask = RegisterMask::of_all(&[R0, R1, R2, R3]);
const VOLATILE: RegisterMask = ARGUMENTS.union(RegisterMask::of_all(&[R12, LR]));
/// `r4`-`r11`.
const NON_VOLATILE: RegisterMask = RegisterMask::low(12).without(ARGUMENTS);
const RESERVED: RegisterMask = RegisterMask::of_all(&[SCRATCH, SP, LR, PC]);
const FLOAT_VOLATILE: RegisterMask = RegisterMask::low(8);
const FLOAT_RESERVED: RegisterMask = RegisterMask::of(SCRATCH_FLOAT);

/// 32-bit ARM.
pub const ARM: ArchDescriptor = ArchDescriptor {
    name: "arm",
    general: RegisterSet {
        class: RegisterClass::General,
        names: &[
            "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "sp",
            "lr", "pc",
        ],
        allocatable_count: 12,
        all: ALL,
        volatile: VOLATILE,
        non_volatile: NON_VOLATILE,
        reserved: RESERVED,
        allocatable: ALL.without(RESERVED),
        argument: ARGUMENTS,
        call_return: RegisterMask::of_all(&[R0, R1]),
        js_call_return: RegisterMask::of_all(&[R2, R3]),
        wrapper: VOLATILE,
        temp: VOLATILE.without(RESERVED),
        // every core register has byte loads and stores
        single_byte: VOLATILE.union(NON_VOLATILE),
    },
    float: RegisterSet {
        class: RegisterClass::Float,
        names: &[
            "d0", "d1", "d2", "d3", "d4", "d5", "d6", "d7", "d8", "d9", "d10", "d11", "d12",
            "d13", "d14", "d15",
        ],
        allocatable_count: 15,
        all: ALL,
        volatile: FLOAT_VOLATILE,
        non_volatile: ALL.without(FLOAT_VOLATILE),
        reserved: FLOAT_RESERVED,
        allocatable: ALL.without(FLOAT_RESERVED),
        argument: FLOAT_VOLATILE,
        call_return: RegisterMask::of(0),
        js_call_return: RegisterMask::EMPTY,
        wrapper: FLOAT_VOLATILE,
        temp: FLOAT_VOLATILE.without(FLOAT_RESERVED),
        single_byte: RegisterMask::EMPTY,
    },
    stack_pointer: SP,
    frame: FrameLayout {
        stack_slot_size: 4,
        max_stack_slots: 256,
        double_stack_alignment: 2,
        frame_slack_size: 20,
        shadow_stack_space: 0,
        invalid_stack_slot: -1,
    },
};

const _: () = assert!(ARM.check().is_ok());
