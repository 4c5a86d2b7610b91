//! 32-bit x86, cdecl.
//!
//! Arguments travel on the stack, so the argument masks are empty. Only
//! `eax`-`ebx` have an addressable low byte.

use crate::{ArchDescriptor, FrameLayout, RegisterClass, RegisterCode, RegisterMask, RegisterSet};

pub const EAX: RegisterCode = 0;
pub const ECX: RegisterCode = 1;
pub const EDX: RegisterCode = 2;
pub const EBX: RegisterCode = 3;
pub const ESP: RegisterCode = 4;
pub const EBP: RegisterCode = 5;
pub const ESI: RegisterCode = 6;
pub const EDI: RegisterCode = 7;

pub const SCRATCH_FLOAT: RegisterCode = 7;

const ALL: RegisterMask = RegisterMask::low(8);
const VOLATILE: RegisterMask = RegisterMask::of_all(&[EAX, ECX, EDX]);
const RESERVED: RegisterMask = RegisterMask::of(ESP);
const FLOAT_RESERVED: RegisterMask = RegisterMask::of(SCRATCH_FLOAT);

/// 32-bit x86.
pub const X86: ArchDescriptor = ArchDescriptor {
    name: "x86",
    general: RegisterSet {
        class: RegisterClass::General,
        names: &["eax", "ecx", "edx", "ebx", "esp", "ebp", "esi", "edi"],
        allocatable_count: 7,
        all: ALL,
        volatile: VOLATILE,
        non_volatile: RegisterMask::of_all(&[EBX, EBP, ESI, EDI]),
        reserved: RESERVED,
        allocatable: ALL.without(RESERVED),
        argument: RegisterMask::EMPTY,
        // 64-bit results come back in edx:eax
        call_return: RegisterMask::of_all(&[EAX, EDX]),
        // boxed values come back as type tag in ecx, payload in edx
        js_call_return: RegisterMask::of_all(&[ECX, EDX]),
        wrapper: VOLATILE,
        temp: VOLATILE.without(RESERVED),
        single_byte: RegisterMask::of_all(&[EAX, ECX, EDX, EBX]),
    },
    float: RegisterSet {
        class: RegisterClass::Float,
        names: &["xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7"],
        allocatable_count: 7,
        all: ALL,
        volatile: ALL,
        non_volatile: RegisterMask::EMPTY,
        reserved: FLOAT_RESERVED,
        allocatable: ALL.without(FLOAT_RESERVED),
        argument: RegisterMask::EMPTY,
        call_return: RegisterMask::of(0),
        js_call_return: RegisterMask::EMPTY,
        wrapper: ALL,
        temp: ALL.without(FLOAT_RESERVED),
        single_byte: RegisterMask::EMPTY,
    },
    stack_pointer: ESP,
    frame: FrameLayout {
        stack_slot_size: 4,
        max_stack_slots: 256,
        double_stack_alignment: 2,
        frame_slack_size: 16,
        shadow_stack_space: 0,
        invalid_stack_slot: -1,
    },
};

const _: () = assert!(X86.check().is_ok());
