//! x86-64, System V and Windows calling conventions.
//!
//! Both conventions share one register file. Windows additionally treats
//! `rsi`, `rdi` and `xmm6`-`xmm15` as callee-saved, passes only four
//! arguments in registers, and has the caller reserve 32 bytes of shadow
//! space.

use crate::{ArchDescriptor, FrameLayout, RegisterClass, RegisterCode, RegisterMask, RegisterSet};

pub const RAX: RegisterCode = 0;
pub const RCX: RegisterCode = 1;
pub const RDX: RegisterCode = 2;
pub const RBX: RegisterCode = 3;
pub const RSP: RegisterCode = 4;
pub const RBP: RegisterCode = 5;
pub const RSI: RegisterCode = 6;
pub const RDI: RegisterCode = 7;
pub const R8: RegisterCode = 8;
pub const R9: RegisterCode = 9;
pub const R10: RegisterCode = 10;
pub const R11: RegisterCode = 11;
pub const R12: RegisterCode = 12;
pub const R13: RegisterCode = 13;
pub const R14: RegisterCode = 14;
pub const R15: RegisterCode = 15;

/// Scratch register used by the macro assembler.
pub const SCRATCH: RegisterCode = R11;
/// Scratch float register used by the macro assembler.
pub const SCRATCH_FLOAT: RegisterCode = 15;

const GENERAL_NAMES: &[&str] = &[
    "rax", "rcx", "rdx", "rbx", "rsp", "rbp", "rsi", "rdi", "r8", "r9", "r10", "r11", "r12",
    "r13", "r14", "r15",
];

const FLOAT_NAMES: &[&str] = &[
    "xmm0", "xmm1", "xmm2", "xmm3", "xmm4", "xmm5", "xmm6", "xmm7", "xmm8", "xmm9", "xmm10",
    "xmm11", "xmm12", "xmm13", "xmm14", "xmm15",
];

const ALL: RegisterMask = RegisterMask::low(16);
const RESERVED: RegisterMask = RegisterMask::of_all(&[RSP, SCRATCH]);
const FLOAT_RESERVED: RegisterMask = RegisterMask::of(SCRATCH_FLOAT);

const fn general(volatile: RegisterMask, non_volatile: RegisterMask, argument: RegisterMask) -> RegisterSet {
    RegisterSet {
        class: RegisterClass::General,
        names: GENERAL_NAMES,
        allocatable_count: 14,
        all: ALL,
        volatile,
        non_volatile,
        reserved: RESERVED,
        allocatable: ALL.without(RESERVED),
        argument,
        call_return: RegisterMask::of(RAX),
        js_call_return: RegisterMask::of(RCX),
        wrapper: volatile,
        temp: volatile.without(RESERVED),
        single_byte: volatile.union(non_volatile),
    }
}

const fn float(volatile: RegisterMask, argument: RegisterMask) -> RegisterSet {
    RegisterSet {
        class: RegisterClass::Float,
        names: FLOAT_NAMES,
        allocatable_count: 15,
        all: ALL,
        volatile,
        non_volatile: ALL.without(volatile),
        reserved: FLOAT_RESERVED,
        allocatable: ALL.without(FLOAT_RESERVED),
        argument,
        call_return: RegisterMask::of(0),
        js_call_return: RegisterMask::EMPTY,
        wrapper: volatile,
        temp: volatile.without(FLOAT_RESERVED),
        single_byte: RegisterMask::EMPTY,
    }
}

const fn frame(shadow_stack_space: u32) -> FrameLayout {
    FrameLayout {
        stack_slot_size: 8,
        max_stack_slots: 256,
        double_stack_alignment: 1,
        frame_slack_size: 24,
        shadow_stack_space,
        invalid_stack_slot: -1,
    }
}

/// x86-64 under the System V AMD64 ABI (Linux, macOS, BSDs).
pub const X64_SYSV: ArchDescriptor = ArchDescriptor {
    name: "x64-sysv",
    general: general(
        RegisterMask::of_all(&[RAX, RCX, RDX, RSI, RDI, R8, R9, R10, R11]),
        RegisterMask::of_all(&[RBX, RBP, R12, R13, R14, R15]),
        RegisterMask::of_all(&[RDI, RSI, RDX, RCX, R8, R9]),
    ),
    float: float(ALL, RegisterMask::low(8)),
    stack_pointer: RSP,
    frame: frame(0),
};

/// x86-64 under the Microsoft x64 convention.
pub const X64_WIN64: ArchDescriptor = ArchDescriptor {
    name: "x64-win64",
    general: general(
        RegisterMask::of_all(&[RAX, RCX, RDX, R8, R9, R10, R11]),
        RegisterMask::of_all(&[RBX, RSI, RDI, RBP, R12, R13, R14, R15]),
        RegisterMask::of_all(&[RCX, RDX, R8, R9]),
    ),
    float: float(RegisterMask::low(6), RegisterMask::low(4)),
    stack_pointer: RSP,
    frame: frame(32),
};

const _: () = assert!(X64_SYSV.check().is_ok());
const _: () = assert!(X64_WIN64.check().is_ok());
