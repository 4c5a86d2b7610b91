//! Strata Target - register model for native code generation.
//!
//! Each supported target is described by an [`ArchDescriptor`]: a constant
//! catalogue of general-purpose and floating-point registers with their role
//! masks (volatile, non-volatile, reserved, allocatable, argument, return)
//! and the native frame layout constants. A register allocator queries these
//! masks with O(1) set operations through [`RegisterMask`].
//!
//! Descriptors are plain data. They are checked in `const` context when the
//! crate is compiled and cannot change afterwards, so they are shared freely
//! between threads.

mod class;
mod descriptor;
mod error;
mod mask;
pub mod targets;

pub use class::{RegisterClass, RegisterSet, Volatility};
pub use descriptor::{ArchDescriptor, FrameLayout};
pub use error::RegisterError;
pub use mask::{MaskIter, RegisterCode, RegisterMask};
pub use targets::{by_name, ARM, HOST, X64_SYSV, X64_WIN64, X86};
