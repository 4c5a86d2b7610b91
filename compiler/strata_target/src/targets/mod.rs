//! Concrete descriptors, and the one selected for the build target.

pub mod arm;
pub mod x64;
pub mod x86;

use crate::ArchDescriptor;

pub use arm::ARM;
pub use x64::{X64_SYSV, X64_WIN64};
pub use x86::X86;

/// Every descriptor this crate knows.
pub static ALL: [&ArchDescriptor; 4] = [&X64_SYSV, &X64_WIN64, &X86, &ARM];

/// Descriptor for the target this crate is compiled for, if supported.
#[cfg(all(target_arch = "x86_64", windows))]
pub const HOST: Option<&ArchDescriptor> = Some(&X64_WIN64);
#[cfg(all(target_arch = "x86_64", not(windows)))]
pub const HOST: Option<&ArchDescriptor> = Some(&X64_SYSV);
#[cfg(target_arch = "x86")]
pub const HOST: Option<&ArchDescriptor> = Some(&X86);
#[cfg(target_arch = "arm")]
pub const HOST: Option<&ArchDescriptor> = Some(&ARM);
#[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "arm")))]
pub const HOST: Option<&ArchDescriptor> = None;

/// Look up a descriptor by its name.
pub fn by_name(name: &str) -> Option<&'static ArchDescriptor> {
    ALL.iter().copied().find(|arch| arch.name() == name)
}
