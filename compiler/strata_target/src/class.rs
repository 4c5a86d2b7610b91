//! Register classes and their role masks.

use std::fmt;

use crate::{RegisterCode, RegisterError, RegisterMask};

/// The two register files a descriptor describes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegisterClass {
    General,
    Float,
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegisterClass::General => "general",
            RegisterClass::Float => "float",
        })
    }
}

/// Save convention of a register across calls.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Volatility {
    /// Caller-saved.
    Volatile,
    /// Callee-saved.
    NonVolatile,
    /// Neither, e.g. the stack pointer or program counter.
    Unclassified,
}

/// One register class of an architecture: names plus role masks.
///
/// Constructed only as constants inside this crate; every descriptor passes
/// [`RegisterSet::check`] at compile time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterSet {
    pub(crate) class: RegisterClass,
    /// Display name per ordinal code.
    pub(crate) names: &'static [&'static str],
    pub(crate) allocatable_count: u32,
    pub(crate) all: RegisterMask,
    pub(crate) volatile: RegisterMask,
    pub(crate) non_volatile: RegisterMask,
    /// Never handed out by the allocator: stack pointer, scratch registers.
    pub(crate) reserved: RegisterMask,
    pub(crate) allocatable: RegisterMask,
    pub(crate) argument: RegisterMask,
    /// Result registers of a call into host code.
    pub(crate) call_return: RegisterMask,
    /// Result registers of a call between compiled script functions.
    pub(crate) js_call_return: RegisterMask,
    /// Registers a host-call wrapper may clobber.
    pub(crate) wrapper: RegisterMask,
    /// Usable without a save: volatile minus reserved.
    pub(crate) temp: RegisterMask,
    /// Registers with an addressable low byte (empty for float classes).
    pub(crate) single_byte: RegisterMask,
}

impl RegisterSet {
    #[inline]
    pub const fn class(&self) -> RegisterClass {
        self.class
    }

    /// Number of registers in the class.
    #[inline]
    pub const fn total(&self) -> u32 {
        self.names.len() as u32
    }

    #[inline]
    pub const fn allocatable_count(&self) -> u32 {
        self.allocatable_count
    }

    /// Display name of `code`.
    ///
    /// A code past the end of the class means the caller holds the wrong descriptor.
    pub const fn name(&self, code: RegisterCode) -> Result<&'static str, RegisterError> {
        if (code as usize) < self.names.len() {
            Ok(self.names[code as usize])
        } else {
            Err(RegisterError::CodeOutOfRange {
                class: self.class,
                code,
                total: self.total(),
            })
        }
    }

    /// Code of the register called `name`.
    pub fn code_of(&self, name: &str) -> Option<RegisterCode> {
        self.names
            .iter()
            .position(|n| *n == name)
            .and_then(|i| RegisterCode::try_from(i).ok())
    }

    /// `(code, name)` for every register, in code order.
    pub fn registers(&self) -> impl Iterator<Item = (RegisterCode, &'static str)> + '_ {
        (0..=RegisterCode::MAX).zip(self.names.iter().copied())
    }

    pub const fn classify(&self, code: RegisterCode) -> Volatility {
        if self.volatile.contains(code) {
            Volatility::Volatile
        } else if self.non_volatile.contains(code) {
            Volatility::NonVolatile
        } else {
            Volatility::Unclassified
        }
    }

    #[inline]
    pub const fn is_allocatable(&self, code: RegisterCode) -> bool {
        self.allocatable.contains(code)
    }

    #[inline]
    pub const fn all_mask(&self) -> RegisterMask {
        self.all
    }

    #[inline]
    pub const fn volatile_mask(&self) -> RegisterMask {
        self.volatile
    }

    #[inline]
    pub const fn non_volatile_mask(&self) -> RegisterMask {
        self.non_volatile
    }

    #[inline]
    pub const fn reserved_mask(&self) -> RegisterMask {
        self.reserved
    }

    #[inline]
    pub const fn allocatable_mask(&self) -> RegisterMask {
        self.allocatable
    }

    #[inline]
    pub const fn argument_mask(&self) -> RegisterMask {
        self.argument
    }

    #[inline]
    pub const fn call_return_mask(&self) -> RegisterMask {
        self.call_return
    }

    #[inline]
    pub const fn js_call_return_mask(&self) -> RegisterMask {
        self.js_call_return
    }

    #[inline]
    pub const fn wrapper_mask(&self) -> RegisterMask {
        self.wrapper
    }

    #[inline]
    pub const fn temp_mask(&self) -> RegisterMask {
        self.temp
    }

    #[inline]
    pub const fn single_byte_mask(&self) -> RegisterMask {
        self.single_byte
    }

    /// Check the mask invariants of this class.
    ///
    /// Usable in `const` context; the descriptors in this crate are asserted
    /// with it at compile time.
    pub const fn check(&self) -> Result<(), RegisterError> {
        let class = self.class;
        let total = self.total();
        if total > RegisterMask::CAPACITY {
            return Err(RegisterError::TooManyRegisters { class, total });
        }
        if let Err(e) = self.check_names() {
            return Err(e);
        }

        let roles: [(&'static str, RegisterMask); 11] = [
            ("all", self.all),
            ("volatile", self.volatile),
            ("non-volatile", self.non_volatile),
            ("reserved", self.reserved),
            ("allocatable", self.allocatable),
            ("argument", self.argument),
            ("call-return", self.call_return),
            ("js-call-return", self.js_call_return),
            ("wrapper", self.wrapper),
            ("temp", self.temp),
            ("single-byte", self.single_byte),
        ];
        let class_mask = RegisterMask::low(total);
        let mut i = 0;
        while i < roles.len() {
            let (role, mask) = roles[i];
            if !mask.is_subset_of(class_mask) {
                return Err(RegisterError::OutsideClass { class, role, mask });
            }
            i += 1;
        }
        if self.all.bits() != class_mask.bits() {
            return Err(RegisterError::OutsideClass {
                class,
                role: "all",
                mask: self.all,
            });
        }

        let overlap = self.volatile.intersect(self.non_volatile);
        if !overlap.is_empty() {
            return Err(RegisterError::OverlappingSaveRoles { class, overlap });
        }

        let expected = self.all.without(self.reserved);
        if self.allocatable.bits() != expected.bits() {
            return Err(RegisterError::AllocatableMismatch {
                class,
                expected,
                actual: self.allocatable,
            });
        }
        if self.allocatable.count() != self.allocatable_count {
            return Err(RegisterError::AllocatableCountMismatch {
                class,
                declared: self.allocatable_count,
                actual: self.allocatable.count(),
            });
        }

        let unclassified = self
            .allocatable
            .without(self.volatile.union(self.non_volatile));
        if !unclassified.is_empty() {
            return Err(RegisterError::UnclassifiedAllocatable {
                class,
                mask: unclassified,
            });
        }

        let expected = self.volatile.without(self.reserved);
        if self.temp.bits() != expected.bits() {
            return Err(RegisterError::TempMismatch {
                class,
                expected,
                actual: self.temp,
            });
        }
        Ok(())
    }

    const fn check_names(&self) -> Result<(), RegisterError> {
        let mut code = 0;
        while code < self.names.len() {
            let name = self.names[code].as_bytes();
            if name.is_empty() {
                return Err(RegisterError::EmptyName {
                    class: self.class,
                    code: code as RegisterCode,
                });
            }
            let mut earlier = 0;
            while earlier < code {
                if bytes_eq(self.names[earlier].as_bytes(), name) {
                    return Err(RegisterError::DuplicateName {
                        class: self.class,
                        code: code as RegisterCode,
                    });
                }
                earlier += 1;
            }
            code += 1;
        }
        Ok(())
    }
}

const fn bytes_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }
    true
}
