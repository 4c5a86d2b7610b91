//! Register bit masks.
//!
//! Bit `n` stands for the register whose ordinal code is `n`. All set
//! operations are `const fn` so descriptors can be assembled and checked at
//! compile time.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Ordinal code of a register within its class.
pub type RegisterCode = u8;

/// Set of registers of one class, one bit per ordinal code.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[repr(transparent)]
pub struct RegisterMask(u32);

impl RegisterMask {
    /// Widest class a mask can describe.
    pub const CAPACITY: u32 = u32::BITS;

    pub const EMPTY: RegisterMask = RegisterMask(0);

    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        RegisterMask(bits)
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Mask holding only `code`. Codes past `CAPACITY` yield the empty mask.
    #[inline]
    pub const fn of(code: RegisterCode) -> Self {
        if (code as u32) < Self::CAPACITY {
            RegisterMask(1 << code)
        } else {
            Self::EMPTY
        }
    }

    /// Mask holding every code in `codes`.
    pub const fn of_all(codes: &[RegisterCode]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < codes.len() {
            bits |= Self::of(codes[i]).0;
            i += 1;
        }
        RegisterMask(bits)
    }

    /// Mask holding codes `0..count`.
    #[inline]
    pub const fn low(count: u32) -> Self {
        if count >= Self::CAPACITY {
            RegisterMask(u32::MAX)
        } else {
            RegisterMask((1 << count) - 1)
        }
    }

    #[inline]
    pub const fn union(self, other: Self) -> Self {
        RegisterMask(self.0 | other.0)
    }

    #[inline]
    pub const fn intersect(self, other: Self) -> Self {
        RegisterMask(self.0 & other.0)
    }

    /// `self` with every register of `other` removed.
    #[inline]
    pub const fn without(self, other: Self) -> Self {
        RegisterMask(self.0 & !other.0)
    }

    #[inline]
    pub const fn contains(self, code: RegisterCode) -> bool {
        (code as u32) < Self::CAPACITY && self.0 & (1 << code) != 0
    }

    #[inline]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub const fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Lowest code in the mask.
    #[inline]
    pub const fn first(self) -> Option<RegisterCode> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() as RegisterCode)
        }
    }

    /// Codes in ascending order.
    #[inline]
    pub fn iter(self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl BitOr for RegisterMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for RegisterMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersect(rhs)
    }
}

impl Not for RegisterMask {
    type Output = Self;

    fn not(self) -> Self {
        RegisterMask(!self.0)
    }
}

impl fmt::Debug for RegisterMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for RegisterMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl IntoIterator for RegisterMask {
    type Item = RegisterCode;
    type IntoIter = MaskIter;

    fn into_iter(self) -> MaskIter {
        self.iter()
    }
}

/// Iterator over the codes of a [`RegisterMask`], lowest first.
#[derive(Clone, Debug)]
pub struct MaskIter(u32);

impl Iterator for MaskIter {
    type Item = RegisterCode;

    #[inline]
    fn next(&mut self) -> Option<RegisterCode> {
        if self.0 == 0 {
            return None;
        }
        let code = self.0.trailing_zeros();
        // clear lowest set bit
        self.0 &= self.0 - 1;
        Some(code as RegisterCode)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for MaskIter {}

const _: () = assert!(size_of::<RegisterMask>() == 4);

#[cfg(test)]
mod tests;
