//! Strata IR - code-unit representation for the Strata runtime.
//!
//! This crate contains everything a compiled code unit carries into the
//! interpreter:
//! - Names for interned identifiers
//! - Multinames (namespace-qualified name references) and their table
//! - Frame templates in an index-addressed arena
//! - The bytecode encoding and decoder
//! - `CodeUnit`, the loaded and verified bundle of all of the above
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and namespaces become `Name(u32)`
//! - **Index, don't point**: multinames, frames and constants are referenced
//!   by 16-bit indices, never by pointers
//! - **Verify once**: a `CodeUnit` is checked at load time and immutable after,
//!   so it is `Send + Sync` and shared across interpreters without locking

pub mod bytecode;
mod code_unit;
mod error;
mod frame;
mod interner;
mod multiname;
mod name;

pub use bytecode::{ConstantId, Instruction, Opcode};
pub use code_unit::{
    CodeUnit, CodeUnitImage, Constant, ConstantImage, FrameImage, MultinameImage, SlotImage,
};
pub use error::LoadError;
pub use frame::{FrameArena, FrameId, FrameTemplate, SlotDecl, SlotFlags};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use multiname::{Multiname, MultinameId, MultinameTable, Namespace, QualifiedName};
pub use name::Name;
