//! A loaded, verified code unit.
//!
//! [`CodeUnit::load`] is the code-unit loader: it interns every name in a
//! [`CodeUnitImage`], builds the multiname table and frame arena, and
//! verifies that the bytecode only references entries that exist. After
//! loading, a unit is immutable and can be shared between interpreters.

use std::fmt::Write as _;

use crate::bytecode::{ConstantId, Decoder, Instruction};
use crate::{
    FrameArena, FrameId, FrameTemplate, LoadError, MultinameTable, Name, Namespace,
    QualifiedName, SharedInterner, SlotDecl, SlotFlags,
};

/// A constant-pool entry.
///
/// Floats are stored as bits so the pool stays `Eq + Hash`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(u64),
    Str(Name),
}

impl Constant {
    pub fn float(value: f64) -> Self {
        Constant::Float(value.to_bits())
    }
}

/// Compiled code plus every table it indexes.
#[derive(Debug)]
pub struct CodeUnit {
    interner: SharedInterner,
    multinames: MultinameTable,
    frames: FrameArena,
    constants: Vec<Constant>,
    base_frame: FrameId,
    code: Vec<u8>,
}

impl CodeUnit {
    /// Assemble a unit from prebuilt tables and verify it.
    pub fn new(
        interner: SharedInterner,
        multinames: MultinameTable,
        frames: FrameArena,
        constants: Vec<Constant>,
        base_frame: FrameId,
        code: Vec<u8>,
    ) -> Result<Self, LoadError> {
        let unit = CodeUnit {
            interner,
            multinames,
            frames,
            constants,
            base_frame,
            code,
        };
        unit.verify()?;
        Ok(unit)
    }

    /// Intern and build every table in `image`, then verify.
    pub fn load(image: &CodeUnitImage, interner: SharedInterner) -> Result<Self, LoadError> {
        let multinames = MultinameTable::from_pairs(
            &interner,
            image
                .multinames
                .iter()
                .map(|m| (m.name.as_str(), m.namespaces.iter().map(String::as_str))),
        )?;

        let mut frames = FrameArena::new();
        for frame in &image.frames {
            let mut slots = Vec::with_capacity(frame.slots.len());
            for slot in &frame.slots {
                let name = QualifiedName {
                    namespace: match &slot.namespace {
                        Some(ns) => Some(Namespace(interner.try_intern(ns)?)),
                        None => None,
                    },
                    name: interner.try_intern(&slot.name)?,
                };
                let mut flags = SlotFlags::empty();
                flags.set(SlotFlags::HOISTED, slot.hoisted);
                flags.set(SlotFlags::IMMUTABLE, slot.immutable);
                slots.push(SlotDecl::new(name).with_flags(flags));
            }
            frames.push(
                FrameTemplate::new(frame.parent.map(FrameId), slots),
                &interner,
            )?;
        }

        let mut constants = Vec::with_capacity(image.constants.len());
        for constant in &image.constants {
            constants.push(match constant {
                ConstantImage::Undefined => Constant::Undefined,
                ConstantImage::Null => Constant::Null,
                ConstantImage::Bool(b) => Constant::Bool(*b),
                ConstantImage::Int(i) => Constant::Int(*i),
                ConstantImage::Float(f) => Constant::float(*f),
                ConstantImage::Str(s) => Constant::Str(interner.try_intern(s)?),
            });
        }

        tracing::debug!(
            multinames = multinames.len(),
            frames = frames.len(),
            constants = constants.len(),
            code_len = image.code.len(),
            "loading code unit"
        );

        Self::new(
            interner,
            multinames,
            frames,
            constants,
            FrameId(image.base_frame),
            image.code.clone(),
        )
    }

    /// Check that every instruction decodes and every operand is in range.
    fn verify(&self) -> Result<(), LoadError> {
        self.frames.get(self.base_frame)?;
        if self.constants.len() > usize::from(u16::MAX) + 1 {
            return Err(LoadError::TableTooLarge {
                len: self.constants.len(),
            });
        }
        for decoded in Decoder::new(&self.code) {
            let (_, instruction) = decoded?;
            match instruction {
                Instruction::Constant(id) => {
                    self.constant(id)?;
                }
                Instruction::Multiname(id)
                | Instruction::DotRead(id)
                | Instruction::LexicalRead(id)
                | Instruction::LexicalWrite(id)
                | Instruction::LexicalAssign(id) => {
                    self.multinames.get(id)?;
                }
                Instruction::PushFrame(id) => {
                    self.frames.get(id)?;
                }
                Instruction::Pop | Instruction::PopFrame | Instruction::Return => {}
            }
        }
        Ok(())
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    #[inline]
    pub fn multinames(&self) -> &MultinameTable {
        &self.multinames
    }

    #[inline]
    pub fn frames(&self) -> &FrameArena {
        &self.frames
    }

    #[inline]
    pub fn base_frame(&self) -> FrameId {
        self.base_frame
    }

    #[inline]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    #[inline]
    pub fn constant(&self, id: ConstantId) -> Result<&Constant, LoadError> {
        self.constants
            .get(id.index())
            .ok_or(LoadError::ConstantOutOfRange {
                index: id.index(),
                len: self.constants.len(),
            })
    }

    pub fn constants(&self) -> &[Constant] {
        &self.constants
    }

    /// Human-readable listing with resolved operand names.
    pub fn disassemble(&self) -> String {
        let mut out = String::new();
        for decoded in Decoder::new(&self.code) {
            let (offset, instruction) = match decoded {
                Ok(pair) => pair,
                Err(e) => {
                    let _ = writeln!(out, "  error: {e}");
                    break;
                }
            };
            let _ = write!(out, "{offset:>6}  {instruction}");
            let comment = match instruction {
                Instruction::Multiname(id)
                | Instruction::DotRead(id)
                | Instruction::LexicalRead(id)
                | Instruction::LexicalWrite(id)
                | Instruction::LexicalAssign(id) => self
                    .multinames
                    .get(id)
                    .ok()
                    .map(|mn| mn.to_text(&self.interner)),
                Instruction::Constant(id) => self.constant(id).ok().map(|c| self.constant_text(*c)),
                Instruction::PushFrame(id) => self.frames.get(id).ok().map(|t| {
                    let names: Vec<_> = t
                        .slots()
                        .iter()
                        .map(|s| s.name.to_text(&self.interner))
                        .collect();
                    format!("[{}]", names.join(", "))
                }),
                Instruction::Pop | Instruction::PopFrame | Instruction::Return => None,
            };
            if let Some(comment) = comment {
                let _ = write!(out, "  ; {comment}");
            }
            out.push('\n');
        }
        out
    }

    fn constant_text(&self, constant: Constant) -> String {
        match constant {
            Constant::Undefined => "undefined".to_string(),
            Constant::Null => "null".to_string(),
            Constant::Bool(b) => b.to_string(),
            Constant::Int(i) => i.to_string(),
            Constant::Float(bits) => f64::from_bits(bits).to_string(),
            Constant::Str(name) => format!("{:?}", &*self.interner.lookup(name)),
        }
    }
}

/// Multiname entry of a [`CodeUnitImage`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultinameImage {
    pub name: String,
    pub namespaces: Vec<String>,
}

/// Slot entry of a [`FrameImage`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotImage {
    pub name: String,
    pub namespace: Option<String>,
    pub hoisted: bool,
    pub immutable: bool,
}

impl SlotImage {
    pub fn named(name: &str) -> Self {
        SlotImage {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Frame template entry of a [`CodeUnitImage`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameImage {
    pub parent: Option<u16>,
    pub slots: Vec<SlotImage>,
}

/// Constant-pool entry of a [`CodeUnitImage`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstantImage {
    Undefined,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Uninterned, unverified form of a code unit, as produced by a compiler.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeUnitImage {
    pub multinames: Vec<MultinameImage>,
    pub frames: Vec<FrameImage>,
    pub constants: Vec<ConstantImage>,
    pub base_frame: u16,
    pub code: Vec<u8>,
}

#[cfg(feature = "serde")]
impl CodeUnitImage {
    /// Encode with `bincode`.
    pub fn to_bytes(&self) -> Result<Vec<u8>, LoadError> {
        bincode::serialize(self).map_err(|e| LoadError::Image(e.to_string()))
    }

    /// Decode a `bincode` image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        bincode::deserialize(bytes).map_err(|e| LoadError::Image(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
