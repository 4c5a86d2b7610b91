//! Bytecode encoding for the binding-relevant instruction subset.
//!
//! Each instruction is a one-byte opcode followed by zero or one 16-bit
//! little-endian index operand.

use std::fmt;

use crate::{FrameId, LoadError, MultinameId};

/// Width of an index operand in bytes.
pub const INDEX_WIDTH: usize = 2;

/// Opcode byte values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Constant = 0x01,
    Pop = 0x02,
    Multiname = 0x10,
    DotRead = 0x11,
    LexicalRead = 0x12,
    LexicalWrite = 0x13,
    LexicalAssign = 0x14,
    PushFrame = 0x20,
    PopFrame = 0x21,
    Return = 0xFF,
}

impl Opcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0x01 => Opcode::Constant,
            0x02 => Opcode::Pop,
            0x10 => Opcode::Multiname,
            0x11 => Opcode::DotRead,
            0x12 => Opcode::LexicalRead,
            0x13 => Opcode::LexicalWrite,
            0x14 => Opcode::LexicalAssign,
            0x20 => Opcode::PushFrame,
            0x21 => Opcode::PopFrame,
            0xFF => Opcode::Return,
            _ => return None,
        })
    }

    /// Bytes following the opcode.
    pub fn operand_width(self) -> usize {
        match self {
            Opcode::Pop | Opcode::PopFrame | Opcode::Return => 0,
            Opcode::Constant
            | Opcode::Multiname
            | Opcode::DotRead
            | Opcode::LexicalRead
            | Opcode::LexicalWrite
            | Opcode::LexicalAssign
            | Opcode::PushFrame => INDEX_WIDTH,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Constant => "constant",
            Opcode::Pop => "pop",
            Opcode::Multiname => "multiname",
            Opcode::DotRead => "dot_read",
            Opcode::LexicalRead => "lexical_read",
            Opcode::LexicalWrite => "lexical_write",
            Opcode::LexicalAssign => "lexical_assign",
            Opcode::PushFrame => "push_frame",
            Opcode::PopFrame => "pop_frame",
            Opcode::Return => "return",
        }
    }
}

/// Index into a unit's constant pool.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConstantId(pub u16);

impl ConstantId {
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// A decoded instruction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Push a constant-pool value.
    Constant(ConstantId),
    /// Discard the top of the operand stack.
    Pop,
    /// Push a reference to a multiname.
    Multiname(MultinameId),
    /// Pop a base value and push its property.
    DotRead(MultinameId),
    /// Push the value of a lexical binding.
    LexicalRead(MultinameId),
    /// Write the top of stack to a binding, declaring it if absent.
    LexicalWrite(MultinameId),
    /// Write the top of stack to an existing binding.
    LexicalAssign(MultinameId),
    /// Enter a scope.
    PushFrame(FrameId),
    /// Leave the innermost scope.
    PopFrame,
    /// Stop, yielding the top of stack.
    Return,
}

impl Instruction {
    pub fn opcode(self) -> Opcode {
        match self {
            Instruction::Constant(_) => Opcode::Constant,
            Instruction::Pop => Opcode::Pop,
            Instruction::Multiname(_) => Opcode::Multiname,
            Instruction::DotRead(_) => Opcode::DotRead,
            Instruction::LexicalRead(_) => Opcode::LexicalRead,
            Instruction::LexicalWrite(_) => Opcode::LexicalWrite,
            Instruction::LexicalAssign(_) => Opcode::LexicalAssign,
            Instruction::PushFrame(_) => Opcode::PushFrame,
            Instruction::PopFrame => Opcode::PopFrame,
            Instruction::Return => Opcode::Return,
        }
    }

    /// Encoded size in bytes.
    pub fn width(self) -> usize {
        1 + self.opcode().operand_width()
    }

    fn operand(self) -> Option<u16> {
        match self {
            Instruction::Constant(ConstantId(i))
            | Instruction::PushFrame(FrameId(i))
            | Instruction::Multiname(MultinameId(i))
            | Instruction::DotRead(MultinameId(i))
            | Instruction::LexicalRead(MultinameId(i))
            | Instruction::LexicalWrite(MultinameId(i))
            | Instruction::LexicalAssign(MultinameId(i)) => Some(i),
            Instruction::Pop | Instruction::PopFrame | Instruction::Return => None,
        }
    }

    /// Append the encoding of this instruction to `out`.
    pub fn encode(self, out: &mut Vec<u8>) {
        out.push(self.opcode() as u8);
        if let Some(operand) = self.operand() {
            out.extend_from_slice(&operand.to_le_bytes());
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match self.operand() {
            Some(operand) => write!(f, "{mnemonic} {operand}"),
            None => f.write_str(mnemonic),
        }
    }
}

/// Decode the instruction at `offset`.
///
/// Returns the instruction and the offset of the next one.
pub fn decode_at(code: &[u8], offset: usize) -> Result<(Instruction, usize), LoadError> {
    let Some(&byte) = code.get(offset) else {
        return Err(LoadError::TruncatedOperand {
            offset,
            needed: 1,
            available: 0,
        });
    };
    let opcode = Opcode::from_byte(byte).ok_or(LoadError::UnknownOpcode {
        opcode: byte,
        offset,
    })?;

    let operand_start = offset + 1;
    let next = operand_start + opcode.operand_width();
    let index = if opcode.operand_width() == 0 {
        0
    } else {
        let bytes = code
            .get(operand_start..next)
            .ok_or(LoadError::TruncatedOperand {
                offset: operand_start,
                needed: INDEX_WIDTH,
                available: code.len().saturating_sub(operand_start),
            })?;
        u16::from_le_bytes([bytes[0], bytes[1]])
    };

    let instruction = match opcode {
        Opcode::Constant => Instruction::Constant(ConstantId(index)),
        Opcode::Pop => Instruction::Pop,
        Opcode::Multiname => Instruction::Multiname(MultinameId(index)),
        Opcode::DotRead => Instruction::DotRead(MultinameId(index)),
        Opcode::LexicalRead => Instruction::LexicalRead(MultinameId(index)),
        Opcode::LexicalWrite => Instruction::LexicalWrite(MultinameId(index)),
        Opcode::LexicalAssign => Instruction::LexicalAssign(MultinameId(index)),
        Opcode::PushFrame => Instruction::PushFrame(FrameId(index)),
        Opcode::PopFrame => Instruction::PopFrame,
        Opcode::Return => Instruction::Return,
    };
    Ok((instruction, next))
}

/// Iterator over `(offset, instruction)` pairs; stops after the first error.
pub struct Decoder<'a> {
    code: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(code: &'a [u8]) -> Self {
        Decoder {
            code,
            offset: 0,
            failed: false,
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<(usize, Instruction), LoadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.code.len() {
            return None;
        }
        let offset = self.offset;
        match decode_at(self.code, offset) {
            Ok((instruction, next)) => {
                self.offset = next;
                Some(Ok((offset, instruction)))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Encode a sequence of instructions.
pub fn assemble(instructions: &[Instruction]) -> Vec<u8> {
    let mut out = Vec::with_capacity(instructions.iter().map(|i| i.width()).sum());
    for instruction in instructions {
        instruction.encode(&mut out);
    }
    out
}
