//! Decoded instruction types

use crate::tables::{MemoryBase, Register};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Mov,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    /// An effective address plus a signed displacement (0 if there was none)
    Memory {
        base: MemoryBase,
        displacement: i16,
    },
    /// mod 00, r/m 110: a 16-bit address with no base registers
    DirectAddress(u16),
    Immediate(i16),
}

/// One fully decoded instruction. Built fresh for each instruction in the
/// stream and never modified afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodedInstruction {
    pub mnemonic: Mnemonic,
    pub destination: Operand,
    pub source: Operand,
    /// Offset of the first byte of the instruction in the stream
    pub offset: usize,
    /// Number of bytes the instruction was encoded in
    pub length: usize,
}

impl DecodedInstruction {
    /// The raw bytes of this instruction within the stream it was decoded
    /// from. Empty if `inst_stream` is not that stream.
    pub fn raw_bytes<'a>(&self, inst_stream: &'a [u8]) -> &'a [u8] {
        inst_stream
            .get(self.offset..self.offset + self.length)
            .unwrap_or(&[])
    }
}
