//! Decode errors
//!
//! Every error is terminal for the decode run. Offsets are byte offsets into
//! the instruction stream, pointing at the first byte of the failing
//! instruction.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unrecognized opcode 0b{byte:08b} (0x{byte:02X}) at offset {offset}")]
    UnrecognizedOpcode { offset: usize, byte: u8 },
    #[error(
        "truncated instruction stream: opcode 0b{opcode:08b} at offset {offset} needs {needed} more byte(s), {available} available"
    )]
    TruncatedStream {
        offset: usize,
        opcode: u8,
        needed: usize,
        available: usize,
    },
    #[error("no table entry for {field} field value 0b{value:b} at offset {offset}")]
    UnresolvedAddressingTable {
        offset: usize,
        field: &'static str,
        value: u8,
    },
}

impl DecodeError {
    /// The offset of the byte that made decoding fail
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::UnrecognizedOpcode { offset, .. }
            | DecodeError::TruncatedStream { offset, .. }
            | DecodeError::UnresolvedAddressingTable { offset, .. } => *offset,
        }
    }
}
