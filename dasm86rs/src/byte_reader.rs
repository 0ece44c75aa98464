//! Byte stream cursor
//!
//! [ByteStream] is the shared cursor over the whole instruction stream.
//! [InstructionReader] borrows it for the duration of one instruction and
//! reads the trailing displacement and immediate bytes, reporting a
//! [DecodeError::TruncatedStream] against the instruction's first byte when
//! the stream runs out.

use crate::error::DecodeError;
use crate::tables::{AddressingMode, Width};

#[derive(Debug, Clone)]
pub struct ByteStream<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        ByteStream { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Read one byte, or None at the end of the stream
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos)?;
        debug_byte(byte);
        self.pos += 1;
        Some(byte)
    }

    /// Read exactly `count` bytes. Doesn't advance if fewer are left.
    pub fn take(&mut self, count: usize) -> Option<&'a [u8]> {
        let bytes = self.bytes.get(self.pos..self.pos + count)?;
        for byte in bytes {
            debug_byte(*byte);
        }
        self.pos += count;
        Some(bytes)
    }
}

fn debug_byte(byte: u8) {
    log::debug!("processing byte 0x{byte:02X} (0b{byte:08b})");
}

/// Reads the bytes that follow an opcode byte
pub struct InstructionReader<'s, 'a> {
    stream: &'s mut ByteStream<'a>,
    offset: usize,
    opcode: u8,
}

impl<'s, 'a> InstructionReader<'s, 'a> {
    /// `offset` and `opcode` describe the already consumed first byte
    pub fn new(stream: &'s mut ByteStream<'a>, offset: usize, opcode: u8) -> Self {
        InstructionReader {
            stream,
            offset,
            opcode,
        }
    }

    /// The offset of the instruction's first byte
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes consumed so far, including the opcode byte
    pub fn consumed(&self) -> usize {
        self.stream.position() - self.offset
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.stream.remaining();
        self.stream
            .take(count)
            .ok_or(DecodeError::TruncatedStream {
                offset: self.offset,
                opcode: self.opcode,
                needed: count,
                available,
            })
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?[0])
    }

    /// Little-endian: low byte first in the stream
    pub fn read_u16(&mut self) -> Result<u16, DecodeError> {
        let bytes = self.take(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read the 0, 1 or 2 byte displacement for a memory mode. One byte
    /// displacements are sign extended to 16 bits.
    pub fn read_displacement(&mut self, mode: AddressingMode) -> Result<i16, DecodeError> {
        match mode {
            AddressingMode::RegisterDirect | AddressingMode::MemoryNoDisplacement => Ok(0),
            AddressingMode::MemoryDisplacement8 => Ok(self.read_u8()? as i8 as i16),
            AddressingMode::MemoryDisplacement16 => Ok(self.read_u16()? as i16),
        }
    }

    /// Read an immediate of the given width, sign extended to 16 bits
    pub fn read_immediate(&mut self, width: Width) -> Result<i16, DecodeError> {
        match width {
            Width::Byte => Ok(self.read_u8()? as i8 as i16),
            Width::Word => Ok(self.read_u16()? as i16),
        }
    }
}
