//! Decoder
//!
//! Turns an 8086 instruction stream into [DecodedInstruction]s, one
//! instruction at a time. Only the MOV encodings below are recognized:
//!
//! | Encoding                              | First byte  | Length |
//! |---------------------------------------|-------------|--------|
//! | Register/memory to/from register      | `100010dw`  | 2-4    |
//! | Immediate to register                 | `1011wreg`  | 2-3    |
//!
//! For 8086 decoding help, see pg. 4-18 through 4-36 of the manual.

use std::iter::FusedIterator;

use crate::byte_reader::{ByteStream, InstructionReader};
use crate::error::DecodeError;
use crate::instruction::{DecodedInstruction, Mnemonic, Operand};
use crate::settings::DecodeSettings;
use crate::tables::{decode_rm_field, AddressingMode, Register, RmTarget, Width};

/// The opcode of an instruction along with the fields packed into its first
/// byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpcodeClass {
    /// mov - Register/memory to/from register. If `d` is set, the reg field is
    /// the destination.
    RegisterMove { d: bool, w: bool },
    /// mov - Immediate to register. `reg` is always the destination.
    ImmediateToRegister { w: bool, reg: u8 },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum OpcodeKind {
    RegisterMove,
    ImmediateToRegister,
}

struct OpcodePattern {
    /// How many of the high bits of the first byte form the opcode
    prefix_bits: u32,
    pattern: u8,
    kind: OpcodeKind,
}

/// Longest prefix first, so that a short pattern never shadows a longer one
const OPCODE_TABLE: [OpcodePattern; 2] = [
    OpcodePattern {
        prefix_bits: 6,
        pattern: 0b100010,
        kind: OpcodeKind::RegisterMove,
    },
    OpcodePattern {
        prefix_bits: 4,
        pattern: 0b1011,
        kind: OpcodeKind::ImmediateToRegister,
    },
];

/// Classify the first byte of an instruction and pull out its fields.
/// Returns None if no opcode matches.
pub fn classify_opcode(byte: u8) -> Option<OpcodeClass> {
    let kind = OPCODE_TABLE
        .iter()
        .find(|op| byte >> (8 - op.prefix_bits) == op.pattern)?
        .kind;
    let class = match kind {
        OpcodeKind::RegisterMove => OpcodeClass::RegisterMove {
            d: ((byte & 0b10) >> 1) == 1,
            w: (byte & 0b1) == 1,
        },
        OpcodeKind::ImmediateToRegister => OpcodeClass::ImmediateToRegister {
            w: ((byte & 0b1000) >> 3) == 1,
            reg: byte & 0b111,
        },
    };
    Some(class)
}

/// The fields of a mod reg r/m byte
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ModRegRm {
    pub mode: AddressingMode,
    pub reg: u8,
    pub rm: u8,
}

impl ModRegRm {
    /// Split the byte into its fields. Returns None only if the mode has no
    /// table entry.
    pub fn from_byte(byte: u8) -> Option<ModRegRm> {
        Some(ModRegRm {
            mode: AddressingMode::from_field((byte & 0b11000000) >> 6)?,
            reg: (byte & 0b00111000) >> 3,
            rm: byte & 0b00000111,
        })
    }
}

fn unresolved(offset: usize, field: &'static str, value: u8) -> DecodeError {
    DecodeError::UnresolvedAddressingTable {
        offset,
        field,
        value,
    }
}

/// Resolve the (destination, source) operands of a register/memory to/from
/// register mov. Consumes the mod reg r/m byte and any displacement bytes.
fn resolve_register_move(
    reader: &mut InstructionReader,
    d: bool,
    w: bool,
) -> Result<(Operand, Operand), DecodeError> {
    let offset = reader.offset();
    let byte = reader.read_u8()?;
    let fields = ModRegRm::from_byte(byte).ok_or(unresolved(offset, "mod", byte >> 6))?;
    let width = Width::from_w_bit(w);

    let reg = Register::from_field(fields.reg, width)
        .map(Operand::Register)
        .ok_or(unresolved(offset, "reg", fields.reg))?;

    // Displacement bytes, if any, follow the mod reg r/m byte
    let rm = match decode_rm_field(fields.rm, fields.mode, width) {
        Some(RmTarget::Register(register)) => Operand::Register(register),
        Some(RmTarget::Memory(base)) => Operand::Memory {
            base,
            displacement: reader.read_displacement(fields.mode)?,
        },
        Some(RmTarget::DirectAddress) => Operand::DirectAddress(reader.read_u16()?),
        None => return Err(unresolved(offset, "r/m", fields.rm)),
    };

    match d {
        // Source is REG field
        false => Ok((rm, reg)),
        // Destination is REG field
        true => Ok((reg, rm)),
    }
}

/// Resolve the (destination, source) operands of an immediate to register
/// mov. Consumes the data bytes.
fn resolve_immediate_to_register(
    reader: &mut InstructionReader,
    w: bool,
    reg: u8,
) -> Result<(Operand, Operand), DecodeError> {
    let width = Width::from_w_bit(w);
    let destination = Register::from_field(reg, width)
        .ok_or(unresolved(reader.offset(), "reg", reg))?;
    let immediate = reader.read_immediate(width)?;
    Ok((Operand::Register(destination), Operand::Immediate(immediate)))
}

/// Iterates over the instructions in a stream.
///
/// Yields `Err` once for the first instruction that fails to decode and then
/// stops; there is no attempt to resynchronize.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    stream: ByteStream<'a>,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(inst_stream: &'a [u8]) -> Self {
        Decoder {
            stream: ByteStream::new(inst_stream),
            failed: false,
        }
    }

    /// The offset of the next byte to decode
    pub fn position(&self) -> usize {
        self.stream.position()
    }

    fn decode_instruction(
        &mut self,
        offset: usize,
        opcode: u8,
    ) -> Result<DecodedInstruction, DecodeError> {
        let class = classify_opcode(opcode).ok_or(DecodeError::UnrecognizedOpcode {
            offset,
            byte: opcode,
        })?;

        let mut reader = InstructionReader::new(&mut self.stream, offset, opcode);
        let (destination, source) = match class {
            OpcodeClass::RegisterMove { d, w } => resolve_register_move(&mut reader, d, w)?,
            OpcodeClass::ImmediateToRegister { w, reg } => {
                resolve_immediate_to_register(&mut reader, w, reg)?
            }
        };

        Ok(DecodedInstruction {
            mnemonic: Mnemonic::Mov,
            destination,
            source,
            offset,
            length: reader.consumed(),
        })
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<DecodedInstruction, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let offset = self.stream.position();
        // End of instruction stream
        let opcode = self.stream.next_byte()?;
        let result = self.decode_instruction(offset, opcode);
        self.failed = result.is_err();
        Some(result)
    }
}

impl FusedIterator for Decoder<'_> {}

/// Everything decoded from one stream: the instructions before the first
/// failure, and the failure itself if there was one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOutput {
    pub instructions: Vec<DecodedInstruction>,
    pub error: Option<DecodeError>,
}

impl DecodeOutput {
    /// Total bytes consumed by the decoded instructions
    pub fn bytes_decoded(&self) -> usize {
        self.instructions.iter().map(|inst| inst.length).sum()
    }
}

/// Decode a whole instruction stream, stopping at the end of the stream, at
/// the first error, or after `exit_after` instructions.
pub fn decode(inst_stream: &[u8], settings: &DecodeSettings) -> DecodeOutput {
    let limit = settings.exit_after.unwrap_or(usize::MAX);
    let mut instructions = vec![];
    let mut error = None;

    for result in Decoder::new(inst_stream).take(limit) {
        match result {
            Ok(inst) => {
                log::debug!("{:04X}: {inst}", inst.offset);
                instructions.push(inst);
            }
            Err(e) => {
                log::debug!("decode failed: {e}");
                error = Some(e);
            }
        }
    }

    if instructions.len() == limit {
        log::debug!("Stopped decoding after {limit} instructions");
    }
    DecodeOutput {
        instructions,
        error,
    }
}
