//! This module implements turning decoded instructions into assembly text

use std::fmt;

use crate::decode::DecodeOutput;
use crate::instruction::{DecodedInstruction, Mnemonic, Operand};

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mnemonic::Mov => f.write_str("mov"),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Register(register) => write!(f, "{register}"),
            Operand::Memory {
                base,
                displacement: 0,
            } => write!(f, "[{base}]"),
            Operand::Memory { base, displacement } if *displacement > 0 => {
                write!(f, "[{base} + {displacement}]")
            }
            // unsigned_abs, so that -32768 doesn't overflow
            Operand::Memory { base, displacement } => {
                write!(f, "[{base} - {}]", displacement.unsigned_abs())
            }
            Operand::DirectAddress(address) => write!(f, "[{address}]"),
            Operand::Immediate(value) => write!(f, "{value}"),
        }
    }
}

impl fmt::Display for DecodedInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}", self.mnemonic, self.destination, self.source)
    }
}

/// A comment line with the offset and raw bytes of an instruction, e.g.
/// `; 0004: 8b 56 00`
pub fn listing_comment(inst: &DecodedInstruction, inst_stream: &[u8]) -> String {
    let bytes: Vec<String> = inst
        .raw_bytes(inst_stream)
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    format!("; {:04x}: {}", inst.offset, bytes.join(" "))
}

/// Render the output of a decode as text lines: one per instruction, then a
/// diagnostic comment if decoding stopped on an error. If `listing` is set,
/// each instruction is preceded by its [listing_comment].
pub fn render_lines(inst_stream: &[u8], output: &DecodeOutput, listing: bool) -> Vec<String> {
    let mut lines = vec![];
    for inst in &output.instructions {
        if listing {
            lines.push(listing_comment(inst, inst_stream));
        }
        lines.push(inst.to_string());
    }
    if let Some(e) = &output.error {
        lines.push(format!("; decoding stopped: {e}"));
    }
    lines
}
