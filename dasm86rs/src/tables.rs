//! Addressing Mode Tables
//!
//! Typed versions of the MOD, REG and R/M field encoding tables from the 8086
//! manual (tables 4-8 through 4-10). Every lookup takes an already-masked
//! field and returns `None` only if the field has more bits than the table has
//! rows, which callers surface as an internal error.

use std::fmt;

/// The bits of r/m field that is a direct address if mode is
/// MemoryNoDisplacement
pub const DIRECT_ADDR: u8 = 0b110;

/// Operand size, selected by the w field
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    Byte,
    Word,
}

impl Width {
    pub fn from_w_bit(w: bool) -> Width {
        match w {
            false => Width::Byte,
            true => Width::Word,
        }
    }
}

/// MOD (Mode) Field Encoding
/// See table 4-8
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddressingMode {
    MemoryNoDisplacement,
    MemoryDisplacement8,
    MemoryDisplacement16,
    RegisterDirect,
}

impl AddressingMode {
    pub fn from_field(mode: u8) -> Option<AddressingMode> {
        match mode {
            0b00 => Some(AddressingMode::MemoryNoDisplacement),
            0b01 => Some(AddressingMode::MemoryDisplacement8),
            0b10 => Some(AddressingMode::MemoryDisplacement16),
            0b11 => Some(AddressingMode::RegisterDirect),
            _ => None,
        }
    }

    /// How many displacement bytes follow the mod reg r/m byte. The direct
    /// address special case is handled by the caller.
    pub fn displacement_len(self) -> usize {
        match self {
            AddressingMode::RegisterDirect | AddressingMode::MemoryNoDisplacement => 0,
            AddressingMode::MemoryDisplacement8 => 1,
            AddressingMode::MemoryDisplacement16 => 2,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Register {
    Al,
    Cl,
    Dl,
    Bl,
    Ah,
    Ch,
    Dh,
    Bh,
    Ax,
    Cx,
    Dx,
    Bx,
    Sp,
    Bp,
    Si,
    Di,
}

impl Register {
    /// REG (Register) Field Encoding
    /// See table 4-9
    pub fn from_field(reg: u8, width: Width) -> Option<Register> {
        let register = match (reg, width) {
            (0b000, Width::Byte) => Register::Al,
            (0b001, Width::Byte) => Register::Cl,
            (0b010, Width::Byte) => Register::Dl,
            (0b011, Width::Byte) => Register::Bl,
            (0b100, Width::Byte) => Register::Ah,
            (0b101, Width::Byte) => Register::Ch,
            (0b110, Width::Byte) => Register::Dh,
            (0b111, Width::Byte) => Register::Bh,
            (0b000, Width::Word) => Register::Ax,
            (0b001, Width::Word) => Register::Cx,
            (0b010, Width::Word) => Register::Dx,
            (0b011, Width::Word) => Register::Bx,
            (0b100, Width::Word) => Register::Sp,
            (0b101, Width::Word) => Register::Bp,
            (0b110, Width::Word) => Register::Si,
            (0b111, Width::Word) => Register::Di,
            _ => return None,
        };
        Some(register)
    }

    pub fn name(self) -> &'static str {
        match self {
            Register::Al => "al",
            Register::Cl => "cl",
            Register::Dl => "dl",
            Register::Bl => "bl",
            Register::Ah => "ah",
            Register::Ch => "ch",
            Register::Dh => "dh",
            Register::Bh => "bh",
            Register::Ax => "ax",
            Register::Cx => "cx",
            Register::Dx => "dx",
            Register::Bx => "bx",
            Register::Sp => "sp",
            Register::Bp => "bp",
            Register::Si => "si",
            Register::Di => "di",
        }
    }

    pub fn width(self) -> Width {
        match self {
            Register::Al
            | Register::Cl
            | Register::Dl
            | Register::Bl
            | Register::Ah
            | Register::Ch
            | Register::Dh
            | Register::Bh => Width::Byte,
            _ => Width::Word,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The registers summed to form an effective address
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MemoryBase {
    BxSi,
    BxDi,
    BpSi,
    BpDi,
    Si,
    Di,
    Bp,
    Bx,
}

impl MemoryBase {
    pub fn expression(self) -> &'static str {
        match self {
            MemoryBase::BxSi => "bx + si",
            MemoryBase::BxDi => "bx + di",
            MemoryBase::BpSi => "bp + si",
            MemoryBase::BpDi => "bp + di",
            MemoryBase::Si => "si",
            MemoryBase::Di => "di",
            MemoryBase::Bp => "bp",
            MemoryBase::Bx => "bx",
        }
    }
}

impl fmt::Display for MemoryBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expression())
    }
}

/// What the r/m field refers to, before any displacement is read
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RmTarget {
    Register(Register),
    Memory(MemoryBase),
    /// No registers - just a 16-bit address from disp lo, disp hi
    DirectAddress,
}

// R/M (Register/Memory) Field Encoding
// See table 4-10
pub fn decode_rm_field(rm: u8, mode: AddressingMode, width: Width) -> Option<RmTarget> {
    let base = match (rm, mode) {
        (_, AddressingMode::RegisterDirect) => {
            return Register::from_field(rm, width).map(RmTarget::Register)
        }
        (DIRECT_ADDR, AddressingMode::MemoryNoDisplacement) => return Some(RmTarget::DirectAddress),
        (0b000, _) => MemoryBase::BxSi,
        (0b001, _) => MemoryBase::BxDi,
        (0b010, _) => MemoryBase::BpSi,
        (0b011, _) => MemoryBase::BpDi,
        (0b100, _) => MemoryBase::Si,
        (0b101, _) => MemoryBase::Di,
        (0b110, _) => MemoryBase::Bp,
        (0b111, _) => MemoryBase::Bx,
        _ => return None,
    };
    Some(RmTarget::Memory(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reg_field_by_width() {
        assert_eq!(Register::from_field(0b011, Width::Word), Some(Register::Bx));
        assert_eq!(Register::from_field(0b011, Width::Byte), Some(Register::Bl));
        assert_eq!(Register::from_field(0b100, Width::Byte), Some(Register::Ah));
        assert_eq!(Register::from_field(0b1000, Width::Word), None);
    }

    #[test]
    fn test_mod_field() {
        assert_eq!(
            AddressingMode::from_field(0b11),
            Some(AddressingMode::RegisterDirect)
        );
        assert_eq!(AddressingMode::from_field(0b100), None);
        assert_eq!(AddressingMode::MemoryNoDisplacement.displacement_len(), 0);
        assert_eq!(AddressingMode::MemoryDisplacement8.displacement_len(), 1);
        assert_eq!(AddressingMode::MemoryDisplacement16.displacement_len(), 2);
        assert_eq!(AddressingMode::RegisterDirect.displacement_len(), 0);
    }

    #[test]
    fn test_rm_field() {
        use AddressingMode::*;
        assert_eq!(
            decode_rm_field(0b110, RegisterDirect, Width::Word),
            Some(RmTarget::Register(Register::Si))
        );
        assert_eq!(
            decode_rm_field(0b110, MemoryNoDisplacement, Width::Word),
            Some(RmTarget::DirectAddress)
        );
        // With a displacement, 110 is bp again
        assert_eq!(
            decode_rm_field(0b110, MemoryDisplacement8, Width::Byte),
            Some(RmTarget::Memory(MemoryBase::Bp))
        );
        assert_eq!(
            decode_rm_field(0b000, MemoryDisplacement16, Width::Byte),
            Some(RmTarget::Memory(MemoryBase::BxSi))
        );
        assert_eq!(decode_rm_field(0b1000, MemoryDisplacement16, Width::Byte), None);
    }
}
