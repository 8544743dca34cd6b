//! Instruction decoding
//!
//! Every instruction is one 32-bit word. The top four bits select the
//! operation. Thirteen operations use three 3-bit register fields packed into
//! the low nine bits:
//!
//! ```text
//!  31   28                      8  6  5  3  2  0
//! [opcode]  ...unused...       [ A ][ B ][ C ]
//! ```
//!
//! Orthography (opcode 13) instead carries a target register and a 25-bit
//! literal:
//!
//! ```text
//!  31   28 27 25 24                           0
//! [  13  ][ A  ][           value              ]
//! ```

use crate::machine::constants::{
    OPCODE_SHIFT, OPERAND_A_SHIFT, OPERAND_B_SHIFT, ORTHOGRAPHY_REGISTER_SHIFT,
    ORTHOGRAPHY_VALUE_MASK,
};
use crate::machine::errors::MachineError;
use crate::memory::registers::Register;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    ConditionalMove = 0,
    ArrayIndex = 1,
    ArrayAmendment = 2,
    Addition = 3,
    Multiplication = 4,
    Division = 5,
    NotAnd = 6,
    Halt = 7,
    Allocation = 8,
    Abandonment = 9,
    Output = 10,
    Input = 11,
    LoadProgram = 12,
    Orthography = 13,
}

impl Opcode {
    /// Short assembler mnemonic
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::ConditionalMove => "cmov",
            Opcode::ArrayIndex => "index",
            Opcode::ArrayAmendment => "amend",
            Opcode::Addition => "add",
            Opcode::Multiplication => "mul",
            Opcode::Division => "div",
            Opcode::NotAnd => "nand",
            Opcode::Halt => "halt",
            Opcode::Allocation => "alloc",
            Opcode::Abandonment => "free",
            Opcode::Output => "out",
            Opcode::Input => "in",
            Opcode::LoadProgram => "load",
            Opcode::Orthography => "ortho",
        }
    }
}

impl TryFrom<u32> for Opcode {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Opcode::ConditionalMove),
            1 => Ok(Opcode::ArrayIndex),
            2 => Ok(Opcode::ArrayAmendment),
            3 => Ok(Opcode::Addition),
            4 => Ok(Opcode::Multiplication),
            5 => Ok(Opcode::Division),
            6 => Ok(Opcode::NotAnd),
            7 => Ok(Opcode::Halt),
            8 => Ok(Opcode::Allocation),
            9 => Ok(Opcode::Abandonment),
            10 => Ok(Opcode::Output),
            11 => Ok(Opcode::Input),
            12 => Ok(Opcode::LoadProgram),
            13 => Ok(Opcode::Orthography),
            other => Err(other),
        }
    }
}

/// A decoded instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Any operation other than orthography
    Standard {
        opcode: Opcode,
        a: Register,
        b: Register,
        c: Register,
    },

    /// Load a 25-bit literal into a register
    Orthography { register: Register, value: u32 },
}

impl Instruction {
    /// Decode one word. `finger` is only used to locate a fault.
    #[inline]
    pub fn decode(word: u32, finger: u32) -> Result<Self, MachineError> {
        let code = word >> OPCODE_SHIFT;
        let opcode = Opcode::try_from(code).map_err(|opcode| MachineError::InvalidOpcode {
            opcode,
            word,
            finger,
        })?;

        if opcode == Opcode::Orthography {
            return Ok(Instruction::Orthography {
                register: Register::from_field(word >> ORTHOGRAPHY_REGISTER_SHIFT),
                value: word & ORTHOGRAPHY_VALUE_MASK,
            });
        }

        Ok(Instruction::Standard {
            opcode,
            a: Register::from_field(word >> OPERAND_A_SHIFT),
            b: Register::from_field(word >> OPERAND_B_SHIFT),
            c: Register::from_field(word),
        })
    }

    /// Build a standard instruction from register indices (each taken mod 8)
    pub fn standard(opcode: Opcode, a: u32, b: u32, c: u32) -> Self {
        Instruction::Standard {
            opcode,
            a: Register::from_field(a),
            b: Register::from_field(b),
            c: Register::from_field(c),
        }
    }

    /// Build an orthography instruction; `value` is truncated to 25 bits
    pub fn orthography(register: u32, value: u32) -> Self {
        Instruction::Orthography {
            register: Register::from_field(register),
            value: value & ORTHOGRAPHY_VALUE_MASK,
        }
    }

    /// Pack back into a word
    pub fn encode(self) -> u32 {
        match self {
            Instruction::Standard { opcode, a, b, c } => {
                ((opcode as u32) << OPCODE_SHIFT)
                    | ((a.index() as u32) << OPERAND_A_SHIFT)
                    | ((b.index() as u32) << OPERAND_B_SHIFT)
                    | c.index() as u32
            }
            Instruction::Orthography { register, value } => {
                ((Opcode::Orthography as u32) << OPCODE_SHIFT)
                    | ((register.index() as u32) << ORTHOGRAPHY_REGISTER_SHIFT)
                    | (value & ORTHOGRAPHY_VALUE_MASK)
            }
        }
    }

    pub fn opcode(self) -> Opcode {
        match self {
            Instruction::Standard { opcode, .. } => opcode,
            Instruction::Orthography { .. } => Opcode::Orthography,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Orthography { register, value } => {
                write!(f, "ortho {}, {}", register, value)
            }
            Instruction::Standard { opcode, a, b, c } => {
                let name = opcode.mnemonic();
                match opcode {
                    Opcode::Halt => write!(f, "{}", name),
                    Opcode::Allocation => write!(f, "{} {}, {}", name, b, c),
                    Opcode::Abandonment | Opcode::Output | Opcode::Input => {
                        write!(f, "{} {}", name, c)
                    }
                    Opcode::LoadProgram => write!(f, "{} {}, {}", name, b, c),
                    _ => write!(f, "{} {}, {}, {}", name, a, b, c),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opcode_of(word: u32) -> Opcode {
        Instruction::decode(word, 0).unwrap().opcode()
    }

    fn fields_of(word: u32) -> (usize, usize, usize) {
        match Instruction::decode(word, 0).unwrap() {
            Instruction::Standard { a, b, c, .. } => (a.index(), b.index(), c.index()),
            other => panic!("Expected standard instruction, got {:?}", other),
        }
    }

    #[test]
    fn test_operation_codes() {
        assert_eq!(opcode_of(0x0123_4567), Opcode::ConditionalMove);
        assert_eq!(opcode_of(0x1EFA_B213), Opcode::ArrayIndex);
        assert_eq!(opcode_of(0x243A_F343), Opcode::ArrayAmendment);
        assert_eq!(opcode_of(0x3456_7313), Opcode::Addition);
        assert_eq!(opcode_of(0x4123_4888), Opcode::Multiplication);
        assert_eq!(opcode_of(0x5888_8888), Opcode::Division);
        assert_eq!(opcode_of(0x6AAB_BCCF), Opcode::NotAnd);
        assert_eq!(opcode_of(0x7000_0000), Opcode::Halt);
        assert_eq!(opcode_of(0x8901_2434), Opcode::Allocation);
        assert_eq!(opcode_of(0x9CCD_DEFE), Opcode::Abandonment);
        assert_eq!(opcode_of(0xA763_4DFE), Opcode::Output);
        assert_eq!(opcode_of(0xB545_4545), Opcode::Input);
        assert_eq!(opcode_of(0xC000_9990), Opcode::LoadProgram);
        assert_eq!(opcode_of(0xD876_5432), Opcode::Orthography);
    }

    #[test]
    fn test_operand_c() {
        assert_eq!(fields_of(0x1234_5670).2, 0);
        assert_eq!(fields_of(0xABCD_EFA1).2, 1);
        assert_eq!(fields_of(0x0A0B_0C03).2, 3);
        assert_eq!(fields_of(0x5555_5555).2, 5);
        assert_eq!(fields_of(0xCDEF_A237).2, 7);
    }

    #[test]
    fn test_operand_b() {
        assert_eq!(fields_of(0x1234_F0C7).1, 0);
        assert_eq!(fields_of(0xAAAA_AACF).1, 1);
        assert_eq!(fields_of(0x0000_00D7).1, 2);
        assert_eq!(fields_of(0x543E_FEDF).1, 3);
        assert_eq!(fields_of(0xCCDD_EEE7).1, 4);
        assert_eq!(fields_of(0x000A_AAEF).1, 5);
        assert_eq!(fields_of(0xCAFE_00F7).1, 6);
        assert_eq!(fields_of(0xBADC_AFFF).1, 7);
    }

    #[test]
    fn test_operand_a() {
        assert_eq!(fields_of(0x4AFF_FE3F).0, 0);
        assert_eq!(fields_of(0x4A67_7E40).0, 1);
        assert_eq!(fields_of(0x4A67_7E80).0, 2);
        assert_eq!(fields_of(0x4A67_7EC0).0, 3);
        assert_eq!(fields_of(0x4A67_7F00).0, 4);
        assert_eq!(fields_of(0x4A67_7F40).0, 5);
        assert_eq!(fields_of(0x4A67_7F80).0, 6);
        assert_eq!(fields_of(0x4A67_7FC0).0, 7);
    }

    #[test]
    fn test_orthography_fields() {
        let decoded = Instruction::decode(0xDE00_0000, 0).unwrap();
        assert_eq!(decoded, Instruction::orthography(7, 0));

        let decoded = Instruction::decode(0xDA00_0038, 0).unwrap();
        assert_eq!(decoded, Instruction::orthography(5, 56));

        // Full 25-bit literal, zero-extended
        let decoded = Instruction::decode(0xD1FF_FFFF, 0).unwrap();
        assert_eq!(decoded, Instruction::orthography(0, 0x01FF_FFFF));
    }

    #[test]
    fn test_invalid_opcodes() {
        for word in [0xE000_0000u32, 0xFFFF_FFFF] {
            match Instruction::decode(word, 12) {
                Err(MachineError::InvalidOpcode {
                    opcode,
                    word: w,
                    finger,
                }) => {
                    assert_eq!(opcode, word >> 28);
                    assert_eq!(w, word);
                    assert_eq!(finger, 12);
                }
                other => panic!("Expected invalid opcode, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_encode_matches_layout() {
        assert_eq!(
            Instruction::standard(Opcode::Addition, 1, 2, 3).encode(),
            0x3000_0000 | (1 << 6) | (2 << 3) | 3
        );
        assert_eq!(Instruction::orthography(0, 72).encode(), 0xD000_0048);
        assert_eq!(Instruction::standard(Opcode::Halt, 0, 0, 0).encode(), 0x7000_0000);
    }

    #[test]
    fn test_disassembly() {
        assert_eq!(
            Instruction::standard(Opcode::NotAnd, 0, 1, 2).to_string(),
            "nand r0, r1, r2"
        );
        assert_eq!(
            Instruction::standard(Opcode::Output, 0, 0, 4).to_string(),
            "out r4"
        );
        assert_eq!(
            Instruction::standard(Opcode::Allocation, 0, 3, 1).to_string(),
            "alloc r3, r1"
        );
        assert_eq!(Instruction::orthography(2, 10).to_string(), "ortho r2, 10");
        assert_eq!(Instruction::standard(Opcode::Halt, 5, 5, 5).to_string(), "halt");
    }
}
