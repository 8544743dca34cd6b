// Constants for the Universal Machine

/// Number of general-purpose registers
pub const REGISTER_COUNT: usize = 8;

/// Slot index reserved for the executing program image
pub const PROGRAM_SLOT: u32 = 0;

/// Value stored by the input instruction once the input stream is exhausted
pub const END_OF_INPUT: u32 = 0xFFFF_FFFF;

/// Operation code lives in the top four bits of every instruction word
pub const OPCODE_SHIFT: u32 = 28;

/// Standard operand fields: A = bits 8..6, B = bits 5..3, C = bits 2..0
pub const OPERAND_A_SHIFT: u32 = 6;
pub const OPERAND_B_SHIFT: u32 = 3;
pub const OPERAND_MASK: u32 = 0b111;

/// Orthography layout: target register = bits 27..25, literal = bits 24..0
pub const ORTHOGRAPHY_REGISTER_SHIFT: u32 = 25;
pub const ORTHOGRAPHY_VALUE_MASK: u32 = 0x01FF_FFFF;
