//! The eight general-purpose registers

use crate::machine::constants::{OPERAND_MASK, REGISTER_COUNT};
use std::fmt;

/// A 3-bit register selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Register(u8);

impl Register {
    /// Build a selector from the low three bits of `field`
    #[inline]
    pub fn from_field(field: u32) -> Self {
        Register((field & OPERAND_MASK) as u8)
    }

    /// Build a selector from an index, rejecting anything above 7
    pub fn new(index: usize) -> Option<Self> {
        if index < REGISTER_COUNT {
            Some(Register(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// Register file, zero-initialized
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFile {
    values: [u32; REGISTER_COUNT],
}

impl RegisterFile {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, register: Register) -> u32 {
        self.values[register.index()]
    }

    #[inline]
    pub fn set(&mut self, register: Register, value: u32) {
        self.values[register.index()] = value;
    }

    /// All eight values in register order
    pub fn values(&self) -> &[u32; REGISTER_COUNT] {
        &self.values
    }
}
