//! Register-only operations
//!
//! All arithmetic is on unsigned 32-bit words and wraps modulo 2^32.
//! Division by zero leaves the destination untouched.

use crate::console::Console;
use crate::machine::engine::Machine;
use crate::memory::registers::Register;

impl<C: Console> Machine<C> {
    /// A <- B, unless C is 0
    #[inline]
    pub(crate) fn conditional_move(&mut self, a: Register, b: Register, c: Register) {
        if self.registers.get(c) != 0 {
            let value = self.registers.get(b);
            self.registers.set(a, value);
        }
    }

    #[inline]
    pub(crate) fn addition(&mut self, a: Register, b: Register, c: Register) {
        let value = self.registers.get(b).wrapping_add(self.registers.get(c));
        self.registers.set(a, value);
    }

    #[inline]
    pub(crate) fn multiplication(&mut self, a: Register, b: Register, c: Register) {
        let value = self.registers.get(b).wrapping_mul(self.registers.get(c));
        self.registers.set(a, value);
    }

    #[inline]
    pub(crate) fn division(&mut self, a: Register, b: Register, c: Register) {
        if let Some(value) = self.registers.get(b).checked_div(self.registers.get(c)) {
            self.registers.set(a, value);
        }
    }

    #[inline]
    pub(crate) fn not_and(&mut self, a: Register, b: Register, c: Register) {
        let value = !(self.registers.get(b) & self.registers.get(c));
        self.registers.set(a, value);
    }

    #[inline]
    pub(crate) fn orthography(&mut self, register: Register, value: u32) {
        self.registers.set(register, value);
    }
}
