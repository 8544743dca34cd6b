//! Heap operations
//!
//! Every access goes through [`Heap`](crate::memory::heap::Heap), which checks
//! slot liveness and offsets. A failed check is a fatal fault located at the
//! current instruction.

use crate::console::Console;
use crate::machine::engine::Machine;
use crate::machine::errors::MachineError;
use crate::memory::registers::Register;

impl<C: Console> Machine<C> {
    /// A <- array[B][C]
    pub(crate) fn array_index(
        &mut self,
        a: Register,
        b: Register,
        c: Register,
    ) -> Result<(), MachineError> {
        let value = self
            .heap
            .read(self.registers.get(b), self.registers.get(c))
            .map_err(|e| self.heap_fault(e))?;
        self.registers.set(a, value);
        Ok(())
    }

    /// array[A][B] <- C
    pub(crate) fn array_amendment(
        &mut self,
        a: Register,
        b: Register,
        c: Register,
    ) -> Result<(), MachineError> {
        let (slot, offset, value) = (
            self.registers.get(a),
            self.registers.get(b),
            self.registers.get(c),
        );
        self.heap
            .write(slot, offset, value)
            .map_err(|e| self.heap_fault(e))
    }

    /// B <- identifier of a fresh zeroed array of C words
    pub(crate) fn allocation(&mut self, b: Register, c: Register) -> Result<(), MachineError> {
        let slot = self
            .heap
            .allocate(self.registers.get(c))
            .map_err(|e| self.heap_fault(e))?;
        self.registers.set(b, slot);
        Ok(())
    }

    /// Abandon the array identified by C; slot 0 is never abandoned
    pub(crate) fn abandonment(&mut self, c: Register) -> Result<(), MachineError> {
        let slot = self.registers.get(c);
        self.heap.free(slot).map_err(|e| self.heap_fault(e))
    }

    /// Replace the program with a copy of array B (unless B is 0) and jump to C
    pub(crate) fn load_program(&mut self, b: Register, c: Register) -> Result<(), MachineError> {
        let slot = self.registers.get(b);
        self.heap
            .replace_program(slot)
            .map_err(|e| self.heap_fault(e))?;
        self.finger = self.registers.get(c);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::console::MockTerminal;
    use crate::machine::constants::PROGRAM_SLOT;
    use crate::machine::decode::{Instruction, Opcode};
    use crate::machine::engine::Machine;
    use crate::machine::errors::MachineError;
    use crate::memory::registers::Register;

    fn reg(index: usize) -> Register {
        Register::new(index).unwrap()
    }

    fn halt() -> Instruction {
        Instruction::standard(Opcode::Halt, 0, 0, 0)
    }

    fn machine(instructions: &[Instruction]) -> Machine<MockTerminal> {
        let program = instructions.iter().map(|i| i.encode()).collect();
        Machine::new(program, MockTerminal::new())
    }

    #[test]
    fn test_allocation_places_identifier_in_b() {
        let mut m = machine(&[
            Instruction::orthography(1, 10),
            Instruction::standard(Opcode::Allocation, 7, 2, 1),
            halt(),
        ]);
        m.run().expect("Execution failed");

        let slot = m.registers().get(reg(2));
        assert_ne!(slot, PROGRAM_SLOT);
        assert_eq!(m.heap().get(slot), Some(&[0u32; 10][..]));
        assert_eq!(m.registers().get(reg(1)), 10);
        assert_eq!(m.registers().get(reg(7)), 0);
    }

    #[test]
    fn test_index_and_amendment() {
        let mut m = machine(&[
            Instruction::orthography(1, 3),
            Instruction::standard(Opcode::Allocation, 0, 2, 1), // r2 = new [0; 3]
            Instruction::orthography(3, 2),
            Instruction::orthography(4, 8),
            Instruction::standard(Opcode::ArrayAmendment, 2, 3, 4), // [r2][2] = 8
            Instruction::standard(Opcode::ArrayIndex, 5, 2, 3),     // r5 = [r2][2]
            halt(),
        ]);
        m.run().expect("Execution failed");

        let slot = m.registers().get(reg(2));
        assert_eq!(m.heap().get(slot), Some(&[0, 0, 8][..]));
        assert_eq!(m.registers().get(reg(5)), 8);
    }

    #[test]
    fn test_index_reads_program_slot() {
        let mut m = machine(&[
            Instruction::orthography(1, 2),
            Instruction::standard(Opcode::ArrayIndex, 0, 7, 1), // r0 = [0][2]
            halt(),
        ]);
        m.run().expect("Execution failed");
        assert_eq!(m.registers().get(reg(0)), halt().encode());
    }

    #[test]
    fn test_index_out_of_bounds_faults() {
        let mut m = machine(&[
            Instruction::orthography(1, 2),
            Instruction::standard(Opcode::Allocation, 0, 2, 1),
            Instruction::standard(Opcode::ArrayIndex, 0, 2, 1), // offset 2 of length 2
            halt(),
        ]);
        match m.run() {
            Err(MachineError::IndexOutOfBounds {
                offset,
                len,
                finger,
                ..
            }) => {
                assert_eq!(offset, 2);
                assert_eq!(len, 2);
                assert_eq!(finger, 2);
            }
            other => panic!("Expected bounds fault, got {:?}", other),
        }
    }

    #[test]
    fn test_amendment_of_inactive_array_faults() {
        let mut m = machine(&[
            Instruction::orthography(0, 42),
            Instruction::standard(Opcode::ArrayAmendment, 0, 1, 1),
            halt(),
        ]);
        assert!(matches!(
            m.run(),
            Err(MachineError::InactiveArray {
                slot: 42,
                finger: 1
            })
        ));
    }

    #[test]
    fn test_abandonment_then_reuse() {
        let mut m = machine(&[
            Instruction::orthography(1, 4),
            Instruction::standard(Opcode::Allocation, 0, 2, 1), // r2
            Instruction::standard(Opcode::Allocation, 0, 3, 1), // r3
            Instruction::standard(Opcode::Abandonment, 0, 0, 2),
            Instruction::standard(Opcode::Abandonment, 0, 0, 3),
            Instruction::standard(Opcode::Allocation, 0, 4, 1), // r4 reuses one of them
            halt(),
        ]);
        m.run().expect("Execution failed");

        let first = m.registers().get(reg(2));
        let second = m.registers().get(reg(3));
        let reused = m.registers().get(reg(4));
        assert!(reused == first || reused == second);
        assert_eq!(m.heap().live_count(), 1);
    }

    #[test]
    fn test_abandon_program_slot_is_ignored() {
        let mut m = machine(&[Instruction::standard(Opcode::Abandonment, 0, 0, 0), halt()]);
        m.run().expect("Execution failed");
        assert_eq!(m.heap().program().len(), 2);
    }

    #[test]
    fn test_double_abandonment_faults() {
        let mut m = machine(&[
            Instruction::orthography(1, 1),
            Instruction::standard(Opcode::Allocation, 0, 2, 1),
            Instruction::standard(Opcode::Abandonment, 0, 0, 2),
            Instruction::standard(Opcode::Abandonment, 0, 0, 2),
            halt(),
        ]);
        assert!(matches!(
            m.run(),
            Err(MachineError::InactiveArray { finger: 3, .. })
        ));
    }

    #[test]
    fn test_load_program_from_zero_only_jumps() {
        let mut m = machine(&[
            Instruction::orthography(1, 3),
            Instruction::standard(Opcode::LoadProgram, 0, 0, 1), // jump to 3
            Instruction::orthography(2, 99),                     // skipped
            halt(),
        ]);
        let before = m.heap().program().to_vec();
        m.run().expect("Execution failed");

        assert_eq!(m.heap().program(), &before[..]);
        assert_eq!(m.registers().get(reg(2)), 0);
        assert_eq!(m.finger(), 4);
    }

    #[test]
    fn test_load_program_replaces_program() {
        // Builds [ortho r6, 7; halt] in a fresh array and jumps into it.
        // Literals carry 25 bits, so the full words are assembled with mul/add.
        let mut m = machine(&[
            /* 0 */ Instruction::orthography(1, 2),
            /* 1 */ Instruction::standard(Opcode::Allocation, 0, 2, 1),
            /* 2 */ Instruction::orthography(3, 0xDC00),
            /* 3 */ Instruction::orthography(4, 0x1_0000),
            /* 4 */ Instruction::standard(Opcode::Multiplication, 3, 3, 4),
            /* 5 */ Instruction::orthography(5, 7),
            /* 6 */ Instruction::standard(Opcode::Addition, 3, 3, 5),
            /* 7 */ Instruction::orthography(6, 0x7000),
            /* 8 */ Instruction::standard(Opcode::Multiplication, 6, 6, 4),
            /* 9 */ Instruction::standard(Opcode::ArrayAmendment, 2, 0, 3),
            /* 10 */ Instruction::orthography(1, 1),
            /* 11 */ Instruction::standard(Opcode::ArrayAmendment, 2, 1, 6),
            /* 12 */ Instruction::standard(Opcode::LoadProgram, 0, 2, 0),
            /* 13 */ Instruction::orthography(7, 1),
            /* 14 */ halt(),
        ]);
        m.run().expect("Execution failed");

        let expected = [Instruction::orthography(6, 7).encode(), halt().encode()];
        assert_eq!(m.heap().program(), &expected[..]);
        assert_eq!(m.registers().get(reg(6)), 7);
        assert_eq!(m.registers().get(reg(7)), 0);
        assert_eq!(m.finger(), 2);

        // The source array survives the copy
        let slot = m.registers().get(reg(2));
        assert_eq!(m.heap().get(slot), Some(&expected[..]));
    }

    #[test]
    fn test_load_program_from_inactive_array_faults() {
        let mut m = machine(&[
            Instruction::orthography(1, 5),
            Instruction::standard(Opcode::LoadProgram, 0, 1, 0),
            halt(),
        ]);
        assert!(matches!(
            m.run(),
            Err(MachineError::InactiveArray { slot: 5, finger: 1 })
        ));
    }
}
