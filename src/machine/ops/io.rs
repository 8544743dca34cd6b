//! Console operations

use crate::console::Console;
use crate::machine::constants::END_OF_INPUT;
use crate::machine::engine::Machine;
use crate::machine::errors::MachineError;
use crate::memory::registers::Register;

impl<C: Console> Machine<C> {
    /// Emit the low 8 bits of C
    pub(crate) fn output(&mut self, c: Register) -> Result<(), MachineError> {
        let byte = self.registers.get(c) as u8;
        self.console.write_byte(byte)?;
        Ok(())
    }

    /// C <- next input byte, or all ones at end of input
    pub(crate) fn input(&mut self, c: Register) -> Result<(), MachineError> {
        let value = match self.console.read_byte()? {
            Some(byte) => byte as u32,
            None => END_OF_INPUT,
        };
        self.registers.set(c, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::console::MockTerminal;
    use crate::machine::constants::END_OF_INPUT;
    use crate::machine::decode::{Instruction, Opcode};
    use crate::machine::engine::Machine;
    use crate::memory::registers::Register;

    #[test]
    fn test_input_then_end_of_input() {
        let program = vec![
            Instruction::standard(Opcode::Input, 0, 0, 1).encode(),
            Instruction::standard(Opcode::Input, 0, 0, 2).encode(),
            Instruction::standard(Opcode::Halt, 0, 0, 0).encode(),
        ];
        let mut machine = Machine::new(program, MockTerminal::with_input("Z"));
        machine.run().expect("Execution failed");

        assert_eq!(machine.registers().get(Register::new(1).unwrap()), b'Z' as u32);
        assert_eq!(machine.registers().get(Register::new(2).unwrap()), END_OF_INPUT);
    }

    #[test]
    fn test_output_writes_low_byte() {
        let program = vec![
            Instruction::orthography(3, 0x141).encode(),
            Instruction::standard(Opcode::Output, 0, 0, 3).encode(),
            Instruction::standard(Opcode::Halt, 0, 0, 0).encode(),
        ];
        let mut machine = Machine::new(program, MockTerminal::new());
        machine.run().expect("Execution failed");
        assert_eq!(machine.console().output(), b"A");
    }

    #[test]
    fn test_echo_until_end_of_input() {
        // r1 + 1 wraps to zero only for the end-of-input marker
        let program = vec![
            /* 0 */ Instruction::standard(Opcode::Input, 0, 0, 1).encode(),
            /* 1 */ Instruction::orthography(7, 1).encode(),
            /* 2 */ Instruction::standard(Opcode::Addition, 2, 1, 7).encode(),
            /* 3 */ Instruction::orthography(3, 9).encode(),
            /* 4 */ Instruction::orthography(4, 7).encode(),
            /* 5 */ Instruction::standard(Opcode::ConditionalMove, 3, 4, 2).encode(),
            /* 6 */ Instruction::standard(Opcode::LoadProgram, 0, 0, 3).encode(),
            /* 7 */ Instruction::standard(Opcode::Output, 0, 0, 1).encode(),
            /* 8 */ Instruction::standard(Opcode::LoadProgram, 0, 0, 5).encode(),
            /* 9 */ Instruction::standard(Opcode::Halt, 0, 0, 0).encode(),
        ];

        let mut machine = Machine::new(program, MockTerminal::with_input("echo"));
        machine.run().expect("Execution failed");
        assert_eq!(machine.console().output_text(), "echo");
        assert_eq!(machine.console().remaining_input(), 0);
    }
}
