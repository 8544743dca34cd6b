// Execution engine for the Universal Machine

use crate::console::Console;
use crate::machine::decode::{Instruction, Opcode};
use crate::machine::errors::MachineError;
use crate::memory::heap::{Heap, HeapError};
use crate::memory::registers::RegisterFile;

/// Control state of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineState {
    Running,
    Halted,
}

/// Result of executing one instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Halted,
}

/// A single machine instance: registers, heap, execution finger and console
pub struct Machine<C: Console> {
    /// General-purpose registers
    pub(crate) registers: RegisterFile,

    /// Arrays, with the program in slot 0
    pub(crate) heap: Heap,

    /// Offset into slot 0 of the next instruction
    pub(crate) finger: u32,

    pub(crate) state: MachineState,

    /// Instructions executed so far
    pub(crate) cycles: u64,

    pub(crate) console: C,
}

impl<C: Console> Machine<C> {
    /// Create a machine whose slot 0 holds `program`
    pub fn new(program: Vec<u32>, console: C) -> Self {
        Machine {
            registers: RegisterFile::new(),
            heap: Heap::new(program),
            finger: 0,
            state: MachineState::Running,
            cycles: 0,
            console,
        }
    }

    /// Run until the halt instruction. Returns the number of instructions executed.
    pub fn run(&mut self) -> Result<u64, MachineError> {
        let result = loop {
            match self.step() {
                Ok(StepOutcome::Continue) => continue,
                Ok(StepOutcome::Halted) => break Ok(self.cycles),
                Err(e) => break Err(e),
            }
        };

        // Output produced before a fault is still delivered
        let flushed = self.console.flush();
        let cycles = result?;
        flushed?;
        Ok(cycles)
    }

    /// Fetch, decode and execute one instruction
    pub fn step(&mut self) -> Result<StepOutcome, MachineError> {
        if self.state == MachineState::Halted {
            return Ok(StepOutcome::Halted);
        }

        let instruction = self.fetch()?;
        self.execute(instruction)?;
        self.cycles += 1;

        match self.state {
            MachineState::Running => Ok(StepOutcome::Continue),
            MachineState::Halted => Ok(StepOutcome::Halted),
        }
    }

    /// Decode the word under the finger without executing it
    pub fn fetch(&self) -> Result<Instruction, MachineError> {
        let word = self
            .heap
            .fetch(self.finger)
            .ok_or(MachineError::FingerOutOfBounds {
                finger: self.finger,
                program_len: self.heap.program().len(),
            })?;
        Instruction::decode(word, self.finger)
    }

    /// Dispatch one decoded instruction and move the finger
    fn execute(&mut self, instruction: Instruction) -> Result<(), MachineError> {
        let (opcode, a, b, c) = match instruction {
            Instruction::Orthography { register, value } => {
                self.orthography(register, value);
                self.finger = self.finger.wrapping_add(1);
                return Ok(());
            }
            Instruction::Standard { opcode, a, b, c } => (opcode, a, b, c),
        };

        match opcode {
            Opcode::ConditionalMove => self.conditional_move(a, b, c),
            Opcode::ArrayIndex => self.array_index(a, b, c)?,
            Opcode::ArrayAmendment => self.array_amendment(a, b, c)?,
            Opcode::Addition => self.addition(a, b, c),
            Opcode::Multiplication => self.multiplication(a, b, c),
            Opcode::Division => self.division(a, b, c),
            Opcode::NotAnd => self.not_and(a, b, c),
            Opcode::Halt => self.state = MachineState::Halted,
            Opcode::Allocation => self.allocation(b, c)?,
            Opcode::Abandonment => self.abandonment(c)?,
            Opcode::Output => self.output(c)?,
            Opcode::Input => self.input(c)?,
            Opcode::LoadProgram => {
                // Sets the finger itself
                self.load_program(b, c)?;
                return Ok(());
            }
            // Decoded as Instruction::Orthography above
            Opcode::Orthography => {}
        }

        self.finger = self.finger.wrapping_add(1);
        Ok(())
    }

    /// Convert a heap fault, locating it at the current instruction
    pub(crate) fn heap_fault(&self, err: HeapError) -> MachineError {
        MachineError::from_heap(err, self.finger)
    }

    // ========== Getter methods ==========

    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut RegisterFile {
        &mut self.registers
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn finger(&self) -> u32 {
        self.finger
    }

    pub fn state(&self) -> MachineState {
        self.state
    }

    pub fn is_halted(&self) -> bool {
        self.state == MachineState::Halted
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }
}
