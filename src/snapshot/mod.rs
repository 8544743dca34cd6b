// Snapshot management for reverse execution

use crate::console::MockTerminal;
use crate::machine::decode::Instruction;
use crate::machine::engine::{Machine, MachineState};
use crate::machine::errors::MachineError;
use crate::memory::{heap::Heap, registers::RegisterFile};

/// Default snapshot memory budget (256 MB)
pub const DEFAULT_SNAPSHOT_MEMORY: usize = 256 * 1024 * 1024;

/// Default number of instructions recorded
pub const DEFAULT_STEP_LIMIT: u64 = 100_000;

/// Machine state captured before an instruction executes
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub registers: RegisterFile,
    pub heap: Heap,
    pub terminal: MockTerminal,
    pub finger: u32,
    pub state: MachineState,
    pub cycle: u64,
    /// Instruction under the finger, if it decodes
    pub instruction: Option<Instruction>,
}

impl Snapshot {
    pub fn capture(machine: &Machine<MockTerminal>) -> Self {
        Snapshot {
            registers: machine.registers().clone(),
            heap: machine.heap().clone(),
            terminal: machine.console().clone(),
            finger: machine.finger(),
            state: machine.state(),
            cycle: machine.cycles(),
            instruction: machine.fetch().ok(),
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Words plus a rough per-array overhead for the slot table
        let heap_size = self.heap.total_words() * 4 + self.heap.live_count() * 32;
        let terminal_size = self.terminal.output().len();

        heap_size + terminal_size + std::mem::size_of::<Snapshot>()
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), MachineError> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(MachineError::SnapshotLimitExceeded {
                current: self.current_memory,
                limit: self.max_memory,
            });
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }
}

/// Recording budget for a trace
#[derive(Debug, Clone, Copy)]
pub struct TraceLimits {
    pub max_memory: usize,
    pub max_steps: u64,
}

impl Default for TraceLimits {
    fn default() -> Self {
        TraceLimits {
            max_memory: DEFAULT_SNAPSHOT_MEMORY,
            max_steps: DEFAULT_STEP_LIMIT,
        }
    }
}

/// Why recording stopped
#[derive(Debug)]
pub enum TraceOutcome {
    /// The program executed its halt instruction
    Halted,
    /// The instruction in the last snapshot faulted
    Faulted(MachineError),
    /// The step limit was reached while the machine was still running
    StepLimitReached,
    /// The snapshot memory budget ran out
    SnapshotLimitReached(MachineError),
}

/// A recorded run that can be navigated backward and forward
#[derive(Debug)]
pub struct Trace {
    snapshots: SnapshotManager,
    position: usize,
    outcome: TraceOutcome,
}

impl Trace {
    /// Run `program` against scripted `input`, capturing a snapshot before every instruction
    pub fn record(program: Vec<u32>, input: Vec<u8>, limits: TraceLimits) -> Self {
        let mut machine = Machine::new(program, MockTerminal::with_input(input));
        let mut snapshots = SnapshotManager::new(limits.max_memory);

        let outcome = loop {
            if let Err(e) = snapshots.push(Snapshot::capture(&machine)) {
                break TraceOutcome::SnapshotLimitReached(e);
            }
            if machine.is_halted() {
                break TraceOutcome::Halted;
            }
            if machine.cycles() >= limits.max_steps {
                break TraceOutcome::StepLimitReached;
            }
            if let Err(e) = machine.step() {
                break TraceOutcome::Faulted(e);
            }
        };

        Trace {
            snapshots,
            position: 0,
            outcome,
        }
    }

    /// Snapshot at the current history position
    pub fn current(&self) -> Option<&Snapshot> {
        self.snapshots.get(self.position)
    }

    pub fn snapshot_at(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), MachineError> {
        if self.position == 0 {
            return Err(MachineError::Generic {
                message: "Already at the beginning of execution".to_string(),
            });
        }
        self.position -= 1;
        Ok(())
    }

    /// Step forward in execution (restore next snapshot if available)
    pub fn step_forward(&mut self) -> Result<(), MachineError> {
        if self.position + 1 >= self.snapshots.len() {
            return Err(MachineError::Generic {
                message: "No more snapshots available (execution finished)".to_string(),
            });
        }
        self.position += 1;
        Ok(())
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), MachineError> {
        if self.snapshots.is_empty() {
            return Err(MachineError::Generic {
                message: "No snapshots available".to_string(),
            });
        }
        self.position = 0;
        Ok(())
    }

    /// Jump to the last recorded snapshot
    pub fn jump_to_end(&mut self) {
        self.position = self.snapshots.len().saturating_sub(1);
    }

    pub fn history_position(&self) -> usize {
        self.position
    }

    pub fn total_snapshots(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_at_end(&self) -> bool {
        self.position + 1 >= self.snapshots.len()
    }

    pub fn outcome(&self) -> &TraceOutcome {
        &self.outcome
    }

    /// The fault to highlight at the current position, if any
    pub fn error_here(&self) -> Option<&MachineError> {
        match &self.outcome {
            TraceOutcome::Faulted(e) if self.is_at_end() => Some(e),
            _ => None,
        }
    }

    pub fn memory_usage(&self) -> usize {
        self.snapshots.memory_usage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::decode::Opcode;

    fn program(instructions: &[Instruction]) -> Vec<u32> {
        instructions.iter().map(|i| i.encode()).collect()
    }

    #[test]
    fn test_trace_records_every_step() {
        let trace = Trace::record(
            program(&[
                Instruction::orthography(0, b'H' as u32),
                Instruction::standard(Opcode::Output, 0, 0, 0),
                Instruction::standard(Opcode::Halt, 0, 0, 0),
            ]),
            Vec::new(),
            TraceLimits::default(),
        );

        // One snapshot before each instruction plus the halted state
        assert_eq!(trace.total_snapshots(), 4);
        assert!(matches!(trace.outcome(), TraceOutcome::Halted));

        let first = trace.current().unwrap();
        assert_eq!(first.finger, 0);
        assert_eq!(first.instruction, Some(Instruction::orthography(0, 72)));
        assert!(first.terminal.output().is_empty());
    }

    #[test]
    fn test_navigation() {
        let mut trace = Trace::record(
            program(&[
                Instruction::orthography(1, 5),
                Instruction::standard(Opcode::Halt, 0, 0, 0),
            ]),
            Vec::new(),
            TraceLimits::default(),
        );

        assert!(trace.step_backward().is_err());
        trace.step_forward().unwrap();
        assert_eq!(trace.current().unwrap().registers.values()[1], 5);
        trace.step_forward().unwrap();
        assert!(trace.is_at_end());
        assert_eq!(trace.current().unwrap().state, MachineState::Halted);
        assert!(trace.step_forward().is_err());

        trace.rewind_to_start().unwrap();
        assert_eq!(trace.history_position(), 0);
        trace.jump_to_end();
        assert_eq!(trace.history_position(), 2);
    }

    #[test]
    fn test_fault_ends_recording() {
        let trace = Trace::record(
            program(&[Instruction::orthography(0, 1)]),
            Vec::new(),
            TraceLimits::default(),
        );
        assert_eq!(trace.total_snapshots(), 2);
        assert!(matches!(
            trace.outcome(),
            TraceOutcome::Faulted(MachineError::FingerOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_step_limit() {
        // Tight loop: load program from slot 0 back to offset 0
        let trace = Trace::record(
            program(&[Instruction::standard(Opcode::LoadProgram, 0, 0, 0)]),
            Vec::new(),
            TraceLimits {
                max_memory: DEFAULT_SNAPSHOT_MEMORY,
                max_steps: 10,
            },
        );
        assert_eq!(trace.total_snapshots(), 11);
        assert!(matches!(trace.outcome(), TraceOutcome::StepLimitReached));
    }

    #[test]
    fn test_snapshot_memory_limit() {
        let trace = Trace::record(
            program(&[Instruction::standard(Opcode::LoadProgram, 0, 0, 0)]),
            Vec::new(),
            TraceLimits {
                max_memory: 1,
                max_steps: 10,
            },
        );
        assert_eq!(trace.total_snapshots(), 0);
        assert!(trace.current().is_none());
        assert!(matches!(
            trace.outcome(),
            TraceOutcome::SnapshotLimitReached(MachineError::SnapshotLimitExceeded { .. })
        ));
    }
}
