//! Runtime error types for the Universal Machine
//!
//! This module defines [`MachineError`], which represents every fault that can
//! stop a running machine (as opposed to [`LoadError`](crate::loader::LoadError),
//! which is reported before execution begins).
//!
//! All machine errors are fatal. There is no recovery path: the only graceful
//! termination is the halt instruction.

use crate::memory::heap::HeapError;
use std::fmt;
use std::io;

/// Faults raised by the fetch-decode-execute cycle
#[derive(Debug)]
pub enum MachineError {
    /// Operation code outside 0..=13
    InvalidOpcode { opcode: u32, word: u32, finger: u32 },

    /// Instruction fetch past the end of the program array
    FingerOutOfBounds { finger: u32, program_len: usize },

    /// Reference to a slot that holds no live array
    InactiveArray { slot: u32, finger: u32 },

    /// Offset outside the bounds of a live array
    IndexOutOfBounds {
        slot: u32,
        offset: u32,
        len: usize,
        finger: u32,
    },

    /// Every 32-bit array identifier is in use
    SlotsExhausted { finger: u32 },

    /// The host could not provide memory for a new array
    OutOfMemory { requested: u32, finger: u32 },

    /// The console transport failed
    Io(io::Error),

    /// Snapshot history limit exceeded while recording a trace
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// History navigation and other non-fault conditions
    Generic { message: String },
}

impl MachineError {
    /// Attach the execution finger to a heap fault
    pub(crate) fn from_heap(err: HeapError, finger: u32) -> Self {
        match err {
            HeapError::InactiveArray { slot } => MachineError::InactiveArray { slot, finger },
            HeapError::IndexOutOfBounds { slot, offset, len } => MachineError::IndexOutOfBounds {
                slot,
                offset,
                len,
                finger,
            },
            HeapError::SlotsExhausted => MachineError::SlotsExhausted { finger },
            HeapError::OutOfMemory { requested } => MachineError::OutOfMemory { requested, finger },
        }
    }

    /// Finger of the faulting instruction, if the fault came from one
    pub fn finger(&self) -> Option<u32> {
        match self {
            MachineError::InvalidOpcode { finger, .. } => Some(*finger),
            MachineError::FingerOutOfBounds { finger, .. } => Some(*finger),
            MachineError::InactiveArray { finger, .. } => Some(*finger),
            MachineError::IndexOutOfBounds { finger, .. } => Some(*finger),
            MachineError::SlotsExhausted { finger } => Some(*finger),
            MachineError::OutOfMemory { finger, .. } => Some(*finger),
            MachineError::Io(_) => None,
            MachineError::SnapshotLimitExceeded { .. } => None,
            MachineError::Generic { .. } => None,
        }
    }
}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineError::InvalidOpcode {
                opcode,
                word,
                finger,
            } => {
                write!(
                    f,
                    "Invalid opcode {} in word 0x{:08x} at finger {}",
                    opcode, word, finger
                )
            }
            MachineError::FingerOutOfBounds {
                finger,
                program_len,
            } => {
                write!(
                    f,
                    "Execution finger {} is outside the program ({} words)",
                    finger, program_len
                )
            }
            MachineError::InactiveArray { slot, finger } => {
                write!(
                    f,
                    "Array {} is not allocated (instruction at finger {})",
                    slot, finger
                )
            }
            MachineError::IndexOutOfBounds {
                slot,
                offset,
                len,
                finger,
            } => {
                write!(
                    f,
                    "Offset {} out of bounds for array {} of length {} (instruction at finger {})",
                    offset, slot, len, finger
                )
            }
            MachineError::SlotsExhausted { finger } => {
                write!(
                    f,
                    "No free array identifiers left (instruction at finger {})",
                    finger
                )
            }
            MachineError::OutOfMemory { requested, finger } => {
                write!(
                    f,
                    "Out of memory allocating {} words (instruction at finger {})",
                    requested, finger
                )
            }
            MachineError::Io(err) => write!(f, "Console I/O failed: {}", err),
            MachineError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            MachineError::Generic { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for MachineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MachineError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for MachineError {
    fn from(err: io::Error) -> Self {
        MachineError::Io(err)
    }
}
