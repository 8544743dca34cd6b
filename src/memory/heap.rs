//! Array heap for the Universal Machine
//!
//! The heap maps 32-bit slot identifiers to variable-length word arrays:
//! - Slot 0 always holds the executing program and is never handed out
//! - Allocation reuses abandoned identifiers before minting fresh ones
//! - Every access is checked for liveness and bounds
//!
//! # Free-list
//!
//! Abandoned identifiers are kept on a stack, so the most recently abandoned
//! slot is the next one reused. Fresh identifiers count up from 1.
//!
//! # Error Handling
//!
//! Methods return [`HeapError`], which carries no execution context. The engine
//! attaches the faulting instruction's finger when converting it into a
//! [`MachineError`](crate::machine::errors::MachineError).

use crate::loader::{self, LoadError};
use crate::machine::constants::PROGRAM_SLOT;
use rustc_hash::FxHashMap;
use std::fmt;

/// Heap access faults
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeapError {
    InactiveArray { slot: u32 },
    IndexOutOfBounds { slot: u32, offset: u32, len: usize },
    SlotsExhausted,
    OutOfMemory { requested: u32 },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InactiveArray { slot } => write!(f, "array {} is not allocated", slot),
            HeapError::IndexOutOfBounds { slot, offset, len } => write!(
                f,
                "offset {} out of bounds for array {} of length {}",
                offset, slot, len
            ),
            HeapError::SlotsExhausted => write!(f, "no free array identifiers left"),
            HeapError::OutOfMemory { requested } => {
                write!(f, "cannot allocate an array of {} words", requested)
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// The heap
#[derive(Debug, Clone)]
pub struct Heap {
    program: Vec<u32>,
    arrays: FxHashMap<u32, Vec<u32>>,
    free_slots: Vec<u32>,
    next_slot: u64,
}

impl Heap {
    /// Create a heap whose slot 0 holds `program`
    pub fn new(program: Vec<u32>) -> Self {
        Heap {
            program,
            arrays: FxHashMap::default(),
            free_slots: Vec::new(),
            next_slot: 1,
        }
    }

    /// Initialize slot 0 from a raw big-endian image
    pub fn load_program_bytes(&mut self, bytes: &[u8]) -> Result<(), LoadError> {
        self.program = loader::words_from_bytes(bytes)?;
        Ok(())
    }

    /// Allocate a zeroed array of `length` words
    pub fn allocate(&mut self, length: u32) -> Result<u32, HeapError> {
        let mut array = Vec::new();
        array
            .try_reserve_exact(length as usize)
            .map_err(|_| HeapError::OutOfMemory { requested: length })?;
        array.resize(length as usize, 0);

        let slot = match self.free_slots.pop() {
            Some(slot) => slot,
            None => {
                if self.next_slot > u32::MAX as u64 {
                    return Err(HeapError::SlotsExhausted);
                }
                let slot = self.next_slot as u32;
                self.next_slot += 1;
                slot
            }
        };

        self.arrays.insert(slot, array);
        Ok(slot)
    }

    /// Abandon an array, making its identifier available again.
    ///
    /// Abandoning slot 0 is ignored; abandoning a slot that is not live is an error.
    pub fn free(&mut self, slot: u32) -> Result<(), HeapError> {
        if slot == PROGRAM_SLOT {
            return Ok(());
        }

        match self.arrays.remove(&slot) {
            Some(_) => {
                self.free_slots.push(slot);
                Ok(())
            }
            None => Err(HeapError::InactiveArray { slot }),
        }
    }

    /// Read one word
    pub fn read(&self, slot: u32, offset: u32) -> Result<u32, HeapError> {
        let array = self.array(slot)?;
        array
            .get(offset as usize)
            .copied()
            .ok_or(HeapError::IndexOutOfBounds {
                slot,
                offset,
                len: array.len(),
            })
    }

    /// Write one word
    pub fn write(&mut self, slot: u32, offset: u32, value: u32) -> Result<(), HeapError> {
        let array = self.array_mut(slot)?;
        let len = array.len();
        match array.get_mut(offset as usize) {
            Some(word) => {
                *word = value;
                Ok(())
            }
            None => Err(HeapError::IndexOutOfBounds { slot, offset, len }),
        }
    }

    /// Replace the program with a copy of the array at `slot`.
    ///
    /// Loading slot 0 leaves the program untouched.
    pub fn replace_program(&mut self, slot: u32) -> Result<(), HeapError> {
        if slot == PROGRAM_SLOT {
            return Ok(());
        }

        let source = self
            .arrays
            .get(&slot)
            .ok_or(HeapError::InactiveArray { slot })?;
        self.program.clone_from(source);
        Ok(())
    }

    /// Instruction word at `finger`, if it lies inside the program
    #[inline]
    pub fn fetch(&self, finger: u32) -> Option<u32> {
        self.program.get(finger as usize).copied()
    }

    /// The current program image
    pub fn program(&self) -> &[u32] {
        &self.program
    }

    /// Borrow a live array (slot 0 is the program)
    pub fn get(&self, slot: u32) -> Option<&[u32]> {
        self.array(slot).ok()
    }

    /// Whether `slot` currently holds an array
    pub fn is_live(&self, slot: u32) -> bool {
        slot == PROGRAM_SLOT || self.arrays.contains_key(&slot)
    }

    /// Identifiers of all live arrays except the program, ascending
    pub fn live_slots(&self) -> Vec<u32> {
        let mut slots: Vec<u32> = self.arrays.keys().copied().collect();
        slots.sort_unstable();
        slots
    }

    /// Number of live arrays except the program
    pub fn live_count(&self) -> usize {
        self.arrays.len()
    }

    /// Total words held by all arrays, program included
    pub fn total_words(&self) -> usize {
        self.program.len() + self.arrays.values().map(Vec::len).sum::<usize>()
    }

    fn array(&self, slot: u32) -> Result<&[u32], HeapError> {
        if slot == PROGRAM_SLOT {
            return Ok(self.program.as_slice());
        }
        self.arrays
            .get(&slot)
            .map(Vec::as_slice)
            .ok_or(HeapError::InactiveArray { slot })
    }

    fn array_mut(&mut self, slot: u32) -> Result<&mut [u32], HeapError> {
        if slot == PROGRAM_SLOT {
            return Ok(self.program.as_mut_slice());
        }
        self.arrays
            .get_mut(&slot)
            .map(Vec::as_mut_slice)
            .ok_or(HeapError::InactiveArray { slot })
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
