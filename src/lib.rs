//! # Introduction
//!
//! umtty executes Universal Machine programs: big-endian images of 32-bit
//! instruction words run by a machine with eight registers and a heap of
//! numbered word arrays.  Slot 0 of the heap always holds the running program.
//!
//! ## Execution pipeline
//!
//! ```text
//! Image → Loader → Heap slot 0 → Machine (fetch / decode / execute) → Console
//! ```
//!
//! 1. [`loader`] reads an image file and assembles it into words.
//! 2. [`machine`] decodes and executes instructions until halt or a fault.
//! 3. [`memory`] holds the register file and the array heap.
//! 4. [`console`] is the byte-level input/output device the machine talks to,
//!    either the process's stdin/stdout or an in-memory [`console::MockTerminal`].
//! 5. [`snapshot`] records a run one instruction at a time so it can be
//!    stepped backward and forward.
//! 6. [`ui`] is the ratatui trace viewer used by `umtty-trace`; not part of the
//!    stable library API.

pub mod console;
pub mod loader;
pub mod machine;
pub mod memory;
pub mod snapshot;
pub mod ui;
