//! Universal Machine execution engine
//!
//! This module provides the core execution logic:
//! - [`decode`]: instruction word layout and disassembly
//! - [`engine`]: the [`Machine`](engine::Machine) and its fetch-decode-execute cycle
//! - [`ops`]: one handler per operation, grouped by what they touch
//! - [`errors`]: runtime fault types
//!
//! # Execution Model
//!
//! The machine is either running or halted. Each cycle fetches the word under
//! the execution finger from slot 0, decodes it, executes it and advances the
//! finger by one, except for load-program, which places the finger itself.
//! The halt instruction is the only normal way out; every other stop is a
//! [`MachineError`](errors::MachineError).

pub mod constants;
pub mod decode;
pub mod engine;
pub mod errors;
pub mod ops;
