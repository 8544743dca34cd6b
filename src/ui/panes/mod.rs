//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`program`]: Disassembly of slot 0 with the execution finger highlighted
//! - [`registers`]: The eight registers, with values changed by the last step marked
//! - [`heap`]: Live arrays with identifiers, lengths and hex dumps
//! - [`terminal`]: Bytes written by the output instruction
//! - [`status`]: Status bar with keybindings and execution state
//!
//! Each pane module exports a primary `render_*` function plus the scroll
//! state it keeps between frames.

pub mod heap;
pub mod program;
pub mod registers;
pub mod status;
pub mod terminal;

pub use heap::{render_heap_pane, HeapRenderData, HeapScrollState};
pub use program::{render_program_pane, ProgramScrollState};
pub use registers::render_registers_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::{render_terminal_pane, TerminalScrollState};
