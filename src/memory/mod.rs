//! Memory model for the Universal Machine
//!
//! This module provides the two stores an instruction can touch:
//! - [`registers`]: the eight 32-bit general-purpose registers
//! - [`heap`]: the collection of word arrays, with slot 0 holding the program
//!
//! # Words
//!
//! Every value is an unsigned 32-bit word. Arithmetic on words wraps modulo
//! 2^32; the machine never traps on overflow.

pub mod heap;
pub mod registers;
