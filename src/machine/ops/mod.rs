pub mod arith;
pub mod array;
pub mod io;

// Handlers are `impl Machine` blocks; nothing to re-export
