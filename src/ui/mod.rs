//! Trace viewer built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - [`app`]: event loop, pane focus, auto-play, navigation over a [`Trace`]
//! - [`panes`]: one render function per pane (program, registers, heap,
//!   output, status bar)
//! - [`theme`]: the colour palette
//!
//! Construct an [`App`] from a recorded [`Trace`] and call [`App::run`].
//!
//! [`Trace`]: crate::snapshot::Trace
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
