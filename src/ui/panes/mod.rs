//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with syntax highlighting and current line indicator
//! - [`stack`]: Global frame and call frames with every variable's address and value
//! - [`status`]: Status bar with keybindings and execution state
//!
//! Each pane module exports a stateless `render_*` function plus whatever
//! scroll state it needs between frames.

pub mod source;
pub mod stack;
pub mod status;

pub use source::{render_source_pane, SourceScrollState};
pub use stack::{render_stack_pane, StackRenderData, StackScrollState};
pub use status::render_status_bar;
