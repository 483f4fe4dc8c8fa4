//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: application state, keyboard event loop and pane focus
//! - **[`panes`]**: stateless render functions for the source, stack and status panes
//! - **[`theme`]**: color palette shared by all panes
//!
//! Construct an [`App`] with a finished [`Interpreter`] and call [`App::run`]
//! to browse its history.
//!
//! [`Interpreter`]: crate::interpreter::engine::Interpreter
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
