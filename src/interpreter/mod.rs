//! Execution engine
//!
//! This module provides the core execution logic:
//! - [`engine`]: Interpreter state, snapshot capture and history navigation
//! - [`errors`]: Runtime error types
//! - [`constants`]: Address layout and limits
//!
//! # Execution Model
//!
//! The interpreter walks the AST and executes statements one at a time.
//! After each leaf statement, and on entry to every call, a snapshot is taken
//! so execution can be replayed forward and backward.
//!
//! # Built-in Functions
//!
//! `swap` is implemented directly in the engine and only used when the
//! program does not define its own.

mod builtins;
pub mod constants;
pub mod engine;
pub mod errors;
mod expressions;
mod statements;
