//! # Introduction
//!
//! Exchanger swaps the values held by two mutable locations, and ships a small
//! stepping interpreter that shows the exchange happening inside a C-style
//! program one statement at a time.
//!
//! ```
//! let (mut a, mut b) = (1337, 1338);
//! exchanger::exchange::exchange(&mut a, &mut b);
//! assert_eq!((a, b), (1338, 1337));
//! ```
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Interpreter → Snapshots → TUI / trace
//! ```
//!
//! 1. [`exchange`]: the exchange operation itself.
//! 2. [`parser`]: tokenises the source and builds an AST.
//! 3. [`interpreter`]: walks the AST and captures a [`snapshot::Snapshot`]
//!    after each statement.
//! 4. [`memory`]: tagged [`memory::value::Value`]s stored in a virtual
//!    [`memory::stack::Stack`] with stable addresses.
//! 5. [`snapshot`]: snapshot history with a memory limit.
//! 6. [`trace`] and [`ui`]: plain-text and ratatui views of the history.
//!
//! ## Supported C subset
//!
//! Types: `int`, `void`, `const`, pointers.
//! Statements: declarations, assignments through variables or `*p`, calls,
//! `return`. Functions may be called from file scope; `main` runs last when
//! defined. `swap(int *, int *)` is built in unless the program defines it.

pub mod exchange;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;
pub mod trace;
pub mod ui;

/// Program run when no file is given on the command line
pub const EXAMPLE_SOURCE: &str = include_str!("../demos/swap.c");
