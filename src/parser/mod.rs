//! C source code parser
//!
//! This module transforms C source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! Just enough C to write a pointer-based swap and call it:
//! - Types: `int`, `void`, `const`, pointers of any depth
//! - Top level: function definitions, global declarations, and bare statements
//!   (executed in order, like a script)
//! - Statements: declarations, assignment to `x` or `*p`, calls, `return`
//! - Expressions: integer literals, `NULL`, variables, `*p`, `&x`, calls
//! - `#include` lines are skipped

pub mod ast;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
