//! Memory model for the interpreter
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (Int, Pointer, Null, Uninitialized)
//! - [`stack`]: Call stack with frames, variable cells and address resolution
//!
//! # Type Sizes
//!
//! Sizes are fixed and platform-independent. They only decide how far apart
//! consecutive cells are placed in the virtual address space:
//! - `int`: 4 bytes
//! - `pointer`: 8 bytes (regardless of pointee type)

pub mod stack;
pub mod value;

use crate::parser::ast::{BaseType, Type};

/// Calculate the size of a type in bytes
pub fn sizeof_type(t: &Type) -> usize {
    if t.pointer_depth > 0 {
        return 8;
    }

    match t.base {
        BaseType::Int => 4,
        BaseType::Void => 0, // sizeof(void) is technically undefined, but we use 0
    }
}
