//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime values
//! in the interpreter. Unlike C's raw memory model, values are tagged and type-safe.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 32-bit signed integer
//! - [`Value::Pointer`]: 64-bit virtual address of a stack cell
//! - [`Value::Null`]: Null pointer (address 0)
//! - [`Value::Uninitialized`]: Marker for uninitialized memory
//!
//! # Initialization Tracking
//!
//! The `Uninitialized` variant enables detection of reads from uninitialized memory,
//! a common source of undefined behavior in C.

use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Value {
    Int(i32),
    Pointer(Address),
    Null,
    #[default]
    Uninitialized,
}

/// Memory address type (64-bit)
pub type Address = u64;

impl Value {
    /// Check if this value is initialized
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Value::Uninitialized)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Pointer(addr) => write!(f, "0x{:08x}", addr),
            Value::Null => write!(f, "NULL"),
            Value::Uninitialized => write!(f, "?"),
        }
    }
}
