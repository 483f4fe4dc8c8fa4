//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to parse errors or system errors).
//!
//! All runtime errors are fatal - they halt execution. Snapshots taken before
//! the failure remain navigable.

use crate::parser::ast::SourceLocation;
use std::fmt;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Attempted to read an uninitialized variable
    UninitializedRead {
        var: String,
        address: Option<u64>,
        location: SourceLocation,
    },

    /// Null pointer dereference
    NullDereference { location: SourceLocation },

    /// Attempted to modify a const variable
    ConstModification {
        var: String,
        location: SourceLocation,
    },

    /// Snapshot history limit exceeded
    SnapshotLimitExceeded { current: usize, limit: usize },

    /// Undefined function call
    UndefinedFunction {
        name: String,
        location: SourceLocation,
    },

    /// Undefined variable reference
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Variable declared twice in the same frame
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Type error
    TypeError {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// Function argument count mismatch
    ArgumentCountMismatch {
        function: String,
        expected: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Invalid pointer (dangling stack pointer, address that was never handed out)
    InvalidPointer {
        message: String,
        address: Option<u64>,
        location: SourceLocation,
    },

    /// Call nesting exceeded the interpreter's limit
    StackOverflow {
        depth: usize,
        location: SourceLocation,
    },

    /// History/snapshot navigation failed
    HistoryOperationFailed {
        message: String,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            RuntimeError::UninitializedRead { location, .. } => Some(location),
            RuntimeError::NullDereference { location } => Some(location),
            RuntimeError::ConstModification { location, .. } => Some(location),
            RuntimeError::UndefinedFunction { location, .. } => Some(location),
            RuntimeError::UndefinedVariable { location, .. } => Some(location),
            RuntimeError::Redeclaration { location, .. } => Some(location),
            RuntimeError::TypeError { location, .. } => Some(location),
            RuntimeError::ArgumentCountMismatch { location, .. } => Some(location),
            RuntimeError::InvalidPointer { location, .. } => Some(location),
            RuntimeError::StackOverflow { location, .. } => Some(location),
            RuntimeError::HistoryOperationFailed { location, .. } => Some(location),
            RuntimeError::SnapshotLimitExceeded { .. } => None,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::UninitializedRead { var, location, .. } => {
                write!(
                    f,
                    "Read from uninitialized variable '{}' at line {}",
                    var, location.line
                )
            }
            RuntimeError::NullDereference { location } => {
                write!(f, "Null pointer dereference at line {}", location.line)
            }
            RuntimeError::ConstModification { var, location } => {
                write!(
                    f,
                    "Attempted to modify const variable '{}' at line {}",
                    var, location.line
                )
            }
            RuntimeError::SnapshotLimitExceeded { current, limit } => {
                write!(
                    f,
                    "Snapshot memory limit exceeded: {} bytes used, limit is {}",
                    current, limit
                )
            }
            RuntimeError::UndefinedFunction { name, location } => {
                write!(f, "Undefined function '{}' at line {}", name, location.line)
            }
            RuntimeError::UndefinedVariable { name, location } => {
                write!(f, "Undefined variable '{}' at line {}", name, location.line)
            }
            RuntimeError::Redeclaration { name, location } => {
                write!(f, "Redeclaration of '{}' at line {}", name, location.line)
            }
            RuntimeError::TypeError {
                expected,
                got,
                location,
            } => {
                write!(
                    f,
                    "Type error at line {}: expected {}, got {}",
                    location.line, expected, got
                )
            }
            RuntimeError::ArgumentCountMismatch {
                function,
                expected,
                got,
                location,
            } => {
                write!(
                    f,
                    "Function '{}' expects {} argument{}, got {} at line {}",
                    function,
                    expected,
                    if *expected == 1 { "" } else { "s" },
                    got,
                    location.line
                )
            }
            RuntimeError::InvalidPointer {
                message,
                address,
                location,
            } => {
                if let Some(addr) = address {
                    write!(
                        f,
                        "Invalid pointer at 0x{:x}: {} at line {}",
                        addr, message, location.line
                    )
                } else {
                    write!(f, "Invalid pointer: {} at line {}", message, location.line)
                }
            }
            RuntimeError::StackOverflow { depth, location } => {
                write!(
                    f,
                    "Call depth limit of {} exceeded at line {}",
                    depth, location.line
                )
            }
            RuntimeError::HistoryOperationFailed { message, location } => {
                write!(
                    f,
                    "History operation failed: {} at line {}",
                    message, location.line
                )
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
