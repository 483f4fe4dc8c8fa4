// Constants for the interpreter

/// Starting address for stack variable addresses.
/// Address 0 is reserved for NULL.
pub const STACK_ADDRESS_START: u64 = 0x0000_0004;

/// Maximum number of nested function calls before execution is aborted
pub const MAX_CALL_DEPTH: usize = 256;

/// Default snapshot history budget (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
