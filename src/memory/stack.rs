//! Call stack implementation
//!
//! This module provides the call stack for function execution:
//! - [`Stack`]: The call stack containing frames and every live variable cell
//! - [`StackFrame`]: A single function's activation record
//! - [`Cell`]: A variable's name, declared type and virtual address
//!
//! Frame 0 is always the global frame; it holds file-scope variables and is
//! never popped. Each variable occupies one cell whose address stays fixed for
//! the cell's lifetime, so pointers taken with `&x` can be resolved back to a
//! cell until the owning frame is popped. Addresses are never handed out
//! twice, so a pointer into a popped frame stays unresolvable instead of
//! landing on a newer variable.
//!
//! Cell values live in a separate vector from cell metadata so that two
//! values can be exchanged in place without touching names or types.

use super::sizeof_type;
use super::value::{Address, Value};
use crate::exchange::exchange_at;
use crate::interpreter::constants::STACK_ADDRESS_START;
use crate::parser::ast::{SourceLocation, Type};
use rustc_hash::FxHashMap;

/// Name shown for the global frame
pub const GLOBAL_FRAME_NAME: &str = "<globals>";

/// A variable's storage slot
#[derive(Debug, Clone)]
pub struct Cell {
    pub name: String,
    pub var_type: Type,
    pub address: Address,
}

/// Stack frame for a function call
#[derive(Debug, Clone)]
pub struct StackFrame {
    pub function_name: String,
    pub return_location: Option<SourceLocation>, // Call site in the caller
    locals: FxHashMap<String, usize>,            // Name -> cell index
    base_cell: usize,
}

impl StackFrame {
    fn new(function_name: String, return_location: Option<SourceLocation>, base_cell: usize) -> Self {
        StackFrame {
            function_name,
            return_location,
            locals: FxHashMap::default(),
            base_cell,
        }
    }
}

/// The call stack
#[derive(Debug, Clone)]
pub struct Stack {
    frames: Vec<StackFrame>,
    cells: Vec<Cell>,
    values: Vec<Value>,
    address_map: FxHashMap<Address, usize>,
    next_address: Address,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            frames: vec![StackFrame::new(GLOBAL_FRAME_NAME.to_string(), None, 0)],
            cells: Vec::new(),
            values: Vec::new(),
            address_map: FxHashMap::default(),
            next_address: STACK_ADDRESS_START,
        }
    }

    /// Push a new stack frame
    pub fn push_frame(&mut self, function_name: String, return_location: Option<SourceLocation>) {
        self.frames
            .push(StackFrame::new(function_name, return_location, self.cells.len()));
    }

    /// Pop the top stack frame, releasing its cells. The global frame is never popped.
    ///
    /// Released addresses are retired rather than reused.
    pub fn pop_frame(&mut self) -> Option<StackFrame> {
        if self.frames.len() <= 1 {
            return None;
        }
        let frame = self.frames.pop()?;

        for cell in self.cells.drain(frame.base_cell..) {
            self.address_map.remove(&cell.address);
        }
        self.values.truncate(frame.base_cell);

        Some(frame)
    }

    /// Declare a variable in the current frame and return its address
    pub fn declare_var(
        &mut self,
        name: &str,
        var_type: Type,
        value: Value,
    ) -> Result<Address, String> {
        let index = self.cells.len();
        let address = self.next_address;
        let size = sizeof_type(&var_type).max(1) as Address;

        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| "No stack frame".to_string())?;
        if frame.locals.contains_key(name) {
            return Err(format!(
                "Redeclaration of '{}' in {}",
                name, frame.function_name
            ));
        }
        frame.locals.insert(name.to_string(), index);

        self.cells.push(Cell {
            name: name.to_string(),
            var_type,
            address,
        });
        self.values.push(value);
        self.address_map.insert(address, index);
        self.next_address += size;

        Ok(address)
    }

    /// Resolve a variable name: current frame first, then globals
    pub fn lookup(&self, name: &str) -> Option<Address> {
        let current = self.frames.last()?;
        let index = current
            .locals
            .get(name)
            .or_else(|| self.frames.first()?.locals.get(name))?;
        self.cells.get(*index).map(|cell| cell.address)
    }

    /// Get the cell stored at an address
    pub fn cell_at(&self, address: Address) -> Option<&Cell> {
        self.address_map
            .get(&address)
            .and_then(|&index| self.cells.get(index))
    }

    /// Get the value stored at an address
    pub fn value_at(&self, address: Address) -> Option<Value> {
        self.address_map
            .get(&address)
            .and_then(|&index| self.values.get(index))
            .copied()
    }

    /// Overwrite the value stored at an address
    pub fn write(&mut self, address: Address, value: Value) -> Result<(), String> {
        let index = self.index_of(address)?;
        let slot = self
            .values
            .get_mut(index)
            .ok_or_else(|| format!("No cell at 0x{:08x}", address))?;
        *slot = value;
        Ok(())
    }

    /// Exchange the values stored at two addresses.
    ///
    /// Both addresses are validated before anything is written. Exchanging an
    /// address with itself leaves the value unchanged.
    pub fn exchange(&mut self, first: Address, second: Address) -> Result<(), String> {
        let first_index = self.index_of(first)?;
        let second_index = self.index_of(second)?;
        exchange_at(&mut self.values, first_index, second_index)
            .map_err(|index| format!("Cell index {} out of range", index))
    }

    /// Render a value for display. Pointers include the name of their target.
    pub fn describe(&self, value: &Value) -> String {
        match value {
            Value::Pointer(address) => match self.cell_at(*address) {
                Some(cell) => format!("{} → {}", value, cell.name),
                None => format!("{} (dangling)", value),
            },
            other => other.to_string(),
        }
    }

    fn index_of(&self, address: Address) -> Result<usize, String> {
        self.address_map
            .get(&address)
            .copied()
            .ok_or_else(|| format!("No variable lives at 0x{:08x}", address))
    }

    /// Cells and values of one frame, in declaration order
    pub fn frame_cells(&self, depth: usize) -> Vec<(&Cell, Value)> {
        let Some(frame) = self.frames.get(depth) else {
            return Vec::new();
        };
        let end = self
            .frames
            .get(depth + 1)
            .map_or(self.cells.len(), |next| next.base_cell);

        self.cells
            .get(frame.base_cell..end)
            .unwrap_or_default()
            .iter()
            .zip(self.values.get(frame.base_cell..end).unwrap_or_default())
            .map(|(cell, value)| (cell, *value))
            .collect()
    }

    /// Get the current (top) frame
    pub fn current_frame(&self) -> Option<&StackFrame> {
        self.frames.last()
    }

    /// Get all frames, global frame first (for UI display)
    pub fn frames(&self) -> &[StackFrame] {
        &self.frames
    }

    /// Number of frames, including the global frame
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Total number of live cells across all frames
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::BaseType;

    fn int() -> Type {
        Type::new(BaseType::Int)
    }

    #[test]
    fn test_declare_and_lookup_globals() {
        let mut stack = Stack::new();
        let a = stack.declare_var("a", int(), Value::Int(1337)).unwrap();
        let b = stack.declare_var("b", int(), Value::Int(1338)).unwrap();

        assert_eq!(a, STACK_ADDRESS_START);
        assert_eq!(b, STACK_ADDRESS_START + 4);
        assert_eq!(stack.lookup("a"), Some(a));
        assert_eq!(stack.value_at(b), Some(Value::Int(1338)));
        assert_eq!(stack.cell_at(a).map(|c| c.name.as_str()), Some("a"));
    }

    #[test]
    fn test_locals_shadow_globals_and_are_released() {
        let mut stack = Stack::new();
        let global = stack.declare_var("x", int(), Value::Int(1)).unwrap();

        stack.push_frame("f".to_string(), None);
        let local = stack
            .declare_var("x", int().with_pointer(), Value::Pointer(global))
            .unwrap();
        assert_eq!(local, global + 4);
        assert_eq!(stack.lookup("x"), Some(local));

        let popped = stack.pop_frame().unwrap();
        assert_eq!(popped.function_name, "f");
        assert_eq!(stack.lookup("x"), Some(global));
        assert!(stack.cell_at(local).is_none());

        // The next frame gets fresh addresses
        stack.push_frame("g".to_string(), None);
        let fresh = stack.declare_var("y", int(), Value::Int(2)).unwrap();
        assert!(fresh > local);
        assert!(stack.cell_at(local).is_none());
        assert!(stack.exchange(local, fresh).is_err());
    }

    #[test]
    fn test_global_frame_cannot_be_popped() {
        let mut stack = Stack::new();
        assert!(stack.pop_frame().is_none());
        assert_eq!(stack.depth(), 1);
    }

    #[test]
    fn test_redeclaration_in_same_frame() {
        let mut stack = Stack::new();
        stack.declare_var("a", int(), Value::Int(1)).unwrap();
        assert!(stack.declare_var("a", int(), Value::Int(2)).is_err());
    }

    #[test]
    fn test_exchange_by_address() {
        let mut stack = Stack::new();
        let a = stack.declare_var("a", int(), Value::Int(1337)).unwrap();
        let b = stack.declare_var("b", int(), Value::Int(1338)).unwrap();

        stack.exchange(a, b).unwrap();
        assert_eq!(stack.value_at(a), Some(Value::Int(1338)));
        assert_eq!(stack.value_at(b), Some(Value::Int(1337)));

        // Names and types stay with their cells
        assert_eq!(stack.cell_at(a).map(|c| c.name.as_str()), Some("a"));
    }

    #[test]
    fn test_exchange_same_address_is_noop() {
        let mut stack = Stack::new();
        let a = stack.declare_var("a", int(), Value::Int(1337)).unwrap();
        stack.exchange(a, a).unwrap();
        assert_eq!(stack.value_at(a), Some(Value::Int(1337)));
    }

    #[test]
    fn test_exchange_unknown_address_writes_nothing() {
        let mut stack = Stack::new();
        let a = stack.declare_var("a", int(), Value::Int(1337)).unwrap();
        assert!(stack.exchange(a, 0xdead).is_err());
        assert!(stack.exchange(0xdead, a).is_err());
        assert_eq!(stack.value_at(a), Some(Value::Int(1337)));
    }

    #[test]
    fn test_frame_cells_in_declaration_order() {
        let mut stack = Stack::new();
        stack.declare_var("a", int(), Value::Int(1)).unwrap();
        stack.declare_var("b", int(), Value::Int(2)).unwrap();
        stack.push_frame("swap".to_string(), None);
        stack.declare_var("c", int().with_pointer(), Value::Null).unwrap();

        let globals: Vec<_> = stack
            .frame_cells(0)
            .into_iter()
            .map(|(cell, _)| cell.name.clone())
            .collect();
        assert_eq!(globals, vec!["a", "b"]);

        let locals = stack.frame_cells(1);
        assert_eq!(locals.len(), 1);
        assert_eq!(locals[0].1, Value::Null);
        assert!(stack.frame_cells(7).is_empty());
    }
}
