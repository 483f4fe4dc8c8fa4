//! Built-in function implementations
//!
//! Functions the interpreter handles directly when the program does not
//! define them itself. A user definition with the same name always wins.
//!
//! # Supported Built-ins
//!
//! - `swap(int *x, int *y)`: exchange the two pointed-to values in place.
//!   Both pointers must be non-null, live and point at cells of the same
//!   type. Neither the cells nor the pointers' pointees may be `const`.
//!   `swap(&a, &a)` leaves `a` unchanged.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::{Address, Value};
use crate::parser::ast::{AstNode, SourceLocation};

impl Interpreter {
    pub(crate) fn call_builtin(
        &mut self,
        name: &str,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        match name {
            "swap" => {
                self.builtin_swap(args, location)?;
                Ok(None)
            }
            _ => Err(RuntimeError::UndefinedFunction {
                name: name.to_string(),
                location,
            }),
        }
    }

    fn builtin_swap(&mut self, args: &[AstNode], location: SourceLocation) -> Result<(), RuntimeError> {
        let [first_arg, second_arg] = args else {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: "swap".to_string(),
                expected: 2,
                got: args.len(),
                location,
            });
        };

        let first = self.deref_address(first_arg, location)?;
        let second = self.deref_address(second_arg, location)?;
        self.check_swappable([(first_arg, first), (second_arg, second)], location)?;

        self.stack
            .exchange(first, second)
            .map_err(|message| RuntimeError::InvalidPointer {
                message,
                address: None,
                location,
            })
    }

    fn check_swappable(
        &self,
        targets: [(&AstNode, Address); 2],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let [(first_arg, first), (second_arg, second)] = targets;
        let invalid = |address: Address| RuntimeError::InvalidPointer {
            message: "Dangling pointer".to_string(),
            address: Some(address),
            location,
        };
        let first_cell = self.stack.cell_at(first).ok_or_else(|| invalid(first))?;
        let second_cell = self.stack.cell_at(second).ok_or_else(|| invalid(second))?;

        for (arg, cell) in [(first_arg, first_cell), (second_arg, second_cell)] {
            if cell.var_type.is_const || self.points_to_const(arg) {
                return Err(RuntimeError::ConstModification {
                    var: cell.name.clone(),
                    location,
                });
            }
        }

        if !first_cell.var_type.same_shape(&second_cell.var_type) {
            return Err(RuntimeError::TypeError {
                expected: format!("pointer to {}", first_cell.var_type),
                got: format!("pointer to {}", second_cell.var_type),
                location,
            });
        }

        Ok(())
    }
}
