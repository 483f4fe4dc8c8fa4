//! Expression evaluation
//!
//! Evaluates literals, variable reads, `*p`, `&x` and calls to runtime
//! [`Value`]s, and resolves assignment targets to stack addresses.
//!
//! Every read checks for uninitialized cells; every dereference checks for
//! `NULL` and for pointers whose target frame has already been popped.
//! Popped addresses are never reused, so such a pointer always fails to
//! resolve.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::{Address, Value};
use crate::parser::ast::*;

impl Interpreter {
    /// Evaluate an expression to a value
    pub(crate) fn evaluate_expr(&mut self, expr: &AstNode) -> Result<Value, RuntimeError> {
        let location = *expr.location();

        match expr {
            AstNode::IntLiteral(n, _) => Ok(Value::Int(*n)),

            AstNode::Null { .. } => Ok(Value::Null),

            AstNode::Variable(name, _) => {
                let address = self.variable_address(name, location)?;
                self.read_address(address, location)
            }

            AstNode::Deref { operand, .. } => {
                let address = self.deref_address(operand, location)?;
                self.read_address(address, location)
            }

            AstNode::AddressOf { operand, .. } => match operand.as_ref() {
                AstNode::Variable(name, _) => {
                    Ok(Value::Pointer(self.variable_address(name, location)?))
                }
                other => Err(RuntimeError::TypeError {
                    expected: "variable".to_string(),
                    got: format!("{:?}", other),
                    location,
                }),
            },

            AstNode::FunctionCall { name, args, .. } => self
                .call_function(name, args, location)?
                .ok_or_else(|| RuntimeError::TypeError {
                    expected: "value".to_string(),
                    got: format!("void result of '{}'", name),
                    location,
                }),

            _ => Err(RuntimeError::TypeError {
                expected: "expression".to_string(),
                got: format!("{:?}", expr),
                location,
            }),
        }
    }

    /// Resolve an assignable expression (`x` or `*p`) to the address it names
    pub(crate) fn lvalue_address(
        &mut self,
        lvalue: &AstNode,
        location: SourceLocation,
    ) -> Result<Address, RuntimeError> {
        match lvalue {
            AstNode::Variable(name, _) => self.variable_address(name, location),
            AstNode::Deref { operand, .. } => self.deref_address(operand, location),
            other => Err(RuntimeError::TypeError {
                expected: "assignable expression".to_string(),
                got: format!("{:?}", other),
                location,
            }),
        }
    }

    /// Evaluate `pointer_expr` and return the live address it points to
    pub(crate) fn deref_address(
        &mut self,
        pointer_expr: &AstNode,
        location: SourceLocation,
    ) -> Result<Address, RuntimeError> {
        match self.evaluate_expr(pointer_expr)? {
            Value::Null => Err(RuntimeError::NullDereference { location }),
            Value::Pointer(address) => {
                if self.stack.cell_at(address).is_none() {
                    return Err(RuntimeError::InvalidPointer {
                        message: "Dangling pointer".to_string(),
                        address: Some(address),
                        location,
                    });
                }
                Ok(address)
            }
            other => Err(RuntimeError::TypeError {
                expected: "pointer".to_string(),
                got: format!("{:?}", other),
                location,
            }),
        }
    }

    /// Declared type of an expression, where one can be named.
    ///
    /// Literals and `NULL` have no pointer type of their own; built-in calls
    /// return nothing.
    pub(crate) fn static_type(&self, expr: &AstNode) -> Option<Type> {
        match expr {
            AstNode::IntLiteral(..) => Some(Type::new(BaseType::Int)),
            AstNode::Variable(name, _) => {
                let address = self.stack.lookup(name)?;
                self.stack.cell_at(address).map(|cell| cell.var_type.clone())
            }
            AstNode::Deref { operand, .. } => self.static_type(operand)?.pointee(),
            AstNode::AddressOf { operand, .. } => {
                let mut pointer = self.static_type(operand)?;
                // Qualifiers past the pointee are not tracked
                pointer.pointee_const = false;
                Some(pointer.with_pointer())
            }
            AstNode::FunctionCall { name, .. } => self
                .function_defs
                .get(name)
                .map(|func| func.return_type.clone()),
            _ => None,
        }
    }

    /// Whether `pointer_expr` is declared as a pointer to const
    pub(crate) fn points_to_const(&self, pointer_expr: &AstNode) -> bool {
        self.static_type(pointer_expr)
            .is_some_and(|ty| ty.is_pointer() && ty.pointee_const)
    }

    fn variable_address(&self, name: &str, location: SourceLocation) -> Result<Address, RuntimeError> {
        self.stack
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })
    }

    /// Read the value at an address, rejecting uninitialized cells
    fn read_address(&self, address: Address, location: SourceLocation) -> Result<Value, RuntimeError> {
        let value = self
            .stack
            .value_at(address)
            .ok_or_else(|| RuntimeError::InvalidPointer {
                message: "No variable at address".to_string(),
                address: Some(address),
                location,
            })?;

        if !value.is_initialized() {
            let var = self
                .stack
                .cell_at(address)
                .map(|cell| cell.name.clone())
                .unwrap_or_default();
            return Err(RuntimeError::UninitializedRead {
                var,
                address: Some(address),
                location,
            });
        }

        Ok(value)
    }
}
