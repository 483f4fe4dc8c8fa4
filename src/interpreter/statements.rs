//! Statement execution implementation
//!
//! Declarations, assignments, expression statements, `return`, and user
//! function calls. Every leaf statement reports whether the caller should
//! capture a snapshot after it.
//!
//! # Calls
//!
//! Arguments are evaluated in the caller's frame, then a new frame is pushed
//! and each parameter becomes a cell initialised with its argument. A snapshot
//! is taken on entry so the new frame is visible before the body runs.

use crate::interpreter::constants::MAX_CALL_DEPTH;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::value::Value;
use crate::parser::ast::*;

impl Interpreter {
    /// Execute a single statement.
    /// Returns true if a snapshot should be taken after this statement.
    pub(crate) fn execute_statement(&mut self, stmt: &AstNode) -> Result<bool, RuntimeError> {
        self.current_location = *stmt.location();

        match stmt {
            AstNode::VarDecl {
                name,
                var_type,
                init,
                location,
            } => {
                self.execute_var_decl(name, var_type, init.as_deref(), *location)?;
                Ok(true)
            }

            AstNode::Assignment { lhs, rhs, location } => {
                self.execute_assignment(lhs, rhs, *location)?;
                Ok(true)
            }

            AstNode::ExpressionStatement { expr, location } => {
                match expr.as_ref() {
                    AstNode::FunctionCall { name, args, .. } => {
                        self.call_function(name, args, *location)?;
                    }
                    other => {
                        self.evaluate_expr(other)?;
                    }
                }
                // Back in the caller after any call
                self.current_location = *location;
                Ok(true)
            }

            AstNode::Return { expr, location } => {
                let return_type = self
                    .stack
                    .current_frame()
                    .and_then(|frame| self.function_defs.get(&frame.function_name))
                    .map(|func| func.return_type.clone());
                self.return_value = match (expr, return_type) {
                    (Some(e), Some(ty)) => Some(self.evaluate_for_type(e, &ty, *location)?),
                    (Some(e), None) => Some(self.evaluate_expr(e)?),
                    (None, _) => None,
                };
                self.returning = true;
                Ok(true)
            }

            AstNode::FunctionDef { name, location, .. } => Err(RuntimeError::TypeError {
                expected: "statement".to_string(),
                got: format!("nested definition of '{}'", name),
                location: *location,
            }),

            _ => {
                self.evaluate_expr(stmt)?;
                Ok(true)
            }
        }
    }

    pub(crate) fn execute_var_decl(
        &mut self,
        name: &str,
        var_type: &Type,
        init: Option<&AstNode>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let value = match init {
            Some(init_expr) => self.evaluate_for_type(init_expr, var_type, location)?,
            None => Value::Uninitialized,
        };

        self.stack
            .declare_var(name, var_type.clone(), value)
            .map_err(|_| RuntimeError::Redeclaration {
                name: name.to_string(),
                location,
            })?;
        Ok(())
    }

    pub(crate) fn execute_assignment(
        &mut self,
        lhs: &AstNode,
        rhs: &AstNode,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let address = self.lvalue_address(lhs, location)?;

        let cell = self
            .stack
            .cell_at(address)
            .ok_or_else(|| RuntimeError::InvalidPointer {
                message: "Assignment target no longer exists".to_string(),
                address: Some(address),
                location,
            })?;
        // `*p = ...` through a pointer to const is rejected even if the
        // target itself is writable
        let through_const = match lhs {
            AstNode::Deref { operand, .. } => self.points_to_const(operand),
            _ => false,
        };
        if cell.var_type.is_const || through_const {
            return Err(RuntimeError::ConstModification {
                var: cell.name.clone(),
                location,
            });
        }
        let target_type = cell.var_type.clone();

        let value = self.evaluate_for_type(rhs, &target_type, location)?;
        self.stack
            .write(address, value)
            .map_err(|message| RuntimeError::InvalidPointer {
                message,
                address: Some(address),
                location,
            })
    }

    /// Call a user-defined function or a built-in.
    ///
    /// Returns the function's return value, or `None` for `void` functions.
    pub(crate) fn call_function(
        &mut self,
        name: &str,
        args: &[AstNode],
        location: SourceLocation,
    ) -> Result<Option<Value>, RuntimeError> {
        let Some(func) = self.function_defs.get(name).cloned() else {
            return self.call_builtin(name, args, location);
        };

        if func.params.len() != args.len() {
            return Err(RuntimeError::ArgumentCountMismatch {
                function: name.to_string(),
                expected: func.params.len(),
                got: args.len(),
                location,
            });
        }

        // Frame 0 is the global frame
        if self.stack.depth() > MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow {
                depth: MAX_CALL_DEPTH,
                location,
            });
        }

        let mut arg_values = Vec::with_capacity(args.len());
        for (param, arg) in func.params.iter().zip(args) {
            arg_values.push(self.evaluate_for_type(arg, &param.param_type, location)?);
        }

        self.stack.push_frame(func.name.clone(), Some(location));
        for (param, value) in func.params.iter().zip(arg_values) {
            self.stack
                .declare_var(&param.name, param.param_type.clone(), value)
                .map_err(|_| RuntimeError::Redeclaration {
                    name: param.name.clone(),
                    location: func.location,
                })?;
        }
        self.current_location = func.location;
        self.return_value = None;
        self.take_snapshot()?;

        for stmt in &func.body {
            if self.execute_statement(stmt)? {
                self.take_snapshot()?;
            }
            if self.returning {
                break;
            }
        }

        let result = self.return_value.take();
        self.returning = false;
        self.stack.pop_frame();
        self.current_location = location;

        if func.return_type.base == BaseType::Void && !func.return_type.is_pointer() {
            if let Some(value) = result {
                return Err(RuntimeError::TypeError {
                    expected: "no return value".to_string(),
                    got: value.to_string(),
                    location,
                });
            }
            return Ok(None);
        }

        match result {
            Some(value) => Ok(Some(self.coerce_value_to_type(
                value,
                &func.return_type,
                location,
            )?)),
            None => Err(RuntimeError::TypeError {
                expected: format!("return value of type {}", func.return_type),
                got: "nothing".to_string(),
                location,
            }),
        }
    }

    /// Evaluate `expr` as the initial or new value of an object of type `target`.
    ///
    /// The literal `0` becomes `NULL` when the target is a pointer. A pointer
    /// to const cannot be stored in a pointer to non-const.
    pub(crate) fn evaluate_for_type(
        &mut self,
        expr: &AstNode,
        target: &Type,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        if target.is_pointer() && matches!(expr, AstNode::IntLiteral(0, _)) {
            return Ok(Value::Null);
        }

        let value = self.evaluate_expr(expr)?;
        if target.is_pointer() && !target.pointee_const && self.points_to_const(expr) {
            return Err(RuntimeError::TypeError {
                expected: target.to_string(),
                got: self
                    .static_type(expr)
                    .map_or_else(|| "pointer to const".to_string(), |ty| ty.to_string()),
                location,
            });
        }
        self.coerce_value_to_type(value, target, location)
    }

    /// Check that `value` fits `target`.
    ///
    /// A pointer must point at a cell whose type is exactly one level
    /// shallower than `target`.
    pub(crate) fn coerce_value_to_type(
        &self,
        value: Value,
        target: &Type,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let mismatch = |got: String| RuntimeError::TypeError {
            expected: target.to_string(),
            got,
            location,
        };

        if !target.is_pointer() {
            return match value {
                Value::Int(_) if target.base == BaseType::Int => Ok(value),
                Value::Uninitialized => Ok(value),
                other => Err(mismatch(self.describe_value(&other))),
            };
        }

        match value {
            Value::Null => Ok(Value::Null),
            Value::Pointer(address) => {
                let Some(pointee) = self.stack.cell_at(address) else {
                    return Err(RuntimeError::InvalidPointer {
                        message: "Pointer does not refer to a live variable".to_string(),
                        address: Some(address),
                        location,
                    });
                };
                let fits = target
                    .pointee()
                    .is_some_and(|expected| expected.same_shape(&pointee.var_type));
                if fits {
                    Ok(value)
                } else {
                    Err(mismatch(format!("pointer to {}", pointee.var_type)))
                }
            }
            other => Err(mismatch(self.describe_value(&other))),
        }
    }

    fn describe_value(&self, value: &Value) -> String {
        match value {
            Value::Int(n) => format!("int {}", n),
            Value::Pointer(address) => match self.stack.cell_at(*address) {
                Some(cell) => format!("pointer to {}", cell.var_type),
                None => format!("pointer 0x{:08x}", address),
            },
            Value::Null => "NULL".to_string(),
            Value::Uninitialized => "uninitialized value".to_string(),
        }
    }
}
