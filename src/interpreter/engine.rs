// Execution engine for the interpreter

use crate::interpreter::errors::RuntimeError;
use crate::memory::{stack::Stack, value::Value};
use crate::parser::ast::*;
use crate::snapshot::{Snapshot, SnapshotManager};
use rustc_hash::FxHashMap;

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<AstNode>,
    pub return_type: Type,
    pub location: SourceLocation,
}

/// The main interpreter that executes a program
pub struct Interpreter {
    /// Parsed program (functions, globals, top-level statements)
    program: Program,

    /// Call stack, including the global frame
    pub(crate) stack: Stack,

    /// Current source location being executed
    pub(crate) current_location: SourceLocation,

    /// Snapshot manager for reverse execution
    snapshot_manager: SnapshotManager,

    /// Index of the snapshot currently shown
    history_position: usize,

    /// Function definitions (name -> FunctionDef)
    pub(crate) function_defs: FxHashMap<String, FunctionDef>,

    /// Whether execution has finished
    finished: bool,

    /// Set by `return`; cleared by the caller once the frame is popped
    pub(crate) returning: bool,

    /// Return value from the last function call
    pub(crate) return_value: Option<Value>,
}

impl Interpreter {
    /// Create a new interpreter with the parsed program
    pub fn new(program: Program, snapshot_memory_limit: usize) -> Self {
        let mut function_defs = FxHashMap::default();

        for node in &program.nodes {
            if let AstNode::FunctionDef {
                name,
                params,
                body,
                return_type,
                location,
            } = node
            {
                function_defs.insert(
                    name.clone(),
                    FunctionDef {
                        name: name.clone(),
                        params: params.clone(),
                        body: body.clone(),
                        return_type: return_type.clone(),
                        location: *location,
                    },
                );
            }
        }

        Interpreter {
            program,
            stack: Stack::new(),
            current_location: SourceLocation::new(1, 1),
            snapshot_manager: SnapshotManager::new(snapshot_memory_limit),
            history_position: 0,
            function_defs,
            finished: false,
            returning: false,
            return_value: None,
        }
    }

    /// Run the program from start to finish.
    ///
    /// Top-level statements run in source order, then `main()` if the program
    /// defines one. A top-level `return` ends the program without calling `main`.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        self.take_snapshot()?;

        let nodes = std::mem::take(&mut self.program.nodes);
        let result = self.run_top_level(&nodes);
        self.program.nodes = nodes;
        let returned_early = result?;

        if !returned_early && self.function_defs.contains_key("main") {
            let location = self.current_location;
            self.call_function("main", &[], location)?;
            self.take_snapshot()?;
        }

        self.finished = true;
        Ok(())
    }

    /// Returns true when a top-level `return` ended the script
    fn run_top_level(&mut self, nodes: &[AstNode]) -> Result<bool, RuntimeError> {
        for node in nodes {
            if matches!(node, AstNode::FunctionDef { .. }) {
                continue;
            }
            if self.execute_statement(node)? {
                self.take_snapshot()?;
            }
            // A top-level `return` ends the script
            if self.returning {
                self.returning = false;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Take a snapshot of the current execution state
    pub(crate) fn take_snapshot(&mut self) -> Result<(), RuntimeError> {
        let snapshot = Snapshot::new(
            self.stack.clone(),
            self.current_location,
            self.return_value,
        );

        self.snapshot_manager
            .push(snapshot)
            .map_err(|_| RuntimeError::SnapshotLimitExceeded {
                current: self.snapshot_manager.memory_usage(),
                limit: self.snapshot_manager.memory_limit(),
            })?;

        self.history_position = self.snapshot_manager.len() - 1;
        Ok(())
    }

    /// Restore execution state from a snapshot
    fn restore_snapshot(&mut self, index: usize) -> Result<(), RuntimeError> {
        let snapshot = self
            .snapshot_manager
            .get(index)
            .ok_or_else(|| RuntimeError::HistoryOperationFailed {
                message: format!("Snapshot {} not found in history", index),
                location: self.current_location,
            })?;

        self.stack = snapshot.stack.clone();
        self.current_location = snapshot.source_location;
        self.return_value = snapshot.return_value;
        self.history_position = index;
        Ok(())
    }

    /// Step backward in execution (restore previous snapshot)
    pub fn step_backward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position == 0 {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "Already at the beginning of execution".to_string(),
                location: self.current_location,
            });
        }

        self.restore_snapshot(self.history_position - 1)
    }

    /// Step forward in execution (restore next snapshot)
    pub fn step_forward(&mut self) -> Result<(), RuntimeError> {
        if self.history_position + 1 >= self.snapshot_manager.len() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No more snapshots available (execution finished)".to_string(),
                location: self.current_location,
            });
        }

        self.restore_snapshot(self.history_position + 1)
    }

    /// Rewind to the beginning of execution history
    pub fn rewind_to_start(&mut self) -> Result<(), RuntimeError> {
        if self.snapshot_manager.is_empty() {
            return Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
                location: self.current_location,
            });
        }

        self.restore_snapshot(0)
    }

    /// Jump to the last recorded snapshot
    pub fn jump_to_end(&mut self) -> Result<(), RuntimeError> {
        match self.snapshot_manager.len() {
            0 => Err(RuntimeError::HistoryOperationFailed {
                message: "No snapshots available".to_string(),
                location: self.current_location,
            }),
            len => self.restore_snapshot(len - 1),
        }
    }

    // ========== Getter methods for UI ==========

    /// Get the current source location
    pub fn current_location(&self) -> SourceLocation {
        self.current_location
    }

    /// Get a reference to the stack
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Stack as it was one snapshot before the current position
    pub fn previous_stack(&self) -> Option<&Stack> {
        let index = self.history_position.checked_sub(1)?;
        self.snapshot_manager.get(index).map(|s| &s.stack)
    }

    /// Get the current return value (set when at a return statement)
    pub fn return_value(&self) -> Option<&Value> {
        self.return_value.as_ref()
    }

    /// Get the current history position
    pub fn history_position(&self) -> usize {
        self.history_position
    }

    /// Get the total number of snapshots
    pub fn total_snapshots(&self) -> usize {
        self.snapshot_manager.len()
    }

    /// Iterate over all recorded snapshots, oldest first
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshot_manager.iter()
    }

    /// Check if execution has finished
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Get function definitions
    pub fn function_defs(&self) -> &FxHashMap<String, FunctionDef> {
        &self.function_defs
    }

    /// Read a variable visible from the current frame (locals, then globals)
    pub fn read_variable(&self, name: &str) -> Option<Value> {
        self.stack
            .lookup(name)
            .and_then(|address| self.stack.value_at(address))
    }
}
