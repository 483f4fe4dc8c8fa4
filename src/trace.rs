//! Plain-text dump of an interpreter's snapshot history
//!
//! Each snapshot prints as a header with its step number and source line,
//! followed by every frame (globals first) and its variables:
//!
//! ```text
//! step 4/4 (line 12)
//!   <globals>
//!     int a @ 0x00000004 = 1338
//!     int b @ 0x00000008 = 1337
//! ```

use crate::interpreter::engine::Interpreter;
use crate::snapshot::Snapshot;
use std::io::{self, Write};

/// Write every recorded snapshot to `out`, oldest first
pub fn write_trace<W: Write>(interpreter: &Interpreter, out: &mut W) -> io::Result<()> {
    let total = interpreter.total_snapshots();
    for (step, snapshot) in interpreter.snapshots().enumerate() {
        write_snapshot(snapshot, step + 1, total, out)?;
    }
    Ok(())
}

fn write_snapshot<W: Write>(
    snapshot: &Snapshot,
    step: usize,
    total: usize,
    out: &mut W,
) -> io::Result<()> {
    writeln!(
        out,
        "step {}/{} (line {})",
        step, total, snapshot.source_location.line
    )?;

    let stack = &snapshot.stack;
    for (depth, frame) in stack.frames().iter().enumerate() {
        writeln!(out, "  {}", frame.function_name)?;
        for (cell, value) in stack.frame_cells(depth) {
            writeln!(
                out,
                "    {} {} @ 0x{:08x} = {}",
                cell.var_type,
                cell.name,
                cell.address,
                stack.describe(&value)
            )?;
        }
    }

    if let Some(value) = snapshot.return_value {
        writeln!(out, "  return {}", stack.describe(&value))?;
    }
    Ok(())
}
