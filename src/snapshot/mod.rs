// Snapshot management for reverse execution

use crate::memory::{stack::Stack, value::Value};
use crate::parser::ast::SourceLocation;

/// Snapshot of execution state
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stack: Stack,
    pub source_location: SourceLocation,
    pub return_value: Option<Value>,
}

impl Snapshot {
    pub fn new(stack: Stack, source_location: SourceLocation, return_value: Option<Value>) -> Self {
        Snapshot {
            stack,
            source_location,
            return_value,
        }
    }

    /// Estimate the memory usage of this snapshot in bytes
    pub fn estimated_size(&self) -> usize {
        // Rough estimate: 100 bytes per frame, 48 per cell
        let frame_size = self.stack.depth() * 100;
        let cell_size = self.stack.cell_count() * 48;

        std::mem::size_of::<Snapshot>() + frame_size + cell_size
    }
}

/// Manages execution history for reverse execution
#[derive(Debug)]
pub struct SnapshotManager {
    snapshots: Vec<Snapshot>,
    max_memory: usize,
    current_memory: usize,
}

impl SnapshotManager {
    pub fn new(max_memory: usize) -> Self {
        SnapshotManager {
            snapshots: Vec::new(),
            max_memory,
            current_memory: 0,
        }
    }

    /// Add a snapshot to history
    pub fn push(&mut self, snapshot: Snapshot) -> Result<(), String> {
        let snapshot_size = snapshot.estimated_size();

        if self.current_memory + snapshot_size > self.max_memory {
            return Err(format!(
                "Snapshot memory limit exceeded: {} + {} > {}",
                self.current_memory, snapshot_size, self.max_memory
            ));
        }

        self.current_memory += snapshot_size;
        self.snapshots.push(snapshot);
        Ok(())
    }

    /// Get a snapshot by index
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Iterate over the whole history, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Get current memory usage
    pub fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get max memory limit
    pub fn memory_limit(&self) -> usize {
        self.max_memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_snapshot() -> Snapshot {
        Snapshot::new(Stack::new(), SourceLocation::new(1, 1), None)
    }

    #[test]
    fn test_push_tracks_memory() {
        let mut manager = SnapshotManager::new(1024 * 1024);
        let size = empty_snapshot().estimated_size();

        manager.push(empty_snapshot()).unwrap();
        manager.push(empty_snapshot()).unwrap();

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.memory_usage(), 2 * size);
        assert!(manager.get(1).is_some());
        assert!(manager.get(2).is_none());
    }

    #[test]
    fn test_push_rejects_over_limit() {
        let size = empty_snapshot().estimated_size();
        let mut manager = SnapshotManager::new(size);

        manager.push(empty_snapshot()).unwrap();
        assert!(manager.push(empty_snapshot()).is_err());
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.memory_usage(), size);
    }
}
