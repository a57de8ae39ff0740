//! BoardContext - in-memory state primitives for the board engine
//!
//! The context provides access to state, not business logic. Commands do all
//! the work through these read/write primitives. Reads hand out clones;
//! writes replace whole values, so each primitive call is atomic.

use std::collections::HashMap;

use cadence_operations::LogEntry;
use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::error::{BoardError, Result};
use crate::types::{Board, EstimationRecord, Registry, Task, TaskId};

/// Context passed to every command - provides access, not logic
#[derive(Default)]
pub struct BoardContext {
    board: RwLock<Option<Board>>,
    registry: RwLock<Registry>,
    tasks: RwLock<HashMap<TaskId, Task>>,
    estimates: RwLock<Vec<EstimationRecord>>,
    activity: RwLock<Vec<LogEntry>>,
    op_lock: Mutex<()>,
}

impl BoardContext {
    /// Create a new, uninitialized context
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Board metadata
    // =========================================================================

    /// Check if the board has been initialized
    pub async fn is_initialized(&self) -> bool {
        self.board.read().await.is_some()
    }

    /// Read the board metadata
    pub async fn read_board(&self) -> Result<Board> {
        self.board
            .read()
            .await
            .clone()
            .ok_or(BoardError::NotInitialized)
    }

    /// Write the board metadata
    pub async fn write_board(&self, board: &Board) {
        *self.board.write().await = Some(board.clone());
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Read a snapshot of the placement registry
    pub async fn read_registry(&self) -> Registry {
        self.registry.read().await.clone()
    }

    /// Replace the placement registry
    pub async fn write_registry(&self, registry: Registry) {
        debug_assert!(registry.is_consistent());
        *self.registry.write().await = registry;
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Read a task by id
    pub async fn read_task(&self, id: &TaskId) -> Result<Task> {
        self.tasks
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    /// Check if a task exists
    pub async fn task_exists(&self, id: &TaskId) -> bool {
        self.tasks.read().await.contains_key(id)
    }

    /// Write (insert or replace) a task
    pub async fn write_task(&self, task: &Task) {
        tracing::debug!(task = %task.id, "write task");
        self.tasks.write().await.insert(task.id.clone(), task.clone());
    }

    /// Remove a task record
    pub async fn remove_task(&self, id: &TaskId) -> Result<Task> {
        tracing::debug!(task = %id, "remove task");
        self.tasks
            .write()
            .await
            .remove(id)
            .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
    }

    /// Read several tasks, preserving the requested order
    pub async fn read_tasks(&self, ids: &[TaskId]) -> Result<Vec<Task>> {
        let tasks = self.tasks.read().await;
        ids.iter()
            .map(|id| {
                tasks
                    .get(id)
                    .cloned()
                    .ok_or_else(|| BoardError::TaskNotFound { id: id.to_string() })
            })
            .collect()
    }

    /// Number of stored task records
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }

    // =========================================================================
    // Estimation history
    // =========================================================================

    /// Append a completed estimation round
    pub async fn append_estimate(&self, record: EstimationRecord) {
        self.estimates.write().await.push(record);
    }

    /// Read estimation history, newest first
    pub async fn read_estimates(&self, limit: Option<usize>) -> Vec<EstimationRecord> {
        let estimates = self.estimates.read().await;
        let mut records: Vec<EstimationRecord> = estimates.iter().rev().cloned().collect();
        if let Some(limit) = limit {
            records.truncate(limit);
        }
        records
    }

    // =========================================================================
    // Activity logging
    // =========================================================================

    /// Append a log entry to the activity log
    pub async fn append_activity(&self, entry: LogEntry) {
        self.activity.write().await.push(entry);
    }

    /// Read activity log entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let activity = self.activity.read().await;
        let mut entries: Vec<LogEntry> = activity.iter().rev().cloned().collect();
        if let Some(limit) = limit {
            entries.truncate(limit);
        }
        entries
    }

    // =========================================================================
    // Locking
    // =========================================================================

    /// Acquire the board lock, serializing whole operations.
    ///
    /// One logical writer at a time: callers that need a multi-primitive
    /// mutation to be observed atomically hold this across the operation.
    pub async fn lock(&self) -> BoardLock<'_> {
        BoardLock {
            _guard: self.op_lock.lock().await,
        }
    }
}

/// RAII guard for the board lock - releases on drop
pub struct BoardLock<'a> {
    _guard: MutexGuard<'a, ()>,
}
