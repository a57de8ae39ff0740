//! In-memory sprint board engine
//!
//! This crate implements the placement core of a sprint board: tasks move
//! between named ordered containers (six fixed kanban columns, the active
//! sprint list, and user-created backlog sections) via reorder and
//! drag-and-drop moves, a board-wide display index is recomputed after every
//! mutation, and a planning-poker consensus resolver tallies estimation
//! rounds.
//!
//! ## Overview
//!
//! - **Two placement axes** - a task lives either in the active sprint or in
//!   exactly one backlog section, never both. Kanban columns are not an
//!   axis: column membership is derived from task status within the sprint.
//! - **Commands do the work** - every operation is a struct implementing
//!   [`Execute`] against a [`BoardContext`]; the context provides state
//!   primitives, not logic.
//! - **Whole-or-nothing** - validation happens before the first write, so a
//!   failed operation leaves the store and every container untouched.
//! - **Audited** - mutations produce [`LogEntry`] records; the
//!   [`BoardOperationProcessor`] serializes operations and maintains the
//!   activity log.
//!
//! ## Basic Usage
//!
//! ```rust
//! use cadence_board::{board::InitBoard, task::AddTask, BoardContext, Execute};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let ctx = BoardContext::new();
//! InitBoard::new("My Project").execute(&ctx).await.into_result()?;
//!
//! let result = AddTask::new("Implement feature X")
//!     .with_description("Add the new feature")
//!     .execute(&ctx)
//!     .await
//!     .into_result()?;
//!
//! println!("Created task: {}", result["id"]);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
pub mod filter;
mod processor;
pub mod types;

// Command modules
pub mod activity;
pub mod board;
pub mod estimate;
pub mod section;
pub mod task;

// Re-export Execute trait and types from the operations crate
pub use cadence_operations::{
    async_trait, Execute, ExecutionResult, LogEntry, LogEntryId, Operation,
};

pub use context::{BoardContext, BoardLock};
pub use error::{BoardError, Result};
pub use filter::TaskFilter;
pub use processor::BoardOperationProcessor;

// Re-export commonly used types
pub use types::{
    Axis, Board, Column, Consensus, ContainerKey, ContainerKind, EstimationRecord, MemberId,
    Position, Priority, Registry, Section, SectionId, Status, Task, TaskId, TaskKind, Vote,
};
