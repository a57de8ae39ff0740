//! Core types for the board engine

mod board;
mod container;
mod estimate;
mod ids;
mod registry;
mod task;

// Re-export all types
pub use board::{Board, Column};
pub use container::{Axis, ContainerKey, ContainerKind, Position};
pub use estimate::{resolve, Consensus, EstimationRecord, Vote};
pub use ids::{
    AttachmentId, ChecklistItemId, CommentId, EstimateId, MemberId, SectionId, SubtaskId, TaskId,
};
pub use registry::{Registry, Section};
pub use task::{Attachment, ChecklistItem, Comment, Priority, Status, Subtask, Task, TaskKind};
