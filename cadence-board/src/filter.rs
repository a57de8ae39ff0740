//! Task filtering for board views
//!
//! The projector is read-only: it decides which tasks are visible for a
//! type/assignee/text filter and never mutates placement.

use serde::{Deserialize, Serialize};

use crate::types::{MemberId, Task, TaskKind};

/// Visible-subset filter over a container's tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Keep only tasks of this kind
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<TaskKind>,
    /// Keep only tasks assigned to this member
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<MemberId>,
    /// Keep only tasks whose title or description contains this text
    /// (case-insensitive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl TaskFilter {
    /// The match-everything filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a task kind
    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Restrict to an assignee
    pub fn with_assignee(mut self, assignee: impl Into<MemberId>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Restrict to a free-text search
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Whether the filter matches everything
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.assignee.is_none() && self.query.is_none()
    }

    /// Whether a task is visible under this filter
    pub fn matches(&self, task: &Task) -> bool {
        if let Some(kind) = self.kind {
            if task.kind != kind {
                return false;
            }
        }
        if let Some(assignee) = &self.assignee {
            if &task.assigned_to != assignee {
                return false;
            }
        }
        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            if !needle.is_empty()
                && !task.title.to_lowercase().contains(&needle)
                && !task.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}
