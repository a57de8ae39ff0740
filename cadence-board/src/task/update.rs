//! UpdateTask command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{
    Attachment, ChecklistItem, Comment, MemberId, Priority, Subtask, TaskId, TaskKind,
};

/// Update an existing task in place; no placement effect
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    /// New title
    pub title: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New kind
    pub kind: Option<TaskKind>,
    /// New priority
    pub priority: Option<Priority>,
    /// New assignee
    pub assigned_to: Option<MemberId>,
    /// Story points (None = don't change, Some(None) = clear, Some(Some(n)) = set)
    pub story_point: Option<Option<u32>>,
    /// Due date (None = don't change, Some(None) = clear, Some(Some(d)) = set)
    pub due_date: Option<Option<NaiveDate>>,
    /// Replace all subtasks
    pub subtasks: Option<Vec<Subtask>>,
    /// Replace all checklist items
    pub checklist: Option<Vec<ChecklistItem>>,
    /// Replace all attachments
    pub attachments: Option<Vec<Attachment>>,
    /// Replace all linked items
    pub linked_items: Option<Vec<TaskId>>,
    /// Replace all comments
    pub comments: Option<Vec<Comment>>,
}

impl UpdateTask {
    /// Create a new UpdateTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            kind: None,
            priority: None,
            assigned_to: None,
            story_point: None,
            due_date: None,
            subtasks: None,
            checklist: None,
            attachments: None,
            linked_items: None,
            comments: None,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the kind
    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the assignee
    pub fn with_assigned_to(mut self, member: impl Into<MemberId>) -> Self {
        self.assigned_to = Some(member.into());
        self
    }

    /// Set or clear the story points
    pub fn with_story_point(mut self, points: Option<u32>) -> Self {
        self.story_point = Some(points);
        self
    }

    /// Set or clear the due date
    pub fn with_due_date(mut self, due: Option<NaiveDate>) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Set the subtasks (replaces all existing subtasks)
    pub fn with_subtasks(mut self, subtasks: Vec<Subtask>) -> Self {
        self.subtasks = Some(subtasks);
        self
    }

    /// Set the checklist (replaces all existing items)
    pub fn with_checklist(mut self, checklist: Vec<ChecklistItem>) -> Self {
        self.checklist = Some(checklist);
        self
    }

    /// Set the attachments (replaces all existing attachments)
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    /// Set the linked items (replaces all existing links)
    pub fn with_linked_items(mut self, linked: Vec<TaskId>) -> Self {
        self.linked_items = Some(linked);
        self
    }

    /// Set the comments (replaces the whole thread)
    pub fn with_comments(mut self, comments: Vec<Comment>) -> Self {
        self.comments = Some(comments);
        self
    }
}

impl Operation for UpdateTask {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Update task properties"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.id).await?;

            if let Some(title) = &self.title {
                if title.trim().is_empty() {
                    return Err(BoardError::invalid_value("title", "must not be empty"));
                }
                task.title = title.clone();
            }
            if let Some(description) = &self.description {
                task.description = description.clone();
            }
            if let Some(kind) = self.kind {
                task.kind = kind;
            }
            if let Some(priority) = self.priority {
                task.priority = priority;
            }
            if let Some(member) = &self.assigned_to {
                task.assigned_to = member.clone();
            }
            if let Some(points) = self.story_point {
                task.story_point = points;
            }
            if let Some(due) = self.due_date {
                task.due_date = due;
            }
            if let Some(subtasks) = &self.subtasks {
                task.subtasks = subtasks.clone();
            }
            if let Some(checklist) = &self.checklist {
                task.checklist = checklist.clone();
            }
            if let Some(attachments) = &self.attachments {
                task.attachments = attachments.clone();
            }
            if let Some(linked) = &self.linked_items {
                task.linked_items = linked.clone();
            }
            if let Some(comments) = &self.comments {
                task.comments = comments.clone();
            }

            ctx.write_task(&task).await;
            Ok(serde_json::to_value(&task)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
