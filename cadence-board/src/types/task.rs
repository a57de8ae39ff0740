//! Task types: Task, Subtask, ChecklistItem, Comment, Attachment

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{AttachmentId, ChecklistItemId, CommentId, MemberId, SubtaskId, TaskId};

/// Workflow status of a task.
///
/// Doubles as the governing status of a kanban column: column membership is
/// derived from this field, never stored separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Todo,
    Inprogress,
    Review,
    Awaiting,
    Blocked,
    Done,
}

impl Status {
    /// All statuses in column display order
    pub const ALL: [Status; 6] = [
        Status::Todo,
        Status::Inprogress,
        Status::Review,
        Status::Awaiting,
        Status::Blocked,
        Status::Done,
    ];

    /// The wire token for this status (also the column key)
    pub fn key(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::Inprogress => "inprogress",
            Status::Review => "review",
            Status::Awaiting => "awaiting",
            Status::Blocked => "blocked",
            Status::Done => "done",
        }
    }

    /// The column display title
    pub fn title(&self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::Inprogress => "In Progress",
            Status::Review => "Review",
            Status::Awaiting => "Awaiting Customer",
            Status::Blocked => "Blocked",
            Status::Done => "Done",
        }
    }

    /// Parse a wire token back into a status
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// What kind of work item a task is.
///
/// Serialized under the field name `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Feature,
    #[default]
    Task,
    Defect,
    Test,
    Testset,
    Testexecution,
    Precondition,
    Bug,
    Userstory,
    Investigation,
}

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, rename = "type")]
    pub kind: TaskKind,
    #[serde(default)]
    pub assigned_to: MemberId,

    /// Story points; negative input is unrepresentable and rejected at the
    /// deserialization boundary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_point: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,

    // Opaque to placement
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub linked_items: Vec<TaskId>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Create a new task with the given title and all defaults
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            status: Status::default(),
            priority: Priority::default(),
            kind: TaskKind::default(),
            assigned_to: MemberId::default(),
            story_point: None,
            due_date: None,
            subtasks: Vec::new(),
            checklist: Vec::new(),
            attachments: Vec::new(),
            linked_items: Vec::new(),
            comments: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the kind
    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the assignee
    pub fn with_assigned_to(mut self, member: impl Into<MemberId>) -> Self {
        self.assigned_to = member.into();
        self
    }

    /// Set the story points
    pub fn with_story_point(mut self, points: u32) -> Self {
        self.story_point = Some(points);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    /// Fraction of subtasks done; 0.0 when there are none
    pub fn progress(&self) -> f64 {
        if self.subtasks.is_empty() {
            return 0.0;
        }
        let done = self.subtasks.iter().filter(|s| s.done).count();
        done as f64 / self.subtasks.len() as f64
    }
}

/// A subtask on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl Subtask {
    /// Create a new subtask
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SubtaskId::new(),
            title: title.into(),
            done: false,
        }
    }

    /// Mark the subtask done
    pub fn done(mut self) -> Self {
        self.done = true;
        self
    }
}

/// A checklist item on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ChecklistItemId,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    /// Create a new checklist item
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ChecklistItemId::new(),
            text: text.into(),
            done: false,
        }
    }
}

/// A comment on a task - part of the discussion thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub body: String,
    pub author: MemberId,
}

impl Comment {
    /// Create a new comment
    pub fn new(body: impl Into<String>, author: impl Into<MemberId>) -> Self {
        Self {
            id: CommentId::new(),
            body: body.into(),
            author: author.into(),
        }
    }
}

/// An attachment on a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl Attachment {
    /// Create a new attachment
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: AttachmentId::new(),
            name: name.into(),
            path: path.into(),
            mime_type: None,
            size: None,
        }
    }

    /// Set the MIME type
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Set the file size
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }
}
