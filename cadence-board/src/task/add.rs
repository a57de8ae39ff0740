//! AddTask command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{ContainerKey, MemberId, Priority, Status, Task, TaskKind};

/// Add a new task at the end of a container.
///
/// The destination defaults to the active sprint. A column key addresses the
/// sprint with that column's governing status; sprint and section
/// destinations start the task in `todo`.
#[derive(Debug, Deserialize, Serialize)]
pub struct AddTask {
    /// The task title (required, non-empty)
    pub title: String,
    /// Destination container; defaults to the active sprint
    pub container: Option<ContainerKey>,
    /// Detailed task description
    pub description: Option<String>,
    /// What kind of work item this is
    pub kind: Option<TaskKind>,
    /// Task priority
    pub priority: Option<Priority>,
    /// Assignee
    pub assigned_to: Option<MemberId>,
    /// Story points
    pub story_point: Option<u32>,
    /// Due date
    pub due_date: Option<NaiveDate>,
}

impl AddTask {
    /// Create a new AddTask command with just a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            container: None,
            description: None,
            kind: None,
            priority: None,
            assigned_to: None,
            story_point: None,
            due_date: None,
        }
    }

    /// Set the destination container
    pub fn in_container(mut self, container: ContainerKey) -> Self {
        self.container = Some(container);
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
}

impl Operation for AddTask {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Create a new task on the board"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            ctx.read_board().await?;

            if self.title.trim().is_empty() {
                return Err(BoardError::missing_field("title"));
            }

            let container = self.container.clone().unwrap_or(ContainerKey::Sprint);
            // Columns carry their governing status; every other destination
            // starts a task in todo
            let status = match &container {
                ContainerKey::Column(status) => *status,
                _ => Status::Todo,
            };

            let mut task = Task::new(self.title.trim()).with_status(status);
            if let Some(description) = &self.description {
                task = task.with_description(description);
            }
            if let Some(kind) = self.kind {
                task = task.with_kind(kind);
            }
            if let Some(priority) = self.priority {
                task = task.with_priority(priority);
            }
            if let Some(member) = &self.assigned_to {
                task = task.with_assigned_to(member.clone());
            }
            if let Some(points) = self.story_point {
                task = task.with_story_point(points);
            }
            if let Some(due) = self.due_date {
                task = task.with_due_date(due);
            }

            let mut registry = ctx.read_registry().await;
            let index = match &container {
                ContainerKey::Sprint | ContainerKey::Column(_) => {
                    registry.push_sprint(task.id.clone())
                }
                ContainerKey::Section(sid) => registry
                    .push_section(sid, task.id.clone())
                    .ok_or_else(|| BoardError::SectionNotFound {
                        id: sid.to_string(),
                    })?,
            };

            ctx.write_task(&task).await;
            ctx.write_registry(registry).await;
            tracing::debug!(task = %task.id, container = %container, "task added");

            let mut value = serde_json::to_value(&task)?;
            value["container"] = Value::String(container.to_string());
            value["index"] = serde_json::json!(index);
            Ok(value)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::section::AddSection;

    async fn setup() -> BoardContext {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        ctx
    }

    #[tokio::test]
    async fn test_add_task_defaults_to_sprint() {
        let ctx = setup().await;

        let result = AddTask::new("Test task")
            .with_description("A test task")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["title"], "Test task");
        assert_eq!(result["description"], "A test task");
        assert_eq!(result["status"], "todo");
        assert_eq!(result["container"], "active-sprint");
        assert_eq!(result["index"], 0);
    }

    #[tokio::test]
    async fn test_add_appends_at_end() {
        let ctx = setup().await;

        AddTask::new("First")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let second = AddTask::new("Second")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(second["index"], 1);
    }

    #[tokio::test]
    async fn test_add_into_section() {
        let ctx = setup().await;

        let result = AddTask::new("Backlog item")
            .in_container(ContainerKey::Section("backlog-1".into()))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["container"], "backlog-1");
        assert_eq!(result["status"], "todo");

        let registry = ctx.read_registry().await;
        assert!(registry.sprint().is_empty());
        assert_eq!(
            registry.section(&"backlog-1".into()).unwrap().tasks.len(),
            1
        );
    }

    #[tokio::test]
    async fn test_add_into_column_takes_governing_status() {
        let ctx = setup().await;

        let result = AddTask::new("In review")
            .in_container(ContainerKey::Column(Status::Review))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["status"], "review");
        assert_eq!(result["container"], "review");

        // Lives in the sprint sequence
        let registry = ctx.read_registry().await;
        assert_eq!(registry.sprint().len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_empty_title() {
        let ctx = setup().await;

        let result = AddTask::new("   ").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::MissingField { .. })));
        assert_eq!(ctx.task_count().await, 0);
    }

    #[tokio::test]
    async fn test_add_into_missing_section() {
        let ctx = setup().await;

        let result = AddTask::new("Orphan")
            .in_container(ContainerKey::Section("backlog-99".into()))
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(BoardError::SectionNotFound { .. })));
        assert_eq!(ctx.task_count().await, 0);
    }

    #[tokio::test]
    async fn test_add_into_created_section() {
        let ctx = setup().await;
        let section = AddSection::new()
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let sid = section["id"].as_str().unwrap();

        let result = AddTask::new("Planned")
            .in_container(ContainerKey::Section(sid.into()))
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["container"], sid);
    }
}
