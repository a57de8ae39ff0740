//! ListTasks command

use std::collections::HashMap;

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::filter::TaskFilter;
use crate::types::{Board, ContainerKey, MemberId, Task, TaskId, TaskKind};

/// List tasks, optionally restricted to one container and filtered by
/// type/assignee/text. The projection is read-only.
#[derive(Debug, Default, Deserialize)]
pub struct ListTasks {
    /// Restrict to one container; default is the whole board in display order
    pub container: Option<ContainerKey>,
    /// Keep only tasks of this kind
    pub kind: Option<TaskKind>,
    /// Keep only tasks assigned to this member
    pub assignee: Option<MemberId>,
    /// Keep only tasks matching this text (title or description)
    pub search: Option<String>,
}

impl ListTasks {
    /// Create a new ListTasks command over the whole board
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a container
    pub fn in_container(mut self, container: ContainerKey) -> Self {
        self.container = Some(container);
        self
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

    /// Restrict to a text search
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn filter(&self) -> TaskFilter {
        TaskFilter {
            kind: self.kind,
            assignee: self.assignee.clone(),
            query: self.search.clone(),
        }
    }
}

impl Operation for ListTasks {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "List tasks visible under a container and filter"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListTasks {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            let board = ctx.read_board().await?;
            let registry = ctx.read_registry().await;

            // The candidate sequence for the addressed container
            let candidates = match &self.container {
                None => registry.display_order(),
                Some(ContainerKey::Sprint | ContainerKey::Column(_)) => {
                    registry.sprint().to_vec()
                }
                Some(ContainerKey::Section(sid)) => registry
                    .section(sid)
                    .ok_or_else(|| BoardError::SectionNotFound {
                        id: sid.to_string(),
                    })?
                    .tasks
                    .clone(),
            };

            let tasks = ctx.read_tasks(&candidates).await?;
            let filter = self.filter();
            let index = registry.display_index();

            let visible: Vec<Value> = tasks
                .iter()
                .filter(|task| match &self.container {
                    // Column membership is derived from status
                    Some(ContainerKey::Column(status)) => task.status == *status,
                    _ => true,
                })
                .filter(|task| filter.matches(task))
                .map(|task| annotate(task, &index, &board))
                .collect::<Result<_, BoardError>>()?;

            let count = visible.len();
            Ok(serde_json::json!({
                "tasks": visible,
                "count": count,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

fn annotate(
    task: &Task,
    index: &HashMap<TaskId, usize>,
    board: &Board,
) -> Result<Value, BoardError> {
    let mut value = serde_json::to_value(task)?;
    if let Some(i) = index.get(&task.id) {
        value["index"] = serde_json::json!(i);
        value["key"] = Value::String(board.display_key(*i));
    }
    Ok(value)
}
