//! GetTask command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::{Axis, ContainerKey, TaskId};

/// Get a task by ID with computed fields
#[derive(Debug, Deserialize)]
pub struct GetTask {
    /// The task ID to retrieve
    pub id: TaskId,
}

impl GetTask {
    /// Create a new GetTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetTask {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Retrieve a task by ID with computed fields"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            let task = ctx.read_task(&self.id).await?;
            let board = ctx.read_board().await?;
            let registry = ctx.read_registry().await;

            let index = registry
                .index_of(&self.id)
                .ok_or_else(|| BoardError::TaskNotFound {
                    id: self.id.to_string(),
                })?;
            let container = match registry.home_of(&self.id) {
                Some(Axis::Section(sid)) => ContainerKey::Section(sid.clone()),
                _ => ContainerKey::Sprint,
            };

            let mut value = serde_json::to_value(&task)?;
            value["index"] = serde_json::json!(index);
            value["key"] = Value::String(board.display_key(index));
            value["container"] = Value::String(container.to_string());
            value["progress"] = serde_json::json!(task.progress());
            Ok(value)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
