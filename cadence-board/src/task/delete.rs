//! DeleteTask command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::TaskId;

/// Delete a task: removes the record and its id from whichever container
/// holds it.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    /// Create a new DeleteTask command
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteTask {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Delete a task from the board"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            // Validate before touching anything
            ctx.read_task(&self.id).await?;

            let mut registry = ctx.read_registry().await;
            registry.remove_task(&self.id);
            ctx.remove_task(&self.id).await?;
            ctx.write_registry(registry).await;
            tracing::debug!(task = %self.id, "task deleted");

            Ok(serde_json::json!({
                "deleted": true,
                "id": self.id,
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
