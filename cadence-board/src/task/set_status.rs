//! SetStatus command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{Status, TaskId};

/// Rewrite a task's status without repositioning it.
///
/// For sprint tasks this is the status-dropdown path: the task changes
/// kanban column (membership is derived from status) but keeps its place in
/// the sprint sequence.
#[derive(Debug, Deserialize, Serialize)]
pub struct SetStatus {
    /// The task ID
    pub id: TaskId,
    /// The new status
    pub status: Status,
}

impl SetStatus {
    /// Create a new SetStatus command
    pub fn new(id: impl Into<TaskId>, status: Status) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

impl Operation for SetStatus {
    fn verb(&self) -> &'static str {
        "status"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Set a task's workflow status"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for SetStatus {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut task = ctx.read_task(&self.id).await?;
            task.status = self.status;
            ctx.write_task(&task).await;
            Ok(serde_json::to_value(&task)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
