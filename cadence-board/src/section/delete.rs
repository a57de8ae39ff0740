//! DeleteSection command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::SectionId;

/// Delete a backlog section, discarding its tasks.
///
/// The section's tasks leave the placement surface entirely: their records
/// are deleted along with the container, so the display index never sees
/// them again.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteSection {
    /// The section ID to delete
    pub id: SectionId,
}

impl DeleteSection {
    /// Create a new DeleteSection command
    pub fn new(id: impl Into<SectionId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteSection {
    fn verb(&self) -> &'static str {
        "delete"
    }
    fn noun(&self) -> &'static str {
        "section"
    }
    fn description(&self) -> &'static str {
        "Delete a backlog section and discard its tasks"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for DeleteSection {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            ctx.read_board().await?;

            let mut registry = ctx.read_registry().await;
            let section = registry
                .remove_section(&self.id)
                .ok_or_else(|| BoardError::SectionNotFound {
                    id: self.id.to_string(),
                })?;

            for task_id in &section.tasks {
                if ctx.remove_task(task_id).await.is_err() {
                    tracing::warn!(task = %task_id, "section task record already missing");
                }
            }
            ctx.write_registry(registry).await;
            tracing::debug!(
                section = %self.id,
                discarded = section.tasks.len(),
                "section deleted"
            );

            Ok(serde_json::json!({
                "deleted": true,
                "id": self.id,
                "discarded_tasks": section.tasks.len(),
            }))
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
