//! UpdateSection command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::SectionId;

/// Rename a backlog section; no placement effect.
///
/// A blank title keeps the existing one.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateSection {
    /// The section ID to rename
    pub id: SectionId,
    /// The new title
    pub title: String,
}

impl UpdateSection {
    /// Create a new UpdateSection command
    pub fn new(id: impl Into<SectionId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Operation for UpdateSection {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "section"
    }
    fn description(&self) -> &'static str {
        "Rename a backlog section"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateSection {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            ctx.read_board().await?;

            let mut registry = ctx.read_registry().await;
            let current = registry
                .section(&self.id)
                .ok_or_else(|| BoardError::SectionNotFound {
                    id: self.id.to_string(),
                })?;

            // Blank titles keep the old one
            let title = if self.title.trim().is_empty() {
                current.title.clone()
            } else {
                self.title.trim().to_string()
            };

            let section = registry
                .rename_section(&self.id, title)
                .ok_or_else(|| BoardError::SectionNotFound {
                    id: self.id.to_string(),
                })?;
            ctx.write_registry(registry).await;

            Ok(serde_json::to_value(&section)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
