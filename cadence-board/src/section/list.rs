//! ListSections command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;

/// List all backlog sections in creation order
#[derive(Debug, Default, Deserialize)]
pub struct ListSections;

impl ListSections {
    /// Create a new ListSections command
    pub fn new() -> Self {
        Self
    }
}

impl Operation for ListSections {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "section"
    }
    fn description(&self) -> &'static str {
        "List backlog sections in creation order"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListSections {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            ctx.read_board().await?;
            let registry = ctx.read_registry().await;
            Ok(serde_json::json!({
                "sections": registry.sections(),
                "count": registry.sections().len(),
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
