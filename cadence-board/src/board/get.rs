//! GetBoard command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::Board;

/// Get the full board snapshot: metadata, columns, container sequences, and
/// the display-index assignment.
#[derive(Debug, Default, Deserialize)]
pub struct GetBoard;

impl GetBoard {
    /// Create a new GetBoard command
    pub fn new() -> Self {
        Self
    }
}

impl Operation for GetBoard {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Retrieve the board snapshot with display indices"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            let board = ctx.read_board().await?;
            let registry = ctx.read_registry().await;

            // Display index: position in sprint-then-sections concatenation
            let order = registry.display_order();
            let index: serde_json::Map<String, Value> = order
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    (
                        id.to_string(),
                        serde_json::json!({ "index": i, "key": board.display_key(i) }),
                    )
                })
                .collect();

            let mut value = serde_json::to_value(&board)?;
            value["columns"] = serde_json::to_value(Board::default_columns())?;
            value["sprint"] = serde_json::to_value(registry.sprint())?;
            value["sections"] = serde_json::to_value(registry.sections())?;
            value["index"] = Value::Object(index);
            value["task_count"] = serde_json::json!(registry.len());
            Ok(value)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
