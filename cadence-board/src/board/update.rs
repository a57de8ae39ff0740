//! UpdateBoard command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};

/// Update board metadata; no placement effect
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateBoard {
    /// New board name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New display-id prefix
    pub prefix: Option<String>,
}

impl UpdateBoard {
    /// Create a new UpdateBoard command
    pub fn new() -> Self {
        Self {
            name: None,
            description: None,
            prefix: None,
        }
    }

    /// Set the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the display-id prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

impl Default for UpdateBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Operation for UpdateBoard {
    fn verb(&self) -> &'static str {
        "update"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Update board metadata"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for UpdateBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let mut board = ctx.read_board().await?;

            if let Some(name) = &self.name {
                if name.trim().is_empty() {
                    return Err(BoardError::invalid_value("name", "must not be empty"));
                }
                board.name = name.clone();
            }
            if let Some(description) = &self.description {
                board.description = Some(description.clone());
            }
            if let Some(prefix) = &self.prefix {
                board.prefix = prefix.clone();
            }

            ctx.write_board(&board).await;
            Ok(serde_json::to_value(&board)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}
