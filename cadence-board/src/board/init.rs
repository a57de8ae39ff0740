//! InitBoard command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::Board;

/// Initialize a new board: the six fixed columns, an empty active sprint,
/// and one default "Backlog" section.
#[derive(Debug, Deserialize, Serialize)]
pub struct InitBoard {
    /// The board name
    pub name: String,
    /// Optional board description
    pub description: Option<String>,
    /// Display-id prefix; defaults to "CY"
    pub prefix: Option<String>,
}

impl InitBoard {
    /// Create a new InitBoard command
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            prefix: None,
        }
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

impl Operation for InitBoard {
    fn verb(&self) -> &'static str {
        "init"
    }
    fn noun(&self) -> &'static str {
        "board"
    }
    fn description(&self) -> &'static str {
        "Initialize a new board"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for InitBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            if ctx.is_initialized().await {
                return Err(BoardError::AlreadyExists);
            }

            let mut board = Board::new(&self.name);
            if let Some(description) = &self.description {
                board = board.with_description(description);
            }
            if let Some(prefix) = &self.prefix {
                board = board.with_prefix(prefix);
            }

            let mut registry = ctx.read_registry().await;
            let section = registry.allocate_section(Some("Backlog".to_string()));

            ctx.write_board(&board).await;
            ctx.write_registry(registry).await;
            tracing::info!(board = %board.name, "board initialized");

            let mut value = serde_json::to_value(&board)?;
            value["columns"] = serde_json::to_value(Board::default_columns())?;
            value["sections"] = serde_json::to_value(vec![section])?;
            Ok(value)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_board() {
        let ctx = BoardContext::new();

        let result = InitBoard::new("Test Board")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["name"], "Test Board");
        assert_eq!(result["prefix"], "CY");
        assert_eq!(result["columns"].as_array().unwrap().len(), 6);
        assert_eq!(result["sections"][0]["id"], "backlog-1");
        assert_eq!(result["sections"][0]["title"], "Backlog");
    }

    #[tokio::test]
    async fn test_init_twice_fails() {
        let ctx = BoardContext::new();

        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = InitBoard::new("Again").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::AlreadyExists)));

        // First board untouched
        let board = ctx.read_board().await.unwrap();
        assert_eq!(board.name, "Test");
    }

    #[tokio::test]
    async fn test_init_with_prefix() {
        let ctx = BoardContext::new();

        let result = InitBoard::new("Ops")
            .with_prefix("OPS")
            .with_description("Operations board")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["prefix"], "OPS");
        assert_eq!(result["description"], "Operations board");
    }
}
