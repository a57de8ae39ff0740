//! GetSection command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::SectionId;

/// Get a backlog section by id
#[derive(Debug, Deserialize)]
pub struct GetSection {
    /// The section ID to retrieve
    pub id: SectionId,
}

impl GetSection {
    /// Create a new GetSection command
    pub fn new(id: impl Into<SectionId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for GetSection {
    fn verb(&self) -> &'static str {
        "get"
    }
    fn noun(&self) -> &'static str {
        "section"
    }
    fn description(&self) -> &'static str {
        "Retrieve a backlog section by ID"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for GetSection {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            ctx.read_board().await?;
            let registry = ctx.read_registry().await;
            let section = registry
                .section(&self.id)
                .ok_or_else(|| BoardError::SectionNotFound {
                    id: self.id.to_string(),
                })?;
            Ok(serde_json::to_value(section)?)
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;

    #[tokio::test]
    async fn test_get_section() {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = GetSection::new("backlog-1")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["title"], "Backlog");
    }

    #[tokio::test]
    async fn test_get_missing_section() {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = GetSection::new("backlog-9").execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::SectionNotFound { .. })));
    }
}
