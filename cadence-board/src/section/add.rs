//! AddSection command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};

/// Add a new backlog section at the end of the section list.
///
/// The key comes from the registry's monotonic counter, so deleted section
/// keys are never reused.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AddSection {
    /// The section title; defaults to "Backlog <n>"
    pub title: Option<String>,
}

impl AddSection {
    /// Create a new AddSection command with the default title
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl Operation for AddSection {
    fn verb(&self) -> &'static str {
        "add"
    }
    fn noun(&self) -> &'static str {
        "section"
    }
    fn description(&self) -> &'static str {
        "Add a new backlog section"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for AddSection {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            ctx.read_board().await?;

            let mut registry = ctx.read_registry().await;
            let section = registry.allocate_section(self.title.clone());
            ctx.write_registry(registry).await;
            tracing::debug!(section = %section.id, "section added");

            Ok(serde_json::to_value(&section)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;

    #[tokio::test]
    async fn test_add_section_default_title() {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = AddSection::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["id"], "backlog-2");
        assert_eq!(result["title"], "Backlog 2");
        assert!(result["tasks"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_section_with_title() {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = AddSection::new()
            .with_title("Icebox")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["title"], "Icebox");
    }

    #[tokio::test]
    async fn test_add_section_requires_init() {
        let ctx = BoardContext::new();
        let result = AddSection::new().execute(&ctx).await.into_result();
        assert!(matches!(result, Err(BoardError::NotInitialized)));
    }
}
