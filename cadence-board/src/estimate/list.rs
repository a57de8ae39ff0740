//! ListEstimates command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;

/// List completed estimation rounds, newest first
#[derive(Debug, Default, Deserialize)]
pub struct ListEstimates {
    /// Maximum number of records to return
    pub limit: Option<usize>,
}

impl ListEstimates {
    /// Create a new ListEstimates command
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of records
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for ListEstimates {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "estimate"
    }
    fn description(&self) -> &'static str {
        "List estimation history, newest first"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListEstimates {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            let records = ctx.read_estimates(self.limit).await;
            let count = records.len();
            Ok(serde_json::json!({
                "estimates": records,
                "count": count,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::estimate::CompleteEstimation;
    use crate::task::AddTask;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn test_list_estimates_newest_first() {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        for title in ["First", "Second"] {
            let added = AddTask::new(title)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
            CompleteEstimation::new(added["id"].as_str().unwrap(), BTreeMap::new())
                .with_vote("alice", 3u64)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }

        let result = ListEstimates::new().execute(&ctx).await.into_result().unwrap();
        assert_eq!(result["count"], 2);
        assert_eq!(result["estimates"][0]["task_title"], "Second");

        let limited = ListEstimates::new()
            .with_limit(1)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(limited["count"], 1);
    }
}
