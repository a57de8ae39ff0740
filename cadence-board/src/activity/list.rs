//! ListActivity command

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;

/// List audit log entries, newest first
#[derive(Debug, Default, Deserialize)]
pub struct ListActivity {
    /// Maximum number of entries to return
    pub limit: Option<usize>,
}

impl ListActivity {
    /// Create a new ListActivity command
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of entries
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Operation for ListActivity {
    fn verb(&self) -> &'static str {
        "list"
    }
    fn noun(&self) -> &'static str {
        "activity"
    }
    fn description(&self) -> &'static str {
        "List activity log entries, newest first"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ListActivity {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let result = async {
            let entries = ctx.read_activity(self.limit).await;
            let count = entries.len();
            Ok(serde_json::json!({
                "entries": entries,
                "count": count,
            }))
        }
        .await;

        ExecutionResult::unlogged(result)
    }
}
