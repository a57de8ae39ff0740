//! CompleteEstimation command

use std::collections::BTreeMap;

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{resolve, Consensus, EstimationRecord, MemberId, TaskId, Vote};

/// Complete an estimation round for a task.
///
/// Resolves the votes, errors when there is no consensus, stores a numeric
/// consensus into the task's story points, and appends the round to the
/// board's estimation history. A label consensus (t-shirt sizes, "?") is
/// recorded in history but leaves story points alone.
#[derive(Debug, Deserialize, Serialize)]
pub struct CompleteEstimation {
    /// The task the round estimated
    pub task_id: TaskId,
    /// One vote per participant
    pub votes: BTreeMap<MemberId, Vote>,
    /// Free-form discussion notes
    pub discussion: Option<String>,
}

impl CompleteEstimation {
    /// Create a new CompleteEstimation command
    pub fn new(task_id: impl Into<TaskId>, votes: BTreeMap<MemberId, Vote>) -> Self {
        Self {
            task_id: task_id.into(),
            votes,
            discussion: None,
        }
    }

    /// Add a single vote
    pub fn with_vote(mut self, member: impl Into<MemberId>, vote: impl Into<Vote>) -> Self {
        self.votes.insert(member.into(), vote.into());
        self
    }

    /// Set the discussion notes
    pub fn with_discussion(mut self, discussion: impl Into<String>) -> Self {
        self.discussion = Some(discussion.into());
        self
    }
}

impl Operation for CompleteEstimation {
    fn verb(&self) -> &'static str {
        "complete"
    }
    fn noun(&self) -> &'static str {
        "estimate"
    }
    fn description(&self) -> &'static str {
        "Apply a consensus estimate to a task and record the round"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for CompleteEstimation {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        let result: Result<Value> = async {
            let consensus = resolve(&self.votes);
            let estimation = match consensus {
                Consensus::Agreed(vote) => vote,
                other => {
                    return Err(BoardError::NoConsensus {
                        // reason() is always Some for a failed consensus
                        reason: other.reason().unwrap_or("tie").to_string(),
                    });
                }
            };

            let mut task = ctx.read_task(&self.task_id).await?;
            if let Some(points) = estimation.points() {
                task.story_point = Some(u32::try_from(points).unwrap_or(u32::MAX));
                ctx.write_task(&task).await;
            }

            let record = EstimationRecord::new(
                task.id.clone(),
                task.title.clone(),
                estimation,
                self.votes.clone(),
                self.discussion.clone(),
            );
            ctx.append_estimate(record.clone()).await;
            tracing::debug!(task = %task.id, estimation = %record.estimation, "estimation recorded");

            Ok(serde_json::to_value(&record)?)
        }
        .await;

        ExecutionResult::logged(self.op_string(), input, result, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::InitBoard;
    use crate::task::AddTask;

    async fn setup() -> (BoardContext, String) {
        let ctx = BoardContext::new();
        InitBoard::new("Test")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let added = AddTask::new("Estimate me")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let task_id = added["id"].as_str().unwrap().to_string();
        (ctx, task_id)
    }

    #[tokio::test]
    async fn test_complete_sets_story_point() {
        let (ctx, task_id) = setup().await;

        let result = CompleteEstimation::new(task_id.as_str(), BTreeMap::new())
            .with_vote("alice", 5u64)
            .with_vote("bob", 5u64)
            .with_vote("carol", 8u64)
            .with_discussion("Split on the API work")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["estimation"], 5);
        assert_eq!(result["task_title"], "Estimate me");

        let task = ctx.read_task(&task_id.as_str().into()).await.unwrap();
        assert_eq!(task.story_point, Some(5));

        let history = ctx.read_estimates(None).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].discussion.as_deref(), Some("Split on the API work"));
    }

    #[tokio::test]
    async fn test_label_consensus_skips_story_point() {
        let (ctx, task_id) = setup().await;

        let result = CompleteEstimation::new(task_id.as_str(), BTreeMap::new())
            .with_vote("alice", "XL")
            .with_vote("bob", "XL")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["estimation"], "XL");

        let task = ctx.read_task(&task_id.as_str().into()).await.unwrap();
        assert_eq!(task.story_point, None);
        assert_eq!(ctx.read_estimates(None).await.len(), 1);
    }

    #[tokio::test]
    async fn test_tie_errors_without_recording() {
        let (ctx, task_id) = setup().await;

        let result = CompleteEstimation::new(task_id.as_str(), BTreeMap::new())
            .with_vote("alice", 5u64)
            .with_vote("bob", 8u64)
            .execute(&ctx)
            .await
            .into_result();

        assert!(matches!(result, Err(BoardError::NoConsensus { .. })));
        assert!(ctx.read_estimates(None).await.is_empty());
        let task = ctx.read_task(&task_id.as_str().into()).await.unwrap();
        assert_eq!(task.story_point, None);
    }

    #[tokio::test]
    async fn test_unknown_task() {
        let (ctx, _) = setup().await;

        let result = CompleteEstimation::new("nonexistent", BTreeMap::new())
            .with_vote("alice", 3u64)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(BoardError::TaskNotFound { .. })));
    }
}
