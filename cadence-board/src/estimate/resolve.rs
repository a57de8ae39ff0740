//! ResolveEstimate command

use std::collections::BTreeMap;

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::Deserialize;
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::BoardError;
use crate::types::{resolve, MemberId, Vote};

/// Tally a map of votes into a strict-plurality consensus.
///
/// Pure and order-independent; never touches board state.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveEstimate {
    /// One vote per participant
    pub votes: BTreeMap<MemberId, Vote>,
}

impl ResolveEstimate {
    /// Create a new ResolveEstimate command
    pub fn new(votes: BTreeMap<MemberId, Vote>) -> Self {
        Self { votes }
    }

    /// Add a single vote
    pub fn with_vote(mut self, member: impl Into<MemberId>, vote: impl Into<Vote>) -> Self {
        self.votes.insert(member.into(), vote.into());
        self
    }
}

impl Operation for ResolveEstimate {
    fn verb(&self) -> &'static str {
        "resolve"
    }
    fn noun(&self) -> &'static str {
        "estimate"
    }
    fn description(&self) -> &'static str {
        "Tally votes into a plurality consensus"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for ResolveEstimate {
    async fn execute(&self, _ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        ExecutionResult::Unlogged {
            value: resolve(&self.votes).to_value(),
        }
    }
}
