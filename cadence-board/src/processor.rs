//! Operation processor: one mutation observed at a time, with audit logging
//!
//! Commands can be executed directly, but the processor is the serialization
//! point for anything multi-client: it holds the board lock for the whole
//! operation and routes log entries into the activity log with actor
//! attribution.

use cadence_operations::{Execute, Operation, Value};

use crate::context::BoardContext;
use crate::error::{BoardError, Result};

/// Runs operations one at a time against a context
#[derive(Debug, Default)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    /// Create a processor with no actor attribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor attributing operations to an actor
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    /// Execute an operation under the board lock and record its log entry
    pub async fn process<O>(&self, op: &O, ctx: &BoardContext) -> Result<Value>
    where
        O: Operation + Execute<BoardContext, BoardError> + Sync,
    {
        let _lock = ctx.lock().await;

        let (value, log_entry) = op.execute(ctx).await.split();
        if let Some(entry) = log_entry {
            let entry = match &self.actor {
                Some(actor) => entry.with_actor(actor.clone()),
                None => entry,
            };
            tracing::debug!(op = %entry.op, "recording activity");
            ctx.append_activity(entry).await;
        }
        value
    }
}
