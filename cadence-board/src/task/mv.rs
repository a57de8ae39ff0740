//! MoveTask command - the drag-and-drop placement resolver

use cadence_operations::{async_trait, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::types::{ContainerKey, Position, Registry, Status, TaskId};

/// Move a task between containers or within one.
///
/// Models a completed drag gesture as a single request carrying final
/// source/destination coordinates. A `None` destination is a cancelled
/// gesture and a guaranteed no-op; a destination equal to the source is
/// idempotent. All validation happens before the first write, so a failed
/// move never partially applies.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MoveTask {
    /// The task ID to move
    pub id: TaskId,
    /// Where the gesture started
    pub source: Position,
    /// Where the task was dropped; None means the gesture was cancelled
    pub destination: Option<Position>,
}

impl MoveTask {
    /// Create a new MoveTask command
    pub fn new(id: impl Into<TaskId>, source: Position, destination: Position) -> Self {
        Self {
            id: id.into(),
            source,
            destination: Some(destination),
        }
    }

    /// A cancelled gesture (dropped outside any container)
    pub fn cancelled(id: impl Into<TaskId>, source: Position) -> Self {
        Self {
            id: id.into(),
            source,
            destination: None,
        }
    }
}

impl Operation for MoveTask {
    fn verb(&self) -> &'static str {
        "move"
    }
    fn noun(&self) -> &'static str {
        "task"
    }
    fn description(&self) -> &'static str {
        "Move a task to a different container or position"
    }
}

#[async_trait]
impl Execute<BoardContext, BoardError> for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, BoardError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap();

        match self.apply(ctx).await {
            Ok(Some(value)) => ExecutionResult::logged(self.op_string(), input, Ok(value), start),
            // No-op gestures mutate nothing and stay out of the activity log
            Ok(None) => ExecutionResult::Unlogged {
                value: serde_json::json!({ "id": self.id, "moved": false }),
            },
            Err(error) => ExecutionResult::logged(self.op_string(), input, Err(error), start),
        }
    }
}

impl MoveTask {
    /// Resolve and commit the move. `Ok(None)` is a no-op gesture.
    async fn apply(&self, ctx: &BoardContext) -> Result<Option<Value>> {
        ctx.read_board().await?;

        let Some(destination) = &self.destination else {
            return Ok(None);
        };
        if *destination == self.source {
            return Ok(None);
        }

        let mut registry = ctx.read_registry().await;
        let mut task = ctx.read_task(&self.id).await?;

        for key in [&self.source.container, &destination.container] {
            if let ContainerKey::Section(sid) = key {
                if registry.section(sid).is_none() {
                    return Err(BoardError::SectionNotFound {
                        id: sid.to_string(),
                    });
                }
            }
        }

        // The request's source must agree with where the task actually lives
        let home = registry
            .home_of(&self.id)
            .cloned()
            .ok_or_else(|| BoardError::TaskNotFound {
                id: self.id.to_string(),
            })?;
        if self.source.container.axis() != home {
            return Err(BoardError::invalid_value(
                "source",
                format!("task {} is not in {}", self.id, self.source.container),
            ));
        }

        let index = destination.index;
        let (container, at) = match (&self.source.container, &destination.container) {
            // Reorder within the sprint sequence; no field changes
            (ContainerKey::Sprint | ContainerKey::Column(_), ContainerKey::Sprint) => {
                registry.remove_task(&self.id);
                let at = registry.insert_sprint(index, self.id.clone());
                (ContainerKey::Sprint, at)
            }
            // Column-addressed placement: rewrite status, reposition among
            // the destination column's tasks. Membership in the sprint
            // sequence is never lost.
            (ContainerKey::Sprint | ContainerKey::Column(_), ContainerKey::Column(to)) => {
                registry.remove_task(&self.id);
                let (sprint_at, column_at) = column_slot(ctx, &registry, *to, index).await?;
                task.status = *to;
                registry.insert_sprint(sprint_at, self.id.clone());
                (ContainerKey::Column(*to), column_at)
            }
            // Sprint -> backlog section; status and priority stay as last set
            (ContainerKey::Sprint | ContainerKey::Column(_), ContainerKey::Section(to)) => {
                registry.remove_task(&self.id);
                let at = registry
                    .insert_section(to, index, self.id.clone())
                    .ok_or_else(|| BoardError::SectionNotFound { id: to.to_string() })?;
                (ContainerKey::Section(to.clone()), at)
            }
            // Backlog section -> sprint; status is already a valid kanban
            // status and is preserved
            (ContainerKey::Section(_), ContainerKey::Sprint) => {
                registry.remove_task(&self.id);
                let at = registry.insert_sprint(index, self.id.clone());
                (ContainerKey::Sprint, at)
            }
            (ContainerKey::Section(_), ContainerKey::Column(to)) => {
                registry.remove_task(&self.id);
                let (sprint_at, column_at) = column_slot(ctx, &registry, *to, index).await?;
                task.status = *to;
                registry.insert_sprint(sprint_at, self.id.clone());
                (ContainerKey::Column(*to), column_at)
            }
            // Between sections, or a reorder within one
            (ContainerKey::Section(_), ContainerKey::Section(to)) => {
                registry.remove_task(&self.id);
                let at = registry
                    .insert_section(to, index, self.id.clone())
                    .ok_or_else(|| BoardError::SectionNotFound { id: to.to_string() })?;
                (ContainerKey::Section(to.clone()), at)
            }
        };

        ctx.write_task(&task).await;
        ctx.write_registry(registry).await;
        tracing::debug!(task = %self.id, container = %container, index = at, "task moved");

        Ok(Some(serde_json::json!({
            "id": self.id,
            "container": container.to_string(),
            "index": at,
            "status": task.status,
            "moved": true,
        })))
    }
}

/// Find the sprint insertion point that places a task at `index` among the
/// tasks whose status matches the destination column.
///
/// Returns `(sprint position, clamped within-column position)`. Past-the-end
/// indices land after the column's last task; an empty column appends at the
/// end of the sprint.
async fn column_slot(
    ctx: &BoardContext,
    registry: &Registry,
    status: Status,
    index: usize,
) -> Result<(usize, usize)> {
    let mut seen = 0usize;
    let mut after_last = None;
    for (pos, id) in registry.sprint().iter().enumerate() {
        let sibling = ctx.read_task(id).await?;
        if sibling.status == status {
            if seen == index {
                return Ok((pos, seen));
            }
            seen += 1;
            after_last = Some(pos + 1);
        }
    }
    Ok((after_last.unwrap_or(registry.sprint().len()), seen))
}
