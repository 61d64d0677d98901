//! Service layer applying board status moves.

use crate::activity::{
    domain::ActivityAction,
    ports::{ActivityLog, ActivityLogError},
    services::{Subject, record_activity},
};
use crate::actor::{Actor, Role};
use crate::task::{
    domain::{ParseTaskStatusError, Placement, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::workflow::{Decision, DenialReason, allowed_targets, evaluate_transition};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Request payload for moving a task on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTaskRequest {
    task_id: TaskId,
    status: String,
    position: Option<i64>,
}

impl MoveTaskRequest {
    /// Creates a request to move `task_id` into the column named `status`.
    ///
    /// Without a position the task keeps its current ordering key.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
            position: None,
        }
    }

    /// Sets the ordering key within the destination column.
    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the task to move.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Details recorded with a `moved_task` activity entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDetails {
    /// Column before the move.
    pub previous_status: TaskStatus,
    /// Column after the move.
    pub status: TaskStatus,
    /// Ordering key after the move.
    pub position: i64,
}

/// Errors returned while moving a task.
#[derive(Debug, Error)]
pub enum MoveTaskError {
    /// The requested column name is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The workflow rules reject the move.
    #[error("{message}")]
    Denied {
        /// Policy reason.
        reason: DenialReason,
        /// Column the task is in.
        from: TaskStatus,
        /// Column that was requested.
        to: TaskStatus,
        /// User-facing explanation.
        message: String,
    },

    /// Loading or persisting the task failed. Nothing was committed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// The move was committed but its activity entry could not be written.
    #[error("task moved but activity entry was not recorded: {0}")]
    Activity(#[from] ActivityLogError),
}

impl MoveTaskError {
    fn denied(reason: DenialReason, role: Role, from: TaskStatus, to: TaskStatus) -> Self {
        Self::Denied {
            reason,
            from,
            to,
            message: reason.explain(role, from, to),
        }
    }

    /// Returns the policy reason when the move was denied.
    #[must_use]
    pub const fn denial_reason(&self) -> Option<DenialReason> {
        match self {
            Self::Denied { reason, .. } => Some(*reason),
            _ => None,
        }
    }

    /// Returns `true` when retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Repository(TaskRepositoryError::Persistence(_))
                | Self::Activity(ActivityLogError::Persistence(_))
        )
    }
}

impl From<TaskRepositoryError> for MoveTaskError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::NotFound(task_id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for move operations.
pub type MoveTaskResult<T> = Result<T, MoveTaskError>;

/// Applies board moves approved by the workflow engine.
#[derive(Clone)]
pub struct TaskWorkflowService<R, L, C>
where
    R: TaskRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    activity: Arc<L>,
    clock: Arc<C>,
}

impl<R, L, C> TaskWorkflowService<R, L, C>
where
    R: TaskRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    /// Creates a new workflow service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, activity: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            activity,
            clock,
        }
    }

    /// Moves a task to a new column and position on behalf of `actor`.
    ///
    /// The new status and position are persisted together. A `moved_task`
    /// activity entry is appended only after that write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`MoveTaskError::InvalidStatus`] for an unknown column name,
    /// [`MoveTaskError::NotFound`] for a missing task,
    /// [`MoveTaskError::Denied`] when the rules reject the move, and
    /// [`MoveTaskError::Repository`] or [`MoveTaskError::Activity`] when
    /// persistence fails.
    pub async fn move_task(
        &self,
        actor: &Actor,
        request: MoveTaskRequest,
    ) -> MoveTaskResult<Task> {
        let requested = TaskStatus::try_from(request.status.as_str())?;
        let task = self.load(request.task_id).await?;
        let current = task.status();
        let is_assigned = self.is_assigned(actor, task.id()).await?;

        let decision = evaluate_transition(current, requested, actor.role(), is_assigned);
        tracing::debug!(
            task_id = %task.id(),
            actor = %actor.id(),
            role = %actor.role(),
            from = %current,
            to = %requested,
            ?decision,
            "evaluated task move"
        );
        if let Decision::Denied(reason) = decision {
            tracing::warn!(
                task_id = %task.id(),
                actor = %actor.id(),
                role = %actor.role(),
                from = %current,
                to = %requested,
                reason = %reason,
                "task move denied"
            );
            return Err(MoveTaskError::denied(reason, actor.role(), current, requested));
        }

        let placement = Placement::new(requested, request.position.unwrap_or(task.position()));
        let moved = self
            .tasks
            .update_placement(task.id(), placement, self.clock.utc())
            .await
            .inspect_err(|err| {
                tracing::warn!(task_id = %task.id(), error = %err, "failed to persist task move");
            })?;

        let details = MoveDetails {
            previous_status: current,
            status: moved.status(),
            position: moved.position(),
        };
        record_activity(
            &*self.activity,
            &*self.clock,
            actor,
            ActivityAction::MovedTask,
            Subject::task(moved.id()),
            &details,
        )
        .await?;

        tracing::info!(
            task_id = %moved.id(),
            actor = %actor.id(),
            from = %current,
            to = %moved.status(),
            position = moved.position(),
            "task moved"
        );
        Ok(moved)
    }

    /// Returns the columns `actor` may move the task to, for board hints.
    ///
    /// The list is advisory; [`Self::move_task`] re-checks every request.
    ///
    /// # Errors
    ///
    /// Returns [`MoveTaskError::NotFound`] for a missing task or
    /// [`MoveTaskError::Repository`] when the lookup fails.
    pub async fn move_options(
        &self,
        actor: &Actor,
        task_id: TaskId,
    ) -> MoveTaskResult<Vec<TaskStatus>> {
        let task = self.load(task_id).await?;
        let is_assigned = self.is_assigned(actor, task_id).await?;
        Ok(allowed_targets(task.status(), actor.role(), is_assigned))
    }

    async fn load(&self, task_id: TaskId) -> MoveTaskResult<Task> {
        self.tasks
            .find_by_id(task_id)
            .await?
            .ok_or(MoveTaskError::NotFound(task_id))
    }

    /// Assignment only matters to the employee rules, so other roles skip
    /// the lookup.
    async fn is_assigned(&self, actor: &Actor, task_id: TaskId) -> TaskRepositoryResult<bool> {
        match actor.role() {
            Role::Employee => self.tasks.is_assignee(task_id, actor.id()).await,
            Role::Admin | Role::Tester => Ok(false),
        }
    }
}
