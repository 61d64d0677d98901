//! Repository port for task persistence, placement, and assignment lookup.

use crate::actor::UserId;
use crate::task::domain::{Placement, ProjectId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Which tasks of a project a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskScope {
    /// Every task in the project.
    All,
    /// Only tasks the given user is assigned to.
    AssignedTo(UserId),
}

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task together with its assignees.
    ///
    /// Duplicate user IDs in `assignees` are stored once.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task, assignees: &[UserId]) -> TaskRepositoryResult<()>;

    /// Persists detail changes (title, description, priority, due date,
    /// update timestamp) and returns the stored task. The stored placement
    /// is never overwritten, so a move committed after `task` was read
    /// survives the edit. When `assignees` is `Some`, the assignment set is
    /// replaced in the same unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(
        &self,
        task: &Task,
        assignees: Option<&[UserId]>,
    ) -> TaskRepositoryResult<Task>;

    /// Atomically sets a task's status, position, and update timestamp,
    /// returning the stored task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update_placement(
        &self,
        id: TaskId,
        placement: Placement,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Removes a task and its assignments, returning the removed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task>;

    /// Removes every task of a project with their assignments and comments,
    /// returning how many tasks were removed.
    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns `true` when `user_id` is a recorded assignee of `task_id`.
    async fn is_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<bool>;

    /// Returns the assignees of a task in assignment order.
    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>>;

    /// Returns project tasks visible under `scope`, ordered by position
    /// ascending, then newest first.
    async fn find_by_project(
        &self,
        project_id: ProjectId,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks assigned to `user_id`, soonest due date first; tasks
    /// without a due date come last.
    async fn find_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task in `status`, most recently updated first.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
