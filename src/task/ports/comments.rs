//! Port for task comments.

use super::TaskRepositoryResult;
use crate::task::domain::{TaskComment, TaskId};
use async_trait::async_trait;

/// Comment persistence contract.
///
/// Comments belong to their task and disappear with it.
#[async_trait]
pub trait TaskCommentRepository: Send + Sync {
    /// Appends a comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskRepositoryError::NotFound`] when the task does
    /// not exist.
    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()>;

    /// Returns the comments of a task, oldest first.
    async fn comments(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>>;
}
