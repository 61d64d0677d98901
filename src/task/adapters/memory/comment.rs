//! In-memory comment storage sharing state with [`InMemoryTaskRepository`].

use async_trait::async_trait;

use super::InMemoryTaskRepository;
use crate::task::{
    domain::{TaskComment, TaskId},
    ports::{TaskCommentRepository, TaskRepositoryError, TaskRepositoryResult},
};

#[async_trait]
impl TaskCommentRepository for InMemoryTaskRepository {
    async fn add_comment(&self, comment: &TaskComment) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TaskRepositoryError::NotFound(comment.task_id()));
        }
        state
            .comments
            .entry(comment.task_id())
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn comments(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<TaskComment>> {
        let state = self.read()?;
        let mut thread = state.comments.get(&task_id).cloned().unwrap_or_default();
        thread.sort_by_key(TaskComment::created_at);
        Ok(thread)
    }
}
