//! In-memory repository for task tests and single-process use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::actor::{UserId, unique_users};
use crate::task::{
    domain::{Placement, ProjectId, Task, TaskComment, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
pub(super) struct InMemoryTaskState {
    pub(super) tasks: HashMap<TaskId, Task>,
    pub(super) assignees: HashMap<TaskId, Vec<UserId>>,
    pub(super) comments: HashMap<TaskId, Vec<TaskComment>>,
}

impl InMemoryTaskState {
    fn is_assigned(&self, task_id: TaskId, user_id: UserId) -> bool {
        self.assignees
            .get(&task_id)
            .is_some_and(|users| users.contains(&user_id))
    }

    fn collect_tasks(&self, mut keep: impl FnMut(&Task) -> bool) -> Vec<Task> {
        self.tasks.values().filter(|task| keep(task)).cloned().collect()
    }

    fn remove_task(&mut self, id: TaskId) -> Option<Task> {
        let removed = self.tasks.remove(&id)?;
        self.assignees.remove(&id);
        self.comments.remove(&id);
        Some(removed)
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    pub(super) fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn board_order(left: &Task, right: &Task) -> Ordering {
    left.position()
        .cmp(&right.position())
        .then_with(|| right.created_at().cmp(&left.created_at()))
}

fn due_date_order(left: &Task, right: &Task) -> Ordering {
    let by_due = match (left.due_date(), right.due_date()) {
        (Some(left_due), Some(right_due)) => left_due.cmp(&right_due),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_due.then_with(|| left.created_at().cmp(&right.created_at()))
}

fn review_queue_order(left: &Task, right: &Task) -> Ordering {
    right
        .updated_at()
        .cmp(&left.updated_at())
        .then_with(|| left.created_at().cmp(&right.created_at()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task, assignees: &[UserId]) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        state.assignees.insert(task.id(), unique_users(assignees));
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(
        &self,
        task: &Task,
        assignees: Option<&[UserId]>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.merge_details(task);
        let updated = stored.clone();

        if let Some(new_assignees) = assignees {
            state
                .assignees
                .insert(task.id(), unique_users(new_assignees));
        }
        Ok(updated)
    }

    async fn update_placement(
        &self,
        id: TaskId,
        placement: Placement,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        let mut moved = stored.clone();
        moved.place_at(placement, updated_at);
        state.tasks.insert(id, moved.clone());
        Ok(moved)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.remove_task(id).ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        let mut state = self.write()?;
        let doomed: Vec<TaskId> = state
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .map(Task::id)
            .collect();
        for task_id in &doomed {
            state.remove_task(*task_id);
        }
        Ok(doomed.len())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn is_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<bool> {
        let state = self.read()?;
        Ok(state.is_assigned(task_id, user_id))
    }

    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
        let state = self.read()?;
        Ok(state.assignees.get(&task_id).cloned().unwrap_or_default())
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks = state.collect_tasks(|task| {
            task.project_id() == project_id
                && match scope {
                    TaskScope::All => true,
                    TaskScope::AssignedTo(user_id) => state.is_assigned(task.id(), user_id),
                }
        });
        tasks.sort_by(board_order);
        Ok(tasks)
    }

    async fn find_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks = state.collect_tasks(|task| state.is_assigned(task.id(), user_id));
        tasks.sort_by(due_date_order);
        Ok(tasks)
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks = state.collect_tasks(|task| task.status() == status);
        tasks.sort_by(review_queue_order);
        Ok(tasks)
    }
}
