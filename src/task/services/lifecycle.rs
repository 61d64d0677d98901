//! Service layer for task creation, edits, deletion, and listings.

use crate::activity::{
    domain::ActivityAction,
    ports::{ActivityLog, ActivityLogError},
    services::{Subject, record_activity},
};
use crate::actor::{Actor, Role, UserId};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::task::{
    domain::{
        ParseTaskStatusError, Placement, Priority, ProjectId, Task, TaskComment,
        TaskDomainError, TaskDraft, TaskEdit, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskCommentRepository, TaskRepository, TaskRepositoryError, TaskScope},
};
use chrono::NaiveDate;
use mockable::Clock;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    title: String,
    description: Option<String>,
    priority: Option<String>,
    status: Option<String>,
    position: Option<i64>,
    due_date: Option<NaiveDate>,
    assignees: Vec<UserId>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(project_id: ProjectId, title: impl Into<String>) -> Self {
        Self {
            project_id,
            title: title.into(),
            description: None,
            priority: None,
            status: None,
            position: None,
            due_date: None,
            assignees: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority by name (`low`, `medium`, `high`).
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Sets the initial column by name. Defaults to `todo`.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the initial ordering key. Defaults to 0.
    #[must_use]
    pub const fn with_position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the assignees.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = assignees.into_iter().collect();
        self
    }
}

/// Request payload for editing task details. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    due_date: Option<NaiveDate>,
    assignees: Option<Vec<UserId>>,
}

impl UpdateTaskRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority by name.
    #[must_use]
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Replaces the whole assignee set. An empty list clears it.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assignees = Some(assignees.into_iter().collect());
        self
    }

    fn into_edit(self) -> Result<(TaskEdit, Option<Vec<UserId>>), TaskDomainError> {
        let Self {
            title,
            description,
            priority,
            due_date,
            assignees,
        } = self;
        let edit = TaskEdit {
            title: title.map(TaskTitle::new).transpose()?,
            description,
            priority: priority
                .as_deref()
                .map(Priority::try_from)
                .transpose()?,
            due_date,
        };
        Ok((edit, assignees))
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The actor's role may not perform the operation.
    #[error("the {role} role cannot {operation}")]
    Forbidden {
        /// Operation that was refused.
        operation: &'static str,
        /// Role of the refused actor.
        role: Role,
    },

    /// The task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The initial column name is not a known status.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// Project membership lookup or update failed.
    #[error(transparent)]
    Membership(ProjectRepositoryError),

    /// The change was committed but its activity entry could not be written.
    #[error("task changed but activity entry was not recorded: {0}")]
    Activity(#[from] ActivityLogError),
}

impl LifecycleError {
    /// Returns `true` when retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Repository(TaskRepositoryError::Persistence(_))
                | Self::Membership(ProjectRepositoryError::Persistence(_))
                | Self::Activity(ActivityLogError::Persistence(_))
        )
    }
}

impl From<TaskRepositoryError> for LifecycleError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(task_id) => Self::NotFound(task_id),
            other => Self::Repository(other),
        }
    }
}

impl From<ProjectRepositoryError> for LifecycleError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(project_id) => Self::ProjectNotFound(project_id),
            other => Self::Membership(other),
        }
    }
}

/// Result type for task lifecycle service operations.
pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Task lifecycle orchestration service.
///
/// Assignees are added to the owning project's members on create and edit.
#[derive(Clone)]
pub struct TaskLifecycleService<R, P, L, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    tasks: Arc<R>,
    projects: Arc<P>,
    activity: Arc<L>,
    clock: Arc<C>,
}

impl<R, P, L, C> TaskLifecycleService<R, P, L, C>
where
    R: TaskRepository,
    P: ProjectRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<R>, projects: Arc<P>, activity: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            activity,
            clock,
        }
    }

    /// Creates a task and its assignments. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] for non-admins,
    /// [`LifecycleError::ProjectNotFound`] for a missing project, a
    /// validation error for a blank title or unknown priority/status, or a
    /// persistence error.
    pub async fn create_task(
        &self,
        actor: &Actor,
        request: CreateTaskRequest,
    ) -> LifecycleResult<Task> {
        require_admin(actor, "create tasks")?;

        let mut draft = TaskDraft::new(request.project_id, TaskTitle::new(request.title)?);
        draft.description = request.description;
        if let Some(priority) = request.priority.as_deref() {
            draft.priority = Priority::try_from(priority)?;
        }
        let status = request
            .status
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()?
            .unwrap_or_default();
        draft.placement = Placement::new(status, request.position.unwrap_or_default());
        draft.due_date = request.due_date;

        if self.projects.find_by_id(request.project_id).await?.is_none() {
            return Err(LifecycleError::ProjectNotFound(request.project_id));
        }

        let task = Task::new(draft, actor.id(), &*self.clock);
        self.tasks.store(&task, &request.assignees).await?;
        self.enrol_assignees(task.project_id(), &request.assignees)
            .await?;

        let details = json!({
            "title": task.title().as_str(),
            "project_id": task.project_id(),
        });
        self.record(actor, ActivityAction::CreatedTask, task.id(), &details)
            .await?;

        tracing::info!(
            task_id = %task.id(),
            project_id = %task.project_id(),
            actor = %actor.id(),
            "task created"
        );
        Ok(task)
    }

    /// Edits task details and optionally replaces assignees. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] for non-admins,
    /// [`LifecycleError::NotFound`] for a missing task, a validation error,
    /// or a persistence error.
    pub async fn update_task(
        &self,
        actor: &Actor,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> LifecycleResult<Task> {
        require_admin(actor, "edit task details")?;
        let (edit, assignees) = request.into_edit()?;

        let mut task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(LifecycleError::NotFound(task_id))?;
        task.apply_edit(edit, &*self.clock);
        let stored = self.tasks.update(&task, assignees.as_deref()).await?;
        if let Some(users) = assignees.as_deref() {
            self.enrol_assignees(stored.project_id(), users).await?;
        }

        let details = json!({ "title": stored.title().as_str() });
        self.record(actor, ActivityAction::UpdatedTask, stored.id(), &details)
            .await?;

        tracing::info!(task_id = %stored.id(), actor = %actor.id(), "task updated");
        Ok(stored)
    }

    /// Deletes a task and its assignments. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Forbidden`] for non-admins,
    /// [`LifecycleError::NotFound`] for a missing task, or a persistence
    /// error.
    pub async fn delete_task(&self, actor: &Actor, task_id: TaskId) -> LifecycleResult<Task> {
        require_admin(actor, "delete tasks")?;
        let removed = self.tasks.delete(task_id).await?;

        let details = json!({ "title": removed.title().as_str() });
        self.record(actor, ActivityAction::DeletedTask, removed.id(), &details)
            .await?;

        tracing::info!(task_id = %removed.id(), actor = %actor.id(), "task deleted");
        Ok(removed)
    }

    /// Lists a project's tasks in board order.
    ///
    /// Employees only see tasks assigned to them.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when the lookup fails.
    pub async fn list_project_tasks(
        &self,
        actor: &Actor,
        project_id: ProjectId,
    ) -> LifecycleResult<Vec<Task>> {
        let scope = match actor.role() {
            Role::Employee => TaskScope::AssignedTo(actor.id()),
            Role::Admin | Role::Tester => TaskScope::All,
        };
        Ok(self.tasks.find_by_project(project_id, scope).await?)
    }

    /// Lists the actor's own work queue.
    ///
    /// Testers get every task awaiting review; other roles get the tasks
    /// assigned to them, soonest due first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when the lookup fails.
    pub async fn my_tasks(&self, actor: &Actor) -> LifecycleResult<Vec<Task>> {
        let tasks = match actor.role() {
            Role::Tester => self.tasks.find_by_status(TaskStatus::Review).await?,
            Role::Admin | Role::Employee => self.tasks.find_assigned_to(actor.id()).await?,
        };
        Ok(tasks)
    }

    /// Returns the assignees of a task.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when the lookup fails.
    pub async fn assignees(&self, task_id: TaskId) -> LifecycleResult<Vec<UserId>> {
        Ok(self.tasks.assignees(task_id).await?)
    }

    async fn enrol_assignees(
        &self,
        project_id: ProjectId,
        assignees: &[UserId],
    ) -> LifecycleResult<()> {
        let added = self.projects.add_members(project_id, assignees).await?;
        if added > 0 {
            tracing::debug!(project_id = %project_id, added, "assignees joined project");
        }
        Ok(())
    }

    async fn record(
        &self,
        actor: &Actor,
        action: ActivityAction,
        task_id: TaskId,
        details: &serde_json::Value,
    ) -> LifecycleResult<()> {
        record_activity(
            &*self.activity,
            &*self.clock,
            actor,
            action,
            Subject::task(task_id),
            details,
        )
        .await?;
        Ok(())
    }
}

impl<R, P, L, C> TaskLifecycleService<R, P, L, C>
where
    R: TaskRepository + TaskCommentRepository,
    P: ProjectRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    /// Appends a comment to a task. Any role may comment.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Domain`] for blank content,
    /// [`LifecycleError::NotFound`] for a missing task, or a persistence
    /// error.
    pub async fn add_comment(
        &self,
        actor: &Actor,
        task_id: TaskId,
        content: &str,
    ) -> LifecycleResult<TaskComment> {
        let comment = TaskComment::new(task_id, actor.id(), content, &*self.clock)?;
        self.tasks.add_comment(&comment).await?;
        tracing::debug!(task_id = %task_id, actor = %actor.id(), "comment added");
        Ok(comment)
    }

    /// Returns a task's comments, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Repository`] when the lookup fails.
    pub async fn comments(&self, task_id: TaskId) -> LifecycleResult<Vec<TaskComment>> {
        Ok(self.tasks.comments(task_id).await?)
    }
}

fn require_admin(actor: &Actor, operation: &'static str) -> LifecycleResult<()> {
    if actor.role().is_admin() {
        return Ok(());
    }
    tracing::warn!(actor = %actor.id(), role = %actor.role(), operation, "operation forbidden");
    Err(LifecycleError::Forbidden {
        operation,
        role: actor.role(),
    })
}
