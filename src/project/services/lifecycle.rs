//! Service layer for projects and their members.

use crate::activity::{
    domain::ActivityAction,
    ports::{ActivityLog, ActivityLogError},
    services::{Subject, record_activity},
};
use crate::actor::{Actor, Role, UserId};
use crate::project::{
    domain::{
        Project, ProjectDomainError, ProjectDraft, ProjectEdit, ProjectId, ProjectName,
        ProjectStatus,
    },
    ports::{ProjectRepository, ProjectRepositoryError, ProjectScope},
};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use chrono::NaiveDate;
use mockable::Clock;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    name: String,
    description: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    members: Vec<UserId>,
}

impl CreateProjectRequest {
    /// Creates a request with the required name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            start_date: None,
            end_date: None,
            members: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the planned start.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Sets the planned end.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets the initial members.
    #[must_use]
    pub fn with_members(mut self, members: impl IntoIterator<Item = UserId>) -> Self {
        self.members = members.into_iter().collect();
        self
    }
}

/// Request payload for editing a project. Unset fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
    status: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl UpdateProjectRequest {
    /// Creates an empty edit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the status by name (`active`, `completed`).
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Replaces the planned start.
    #[must_use]
    pub const fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Replaces the planned end.
    #[must_use]
    pub const fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    fn into_edit(self) -> Result<ProjectEdit, ProjectDomainError> {
        let Self {
            name,
            description,
            status,
            start_date,
            end_date,
        } = self;
        Ok(ProjectEdit {
            name: name.map(ProjectName::new).transpose()?,
            description,
            status: status
                .as_deref()
                .map(ProjectStatus::try_from)
                .transpose()?,
            start_date,
            end_date,
        })
    }
}

/// A project together with its members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOverview {
    /// The project.
    pub project: Project,
    /// Members in join order.
    pub members: Vec<UserId>,
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The actor's role may not perform the operation.
    #[error("the {role} role cannot {operation}")]
    Forbidden {
        /// Operation that was refused.
        operation: &'static str,
        /// Role of the refused actor.
        role: Role,
    },

    /// The project does not exist.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(ProjectRepositoryError),

    /// Removing the project's tasks failed.
    #[error("failed to remove project tasks: {0}")]
    Tasks(#[from] TaskRepositoryError),

    /// The change was committed but its activity entry could not be written.
    #[error("project changed but activity entry was not recorded: {0}")]
    Activity(#[from] ActivityLogError),
}

impl ProjectError {
    /// Returns `true` when retrying the same request may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Repository(ProjectRepositoryError::Persistence(_))
                | Self::Tasks(TaskRepositoryError::Persistence(_))
                | Self::Activity(ActivityLogError::Persistence(_))
        )
    }
}

impl From<ProjectRepositoryError> for ProjectError {
    fn from(err: ProjectRepositoryError) -> Self {
        match err {
            ProjectRepositoryError::NotFound(project_id) => Self::NotFound(project_id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for project service operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Project orchestration service.
///
/// Holds the task store so that deleting a project also removes its tasks.
#[derive(Clone)]
pub struct ProjectService<P, R, L, C>
where
    P: ProjectRepository,
    R: TaskRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    tasks: Arc<R>,
    activity: Arc<L>,
    clock: Arc<C>,
}

impl<P, R, L, C> ProjectService<P, R, L, C>
where
    P: ProjectRepository,
    R: TaskRepository,
    L: ActivityLog,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<P>, tasks: Arc<R>, activity: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            projects,
            tasks,
            activity,
            clock,
        }
    }

    /// Creates a project and its initial members. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Forbidden`] for non-admins, a validation error
    /// for a blank name or inverted schedule, or a persistence error.
    pub async fn create_project(
        &self,
        actor: &Actor,
        request: CreateProjectRequest,
    ) -> ProjectResult<Project> {
        require_admin(actor, "create projects")?;

        let mut draft = ProjectDraft::new(ProjectName::new(request.name)?);
        draft.description = request.description;
        draft.start_date = request.start_date;
        draft.end_date = request.end_date;
        let project = Project::new(draft, actor.id(), &*self.clock)?;

        self.projects.store(&project).await?;
        self.projects
            .add_members(project.id(), &request.members)
            .await?;

        let details = json!({ "name": project.name().as_str() });
        self.record(actor, ActivityAction::CreatedProject, project.id(), &details)
            .await?;

        tracing::info!(project_id = %project.id(), actor = %actor.id(), "project created");
        Ok(project)
    }

    /// Edits project details or status. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Forbidden`] for non-admins,
    /// [`ProjectError::NotFound`] for a missing project, a validation error,
    /// or a persistence error.
    pub async fn update_project(
        &self,
        actor: &Actor,
        project_id: ProjectId,
        request: UpdateProjectRequest,
    ) -> ProjectResult<Project> {
        require_admin(actor, "edit projects")?;
        let edit = request.into_edit()?;

        let mut project = self.load(project_id).await?;
        project.apply_edit(edit, &*self.clock)?;
        self.projects.update(&project).await?;

        let details = json!({
            "name": project.name().as_str(),
            "status": project.status(),
        });
        self.record(actor, ActivityAction::UpdatedProject, project.id(), &details)
            .await?;

        tracing::info!(project_id = %project.id(), actor = %actor.id(), "project updated");
        Ok(project)
    }

    /// Deletes a project, its members, and all of its tasks. Admin only.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Forbidden`] for non-admins,
    /// [`ProjectError::NotFound`] for a missing project, or a persistence
    /// error.
    pub async fn delete_project(
        &self,
        actor: &Actor,
        project_id: ProjectId,
    ) -> ProjectResult<Project> {
        require_admin(actor, "delete projects")?;
        self.load(project_id).await?;

        let removed_tasks = self.tasks.delete_by_project(project_id).await?;
        let removed = self.projects.delete(project_id).await?;

        let details = json!({
            "name": removed.name().as_str(),
            "removed_tasks": removed_tasks,
        });
        self.record(actor, ActivityAction::DeletedProject, removed.id(), &details)
            .await?;

        tracing::info!(
            project_id = %removed.id(),
            actor = %actor.id(),
            removed_tasks,
            "project deleted"
        );
        Ok(removed)
    }

    /// Adds a user to a project. Admin only.
    ///
    /// Returns `false` when the user was already a member; nothing is
    /// recorded in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Forbidden`] for non-admins,
    /// [`ProjectError::NotFound`] for a missing project, or a persistence
    /// error.
    pub async fn add_member(
        &self,
        actor: &Actor,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ProjectResult<bool> {
        require_admin(actor, "add project members")?;
        let added = self.projects.add_members(project_id, &[user_id]).await?;
        if added == 0 {
            return Ok(false);
        }

        let details = json!({ "user_id": user_id });
        self.record(actor, ActivityAction::AddedMember, project_id, &details)
            .await?;
        Ok(true)
    }

    /// Lists projects newest first.
    ///
    /// Employees only see projects they are members of.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::Repository`] when the lookup fails.
    pub async fn list_projects(&self, actor: &Actor) -> ProjectResult<Vec<Project>> {
        let scope = match actor.role() {
            Role::Employee => ProjectScope::MemberOf(actor.id()),
            Role::Admin | Role::Tester => ProjectScope::All,
        };
        Ok(self.projects.list(scope).await?)
    }

    /// Returns a project with its members.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NotFound`] for a missing project or
    /// [`ProjectError::Repository`] when the lookup fails.
    pub async fn project_overview(&self, project_id: ProjectId) -> ProjectResult<ProjectOverview> {
        let project = self.load(project_id).await?;
        let members = self.projects.members(project_id).await?;
        Ok(ProjectOverview { project, members })
    }

    async fn load(&self, project_id: ProjectId) -> ProjectResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectError::NotFound(project_id))
    }

    async fn record(
        &self,
        actor: &Actor,
        action: ActivityAction,
        project_id: ProjectId,
        details: &serde_json::Value,
    ) -> ProjectResult<()> {
        record_activity(
            &*self.activity,
            &*self.clock,
            actor,
            action,
            Subject::project(project_id),
            details,
        )
        .await?;
        Ok(())
    }
}

fn require_admin(actor: &Actor, operation: &'static str) -> ProjectResult<()> {
    if actor.role().is_admin() {
        return Ok(());
    }
    tracing::warn!(actor = %actor.id(), role = %actor.role(), operation, "operation forbidden");
    Err(ProjectError::Forbidden {
        operation,
        role: actor.role(),
    })
}
