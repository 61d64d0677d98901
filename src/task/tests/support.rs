//! Shared builders and doubles for task tests.

use crate::activity::{
    domain::{ActivityLogEntry, EntityType},
    ports::{ActivityLog, ActivityLogResult},
};
use crate::actor::UserId;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Project, ProjectDraft, ProjectName},
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{
        PersistedTaskData, Placement, Priority, ProjectId, Task, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope},
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use mockable::DefaultClock;
use uuid::Uuid;

/// Fixed reference instant so ordering tests do not depend on wall time.
pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid fixed timestamp")
}

/// Stores a fresh project and returns its identifier.
pub(super) async fn seed_project(projects: &InMemoryProjectRepository) -> ProjectId {
    let name = ProjectName::new("Board").expect("valid project name");
    let project = Project::new(ProjectDraft::new(name), UserId::new(), &DefaultClock)
        .expect("valid project");
    projects.store(&project).await.expect("project stored");
    project.id()
}

/// Builder for tasks with explicit timestamps.
#[derive(Debug, Clone)]
pub(super) struct TaskSeed {
    data: PersistedTaskData,
}

impl TaskSeed {
    pub(super) fn new(project_id: ProjectId, title: &str) -> Self {
        Self {
            data: PersistedTaskData {
                id: TaskId::new(),
                project_id,
                title: TaskTitle::new(title).expect("valid title"),
                description: None,
                priority: Priority::Medium,
                placement: Placement::default(),
                created_by: UserId::new(),
                due_date: None,
                created_at: epoch(),
                updated_at: epoch(),
            },
        }
    }

    pub(super) const fn at(mut self, status: TaskStatus, position: i64) -> Self {
        self.data.placement = Placement::new(status, position);
        self
    }

    pub(super) fn created_minutes_after_epoch(mut self, minutes: i64) -> Self {
        self.data.created_at = epoch() + Duration::minutes(minutes);
        self.data.updated_at = self.data.created_at;
        self
    }

    pub(super) fn updated_minutes_after_epoch(mut self, minutes: i64) -> Self {
        self.data.updated_at = epoch() + Duration::minutes(minutes);
        self
    }

    pub(super) fn due(mut self, year: i32, month: u32, day: u32) -> Self {
        self.data.due_date = Some(NaiveDate::from_ymd_opt(year, month, day).expect("valid date"));
        self
    }

    pub(super) fn build(self) -> Task {
        Task::from_persisted(self.data)
    }
}

mockall::mock! {
    pub AuditLog {}

    #[async_trait::async_trait]
    impl ActivityLog for AuditLog {
        async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()>;
        async fn recent(&self, limit: usize) -> ActivityLogResult<Vec<ActivityLogEntry>>;
        async fn for_entity(
            &self,
            entity_type: EntityType,
            entity_id: Uuid,
        ) -> ActivityLogResult<Vec<ActivityLogEntry>>;
    }
}

/// Task store whose placement writes always fail; everything else is
/// served from memory.
#[derive(Debug, Clone, Default)]
pub(super) struct FailingPlacementRepository {
    pub(super) inner: InMemoryTaskRepository,
}

#[async_trait::async_trait]
impl TaskRepository for FailingPlacementRepository {
    async fn store(&self, task: &Task, assignees: &[UserId]) -> TaskRepositoryResult<()> {
        self.inner.store(task, assignees).await
    }

    async fn update(
        &self,
        task: &Task,
        assignees: Option<&[UserId]>,
    ) -> TaskRepositoryResult<Task> {
        self.inner.update(task, assignees).await
    }

    async fn update_placement(
        &self,
        _id: TaskId,
        _placement: Placement,
        _updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        Err(TaskRepositoryError::persistence(std::io::Error::other(
            "connection reset",
        )))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.inner.delete(id).await
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.inner.delete_by_project(project_id).await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.inner.find_by_id(id).await
    }

    async fn is_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<bool> {
        self.inner.is_assignee(task_id, user_id).await
    }

    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
        self.inner.assignees(task_id).await
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_project(project_id, scope).await
    }

    async fn find_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_assigned_to(user_id).await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.inner.find_by_status(status).await
    }
}
