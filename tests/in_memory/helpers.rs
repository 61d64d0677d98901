//! Shared helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    activity::{adapters::memory::InMemoryActivityLog, services::ActivityFeedService},
    actor::UserId,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Project, ProjectDraft, ProjectId, ProjectName},
        ports::ProjectRepository,
        services::ProjectService,
    },
    settings::ActivitySettings,
    task::{
        adapters::memory::InMemoryTaskRepository,
        services::{TaskLifecycleService, TaskWorkflowService},
    },
};

/// Lifecycle service over in-memory adapters.
pub type LifecycleService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryActivityLog,
    DefaultClock,
>;

/// Workflow service over in-memory adapters.
pub type WorkflowService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryActivityLog, DefaultClock>;

/// Project service over in-memory adapters.
pub type Projects = ProjectService<
    InMemoryProjectRepository,
    InMemoryTaskRepository,
    InMemoryActivityLog,
    DefaultClock,
>;

/// Every service wired to one shared store and log.
pub struct Board {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub project_store: Arc<InMemoryProjectRepository>,
    pub activity: Arc<InMemoryActivityLog>,
    pub lifecycle: LifecycleService,
    pub workflow: WorkflowService,
    pub projects: Projects,
    pub feed: ActivityFeedService<InMemoryActivityLog>,
}

impl Board {
    /// Stores a project directly, leaving the activity log untouched.
    pub async fn project(&self) -> Result<ProjectId, eyre::Report> {
        let draft = ProjectDraft::new(ProjectName::new("Integration board")?);
        let project = Project::new(draft, UserId::new(), &DefaultClock)?;
        self.project_store.store(&project).await?;
        Ok(project.id())
    }
}

/// Provides a freshly wired board.
#[fixture]
pub fn board() -> Board {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let project_store = Arc::new(InMemoryProjectRepository::new());
    let activity = Arc::new(InMemoryActivityLog::new());
    let clock = Arc::new(DefaultClock);
    Board {
        lifecycle: TaskLifecycleService::new(
            Arc::clone(&tasks),
            Arc::clone(&project_store),
            Arc::clone(&activity),
            Arc::clone(&clock),
        ),
        workflow: TaskWorkflowService::new(
            Arc::clone(&tasks),
            Arc::clone(&activity),
            Arc::clone(&clock),
        ),
        projects: ProjectService::new(
            Arc::clone(&project_store),
            Arc::clone(&tasks),
            Arc::clone(&activity),
            clock,
        ),
        feed: ActivityFeedService::from_settings(
            Arc::clone(&activity),
            &ActivitySettings::default(),
        ),
        tasks,
        project_store,
        activity,
    }
}
