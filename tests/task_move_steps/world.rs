//! Shared world state for board move BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    activity::adapters::memory::InMemoryActivityLog,
    actor::Actor,
    project::{
        adapters::memory::InMemoryProjectRepository,
        domain::{Project, ProjectDraft, ProjectId, ProjectName},
        ports::ProjectRepository,
    },
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{MoveTaskError, TaskLifecycleService, TaskWorkflowService},
    },
};

/// Lifecycle service type used by the BDD world.
pub type TestLifecycleService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryActivityLog,
    DefaultClock,
>;

/// Workflow service type used by the BDD world.
pub type TestWorkflowService =
    TaskWorkflowService<InMemoryTaskRepository, InMemoryActivityLog, DefaultClock>;

/// Scenario world for board move behaviour tests.
pub struct BoardWorld {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub activity: Arc<InMemoryActivityLog>,
    pub lifecycle: TestLifecycleService,
    pub workflow: TestWorkflowService,
    pub admin: Actor,
    pub actor: Option<Actor>,
    pub task: Option<Task>,
    pub last_move: Option<Result<Task, MoveTaskError>>,
}

impl BoardWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let activity = Arc::new(InMemoryActivityLog::new());
        let clock = Arc::new(DefaultClock);
        Self {
            lifecycle: TaskLifecycleService::new(
                Arc::clone(&tasks),
                Arc::clone(&projects),
                Arc::clone(&activity),
                Arc::clone(&clock),
            ),
            workflow: TaskWorkflowService::new(Arc::clone(&tasks), Arc::clone(&activity), clock),
            tasks,
            projects,
            activity,
            admin: Actor::admin(),
            actor: None,
            task: None,
            last_move: None,
        }
    }

    /// Stores a project for scenario tasks to live in.
    ///
    /// # Errors
    ///
    /// Returns an error when the project cannot be stored.
    pub fn create_project(&self) -> Result<ProjectId, eyre::Report> {
        let draft = ProjectDraft::new(ProjectName::new("Scenario board")?);
        let project = Project::new(draft, self.admin.id(), &DefaultClock)?;
        run_async(self.projects.store(&project))?;
        Ok(project.id())
    }

    /// Returns the task under test.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was set up.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
