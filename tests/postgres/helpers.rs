//! Shared helpers for `PostgreSQL` integration tests.

#![expect(
    clippy::print_stderr,
    reason = "Test cleanup warnings are informational"
)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use pg_embedded_setup_unpriv::TestCluster;
use taskboard::{
    actor::UserId,
    database::PgPool,
    project::{
        adapters::postgres::PostgresProjectRepository,
        domain::{PersistedProjectData, Project, ProjectId, ProjectName, ProjectStatus},
        ports::ProjectRepository,
    },
    task::domain::{PersistedTaskData, Placement, Priority, Task, TaskId, TaskStatus, TaskTitle},
};
use tokio::runtime::Runtime;

/// Boxed error used by setup helpers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// SQL creating every board table.
const BOARD_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// Template database name for the pre-migrated schema.
const TEMPLATE_DB: &str = "taskboard_test_template";

/// Creates a tokio runtime for async operations in tests.
pub fn test_runtime() -> Result<Runtime, BoxError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| Box::new(err) as BoxError)
}

/// Ensures the template database exists with the schema applied.
fn ensure_template(cluster: &TestCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, |db_name| {
            let url = cluster.connection().database_url(db_name);
            let mut conn = PgConnection::establish(&url).map_err(|err| eyre::eyre!("{err}"))?;
            execute_sql_statements(&mut conn, BOARD_SCHEMA_SQL)?;
            Ok(())
        })
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok(())
}

/// Executes each `;`-separated statement of a migration file.
fn execute_sql_statements(conn: &mut PgConnection, sql: &str) -> eyre::Result<()> {
    for statement in sql.split(';') {
        let trimmed = statement.trim();
        if trimmed.is_empty() || trimmed.lines().all(|line| line.trim().starts_with("--")) {
            continue;
        }
        diesel::sql_query(trimmed)
            .execute(conn)
            .map_err(|err| eyre::eyre!("SQL error: {err}\nStatement: {trimmed}"))?;
    }
    Ok(())
}

/// Guard that drops the per-test database even if the test panics.
pub struct CleanupGuard<'a> {
    cluster: &'a TestCluster,
    db_name: String,
}

impl Drop for CleanupGuard<'_> {
    fn drop(&mut self) {
        if let Err(err) = self.cluster.drop_database(self.db_name.as_str()) {
            eprintln!("Warning: failed to drop test database {}: {err}", self.db_name);
        }
    }
}

/// Creates a migrated database from the template and a single-connection
/// pool for it.
///
/// # Errors
///
/// Returns an error when template creation, cloning, or pooling fails.
pub fn fresh_database<'a>(
    cluster: &'a TestCluster,
    prefix: &str,
) -> Result<(CleanupGuard<'a>, PgPool), BoxError> {
    ensure_template(cluster)?;
    let db_name = format!("{prefix}_{}", uuid::Uuid::new_v4().simple());
    cluster
        .create_database_from_template(db_name.as_str(), TEMPLATE_DB)
        .map_err(|err| Box::new(err) as BoxError)?;
    let guard = CleanupGuard {
        cluster,
        db_name: db_name.clone(),
    };

    let url = cluster.connection().database_url(&db_name);
    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|err| Box::new(err) as BoxError)?;
    Ok((guard, pool))
}

/// Fixed reference instant for ordering assertions.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// Builds a project created `minutes` after [`epoch`].
///
/// # Errors
///
/// Returns an error when the name is blank.
pub fn project_at(name: &str, minutes: i64) -> Result<Project, BoxError> {
    let created_at = epoch() + Duration::minutes(minutes);
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(),
        name: ProjectName::new(name)?,
        description: None,
        status: ProjectStatus::Active,
        start_date: None,
        end_date: None,
        created_by: UserId::new(),
        created_at,
        updated_at: created_at,
    }))
}

/// Stores a fresh project so tasks can reference it.
///
/// # Errors
///
/// Returns an error when the insert fails.
pub async fn seed_project(pool: &PgPool) -> Result<ProjectId, BoxError> {
    let project = project_at("Integration board", 0)?;
    PostgresProjectRepository::new(pool.clone())
        .store(&project)
        .await?;
    Ok(project.id())
}

/// Builder for tasks with explicit timestamps.
pub struct TaskSeed {
    data: PersistedTaskData,
}

impl TaskSeed {
    /// Starts a `todo` task at position 0 created at [`epoch`].
    ///
    /// # Errors
    ///
    /// Returns an error when the title is blank.
    pub fn new(project_id: ProjectId, title: &str) -> Result<Self, BoxError> {
        Ok(Self {
            data: PersistedTaskData {
                id: TaskId::new(),
                project_id,
                title: TaskTitle::new(title)?,
                description: None,
                priority: Priority::Medium,
                placement: Placement::default(),
                created_by: UserId::new(),
                due_date: None,
                created_at: epoch(),
                updated_at: epoch(),
            },
        })
    }

    /// Places the task in a column.
    #[must_use]
    pub const fn at(mut self, status: TaskStatus, position: i64) -> Self {
        self.data.placement = Placement::new(status, position);
        self
    }

    /// Sets creation and update time `minutes` after [`epoch`].
    #[must_use]
    pub fn created(mut self, minutes: i64) -> Self {
        self.data.created_at = epoch() + Duration::minutes(minutes);
        self.data.updated_at = self.data.created_at;
        self
    }

    /// Sets the update time `minutes` after [`epoch`].
    #[must_use]
    pub fn updated(mut self, minutes: i64) -> Self {
        self.data.updated_at = epoch() + Duration::minutes(minutes);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub fn due(mut self, date: chrono::NaiveDate) -> Self {
        self.data.due_date = Some(date);
        self
    }

    /// Builds the task.
    #[must_use]
    pub fn build(self) -> Task {
        Task::from_persisted(self.data)
    }
}
