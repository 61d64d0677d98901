//! `PostgreSQL` repository implementation for projects and memberships.

use super::{
    models::{NewMemberRow, NewProjectRow, ProjectChangeset, ProjectRow},
    schema::{project_members, projects},
};
use crate::actor::{UserId, unique_users};
use crate::database::PgPool;
use crate::project::{
    domain::{PersistedProjectData, Project, ProjectId, ProjectName, ProjectStatus},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult, ProjectScope},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

impl From<DieselError> for ProjectRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let new_row = to_new_row(project);
        self.run_blocking(move |connection| {
            diesel::insert_into(projects::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ProjectRepositoryError::DuplicateProject(project_id)
                    }
                    _ => ProjectRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let project_id = project.id();
        let changes = to_changeset(project);
        self.run_blocking(move |connection| {
            let updated = diesel::update(projects::table.find(project_id.into_inner()))
                .set(&changes)
                .execute(connection)?;
            if updated == 0 {
                return Err(ProjectRepositoryError::NotFound(project_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<Project> {
        self.run_blocking(move |connection| {
            let row = diesel::delete(projects::table.find(id.into_inner()))
                .returning(ProjectRow::as_returning())
                .get_result::<ProjectRow>(connection)
                .optional()?
                .ok_or(ProjectRepositoryError::NotFound(id))?;
            row_to_project(row)
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn list(&self, scope: ProjectScope) -> ProjectRepositoryResult<Vec<Project>> {
        self.run_blocking(move |connection| {
            let ordered = projects::table
                .order((projects::created_at.desc(), projects::id.asc()))
                .select(ProjectRow::as_select());
            let rows = match scope {
                ProjectScope::All => ordered.load::<ProjectRow>(connection)?,
                ProjectScope::MemberOf(user_id) => ordered
                    .filter(
                        projects::id.eq_any(
                            project_members::table
                                .filter(project_members::user_id.eq(user_id.into_inner()))
                                .select(project_members::project_id),
                        ),
                    )
                    .load::<ProjectRow>(connection)?,
            };
            rows.into_iter().map(row_to_project).collect()
        })
        .await
    }

    async fn add_members(
        &self,
        id: ProjectId,
        users: &[UserId],
    ) -> ProjectRepositoryResult<usize> {
        let rows: Vec<NewMemberRow> = unique_users(users)
            .into_iter()
            .map(|user_id| NewMemberRow {
                project_id: id.into_inner(),
                user_id: user_id.into_inner(),
            })
            .collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, ProjectRepositoryError, _>(|tx| {
                let exists = diesel::select(diesel::dsl::exists(
                    projects::table.find(id.into_inner()),
                ))
                .get_result::<bool>(tx)?;
                if !exists {
                    return Err(ProjectRepositoryError::NotFound(id));
                }
                if rows.is_empty() {
                    return Ok(0);
                }
                let added = diesel::insert_into(project_members::table)
                    .values(&rows)
                    .on_conflict_do_nothing()
                    .execute(tx)?;
                Ok(added)
            })
        })
        .await
    }

    async fn is_member(&self, id: ProjectId, user_id: UserId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let member = diesel::select(diesel::dsl::exists(
                project_members::table
                    .filter(project_members::project_id.eq(id.into_inner()))
                    .filter(project_members::user_id.eq(user_id.into_inner())),
            ))
            .get_result::<bool>(connection)?;
            Ok(member)
        })
        .await
    }

    async fn members(&self, id: ProjectId) -> ProjectRepositoryResult<Vec<UserId>> {
        self.run_blocking(move |connection| {
            let users = project_members::table
                .filter(project_members::project_id.eq(id.into_inner()))
                .order(project_members::seq.asc())
                .select(project_members::user_id)
                .load::<Uuid>(connection)?;
            Ok(users.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }
}

fn to_new_row(project: &Project) -> NewProjectRow {
    NewProjectRow {
        id: project.id().into_inner(),
        name: project.name().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        status: project.status().as_str().to_owned(),
        start_date: project.start_date(),
        end_date: project.end_date(),
        created_by: project.created_by().into_inner(),
        created_at: project.created_at(),
        updated_at: project.updated_at(),
    }
}

fn to_changeset(project: &Project) -> ProjectChangeset {
    ProjectChangeset {
        name: project.name().as_str().to_owned(),
        description: project.description().map(str::to_owned),
        status: project.status().as_str().to_owned(),
        start_date: project.start_date(),
        end_date: project.end_date(),
        updated_at: project.updated_at(),
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let ProjectRow {
        id,
        name,
        description,
        status,
        start_date,
        end_date,
        created_by,
        created_at,
        updated_at,
    } = row;

    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::from_uuid(id),
        name: ProjectName::new(name).map_err(ProjectRepositoryError::persistence)?,
        description,
        status: ProjectStatus::try_from(status.as_str())
            .map_err(ProjectRepositoryError::persistence)?,
        start_date,
        end_date,
        created_by: UserId::from_uuid(created_by),
        created_at,
        updated_at,
    }))
}
