//! `PostgreSQL` repository implementation for tasks and assignments.

use super::{
    models::{NewAssigneeRow, NewTaskRow, TaskDetailsChangeset, TaskRow},
    schema::{task_assignees, tasks},
};
use crate::actor::{UserId, unique_users};
use crate::database::PgPool;
use crate::task::{
    domain::{
        PersistedTaskData, Placement, Priority, ProjectId, Task, TaskId, TaskStatus, TaskTitle,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(super) async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task, assignees: &[UserId]) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);
        let assignee_rows = to_assignee_rows(task_id, assignees, task.created_at())?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                diesel::insert_into(tasks::table)
                    .values(&new_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            TaskRepositoryError::DuplicateTask(task_id)
                        }
                        _ => TaskRepositoryError::persistence(err),
                    })?;
                insert_assignees(tx, &assignee_rows)
            })
        })
        .await
    }

    async fn update(
        &self,
        task: &Task,
        assignees: Option<&[UserId]>,
    ) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let changes = to_changeset(task);
        let replacement = assignees
            .map(|users| to_assignee_rows(task_id, users, task.updated_at()))
            .transpose()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                let row = diesel::update(tasks::table.find(task_id.into_inner()))
                    .set(&changes)
                    .returning(TaskRow::as_returning())
                    .get_result::<TaskRow>(tx)
                    .optional()?
                    .ok_or(TaskRepositoryError::NotFound(task_id))?;

                if let Some(rows) = replacement {
                    diesel::delete(
                        task_assignees::table
                            .filter(task_assignees::task_id.eq(task_id.into_inner())),
                    )
                    .execute(tx)?;
                    insert_assignees(tx, &rows)?;
                }
                row_to_task(row)
            })
        })
        .await
    }

    async fn update_placement(
        &self,
        id: TaskId,
        placement: Placement,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set((
                    tasks::status.eq(placement.status.as_str()),
                    tasks::position.eq(placement.position),
                    tasks::updated_at.eq(updated_at),
                ))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::delete(tasks::table.find(id.into_inner()))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            row_to_task(row)
        })
        .await
    }

    async fn delete_by_project(&self, project_id: ProjectId) -> TaskRepositoryResult<usize> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(
                tasks::table.filter(tasks::project_id.eq(project_id.into_inner())),
            )
            .execute(connection)?;
            Ok(removed)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn is_assignee(&self, task_id: TaskId, user_id: UserId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let assigned = diesel::select(diesel::dsl::exists(
                task_assignees::table
                    .filter(task_assignees::task_id.eq(task_id.into_inner()))
                    .filter(task_assignees::user_id.eq(user_id.into_inner())),
            ))
            .get_result::<bool>(connection)?;
            Ok(assigned)
        })
        .await
    }

    async fn assignees(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<UserId>> {
        self.run_blocking(move |connection| {
            let users = task_assignees::table
                .filter(task_assignees::task_id.eq(task_id.into_inner()))
                .order(task_assignees::ordinal.asc())
                .select(task_assignees::user_id)
                .load::<Uuid>(connection)?;
            Ok(users.into_iter().map(UserId::from_uuid).collect())
        })
        .await
    }

    async fn find_by_project(
        &self,
        project_id: ProjectId,
        scope: TaskScope,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let project_tasks = tasks::table
                .filter(tasks::project_id.eq(project_id.into_inner()))
                .order((tasks::position.asc(), tasks::created_at.desc()))
                .select(TaskRow::as_select());
            let rows = match scope {
                TaskScope::All => project_tasks.load::<TaskRow>(connection)?,
                TaskScope::AssignedTo(user_id) => project_tasks
                    .filter(
                        tasks::id.eq_any(
                            task_assignees::table
                                .filter(task_assignees::user_id.eq(user_id.into_inner()))
                                .select(task_assignees::task_id),
                        ),
                    )
                    .load::<TaskRow>(connection)?,
            };
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .inner_join(task_assignees::table)
                .filter(task_assignees::user_id.eq(user_id.into_inner()))
                .order((tasks::due_date.asc().nulls_last(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .order((tasks::updated_at.desc(), tasks::created_at.asc()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

fn insert_assignees(tx: &mut PgConnection, rows: &[NewAssigneeRow]) -> TaskRepositoryResult<()> {
    if rows.is_empty() {
        return Ok(());
    }
    diesel::insert_into(task_assignees::table)
        .values(rows)
        .execute(tx)?;
    Ok(())
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        project_id: task.project_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        position: task.position(),
        created_by: task.created_by().into_inner(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskDetailsChangeset {
    TaskDetailsChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        due_date: task.due_date(),
        updated_at: task.updated_at(),
    }
}

fn to_assignee_rows(
    task_id: TaskId,
    assignees: &[UserId],
    assigned_at: DateTime<Utc>,
) -> TaskRepositoryResult<Vec<NewAssigneeRow>> {
    unique_users(assignees)
        .into_iter()
        .enumerate()
        .map(|(index, user_id)| {
            let ordinal = i32::try_from(index).map_err(TaskRepositoryError::persistence)?;
            Ok(NewAssigneeRow {
                task_id: task_id.into_inner(),
                user_id: user_id.into_inner(),
                ordinal,
                assigned_at,
            })
        })
        .collect()
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        project_id,
        title,
        description,
        priority,
        status,
        position,
        created_by,
        due_date,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        project_id: ProjectId::from_uuid(project_id),
        title: TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?,
        description,
        priority: Priority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        placement: Placement::new(
            TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
            position,
        ),
        created_by: UserId::from_uuid(created_by),
        due_date,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
