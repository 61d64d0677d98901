//! `PostgreSQL` implementation of the activity log port.

use super::{
    models::{ActivityRow, NewActivityRow},
    schema::activity_logs,
};
use crate::activity::{
    domain::{
        ActivityAction, ActivityId, ActivityLogEntry, EntityType, PersistedActivityData,
    },
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};
use crate::actor::UserId;
use crate::database::PgPool;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL`-backed activity log. Rows are only ever inserted.
#[derive(Debug, Clone)]
pub struct PostgresActivityLog {
    pool: PgPool,
}

impl PostgresActivityLog {
    /// Creates a new log from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ActivityLogResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ActivityLogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ActivityLogError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ActivityLogError::persistence)?
    }
}

#[async_trait]
impl ActivityLog for PostgresActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        let entry_id = entry.id();
        let new_row = NewActivityRow {
            id: entry_id.into_inner(),
            actor_id: entry.actor().into_inner(),
            action: entry.action().as_str().to_owned(),
            entity_type: entry.entity_type().as_str().to_owned(),
            entity_id: entry.entity_id(),
            details: entry.details().clone(),
            created_at: entry.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(activity_logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        ActivityLogError::DuplicateEntry(entry_id)
                    }
                    _ => ActivityLogError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn recent(&self, limit: usize) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let page_size = i64::try_from(limit).map_err(ActivityLogError::persistence)?;
        self.run_blocking(move |connection| {
            let rows = activity_logs::table
                .order((activity_logs::created_at.desc(), activity_logs::id.desc()))
                .limit(page_size)
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityLogError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }

    async fn for_entity(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        self.run_blocking(move |connection| {
            let rows = activity_logs::table
                .filter(activity_logs::entity_type.eq(entity_type.as_str()))
                .filter(activity_logs::entity_id.eq(entity_id))
                .order(activity_logs::created_at.asc())
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(ActivityLogError::persistence)?;
            rows.into_iter().map(row_to_entry).collect()
        })
        .await
    }
}

fn row_to_entry(row: ActivityRow) -> ActivityLogResult<ActivityLogEntry> {
    let action =
        ActivityAction::try_from(row.action.as_str()).map_err(ActivityLogError::persistence)?;
    let entity_type =
        EntityType::try_from(row.entity_type.as_str()).map_err(ActivityLogError::persistence)?;

    Ok(ActivityLogEntry::from_persisted(PersistedActivityData {
        id: ActivityId::from_uuid(row.id),
        actor: UserId::from_uuid(row.actor_id),
        action,
        entity_type,
        entity_id: row.entity_id,
        details: row.details,
        created_at: row.created_at,
    }))
}
