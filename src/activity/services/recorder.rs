//! Activity recording shared by the board services.

use crate::activity::{
    domain::{ActivityAction, ActivityLogEntry, EntityType},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};
use crate::actor::Actor;
use mockable::Clock;
use serde::Serialize;
use uuid::Uuid;

/// What an activity entry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Subject {
    pub(crate) entity_type: EntityType,
    pub(crate) entity_id: Uuid,
}

impl Subject {
    pub(crate) const fn task(task_id: crate::task::domain::TaskId) -> Self {
        Self {
            entity_type: EntityType::Task,
            entity_id: task_id.into_inner(),
        }
    }

    pub(crate) const fn project(project_id: crate::project::domain::ProjectId) -> Self {
        Self {
            entity_type: EntityType::Project,
            entity_id: project_id.into_inner(),
        }
    }
}

/// Appends one activity entry for `actor`.
pub(crate) async fn record_activity<L, C>(
    log: &L,
    clock: &C,
    actor: &Actor,
    action: ActivityAction,
    subject: Subject,
    details: &impl Serialize,
) -> ActivityLogResult<()>
where
    L: ActivityLog + ?Sized,
    C: Clock,
{
    let payload = serde_json::to_value(details).map_err(ActivityLogError::persistence)?;
    let entry = ActivityLogEntry::record(
        actor.id(),
        action,
        subject.entity_type,
        subject.entity_id,
        payload,
        clock,
    );
    log.append(&entry).await.inspect_err(|err| {
        tracing::warn!(
            entity_type = subject.entity_type.as_str(),
            entity_id = %subject.entity_id,
            action = %action,
            error = %err,
            "failed to append activity entry"
        );
    })
}
