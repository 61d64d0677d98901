//! Activity log entry and its classification enums.

use super::ActivityId;
use crate::actor::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Kind of mutation an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// A task was created.
    CreatedTask,
    /// Task details or assignees were edited.
    UpdatedTask,
    /// A task changed column or position.
    MovedTask,
    /// A task was deleted.
    DeletedTask,
    /// A project was created.
    CreatedProject,
    /// Project details or status were edited.
    UpdatedProject,
    /// A project and its tasks were deleted.
    DeletedProject,
    /// A user joined a project.
    AddedMember,
}

impl ActivityAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreatedTask => "created_task",
            Self::UpdatedTask => "updated_task",
            Self::MovedTask => "moved_task",
            Self::DeletedTask => "deleted_task",
            Self::CreatedProject => "created_project",
            Self::UpdatedProject => "updated_project",
            Self::DeletedProject => "deleted_project",
            Self::AddedMember => "added_member",
        }
    }
}

impl TryFrom<&str> for ActivityAction {
    type Error = ParseActivityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "created_task" => Ok(Self::CreatedTask),
            "updated_task" => Ok(Self::UpdatedTask),
            "moved_task" => Ok(Self::MovedTask),
            "deleted_task" => Ok(Self::DeletedTask),
            "created_project" => Ok(Self::CreatedProject),
            "updated_project" => Ok(Self::UpdatedProject),
            "deleted_project" => Ok(Self::DeletedProject),
            "added_member" => Ok(Self::AddedMember),
            _ => Err(ParseActivityError::Action(value.to_owned())),
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of entity an entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// A board task.
    Task,
    /// A project grouping tasks.
    Project,
}

impl EntityType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
        }
    }
}

impl TryFrom<&str> for EntityType {
    type Error = ParseActivityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "task" => Ok(Self::Task),
            "project" => Ok(Self::Project),
            _ => Err(ParseActivityError::EntityType(value.to_owned())),
        }
    }
}

/// Error returned while parsing stored activity classifications.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseActivityError {
    /// Unknown action kind.
    #[error("unknown activity action: {0}")]
    Action(String),
    /// Unknown entity type.
    #[error("unknown activity entity type: {0}")]
    EntityType(String),
}

/// Immutable audit record of one mutating action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    id: ActivityId,
    actor: UserId,
    action: ActivityAction,
    entity_type: EntityType,
    entity_id: Uuid,
    details: Value,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActivityData {
    /// Persisted entry identifier.
    pub id: ActivityId,
    /// Persisted acting user.
    pub actor: UserId,
    /// Persisted action kind.
    pub action: ActivityAction,
    /// Persisted entity type.
    pub entity_type: EntityType,
    /// Persisted entity identifier.
    pub entity_id: Uuid,
    /// Persisted JSON details.
    pub details: Value,
    /// Persisted timestamp.
    pub created_at: DateTime<Utc>,
}

impl ActivityLogEntry {
    /// Records a new entry stamped with the current clock time.
    #[must_use]
    pub fn record(
        actor: UserId,
        action: ActivityAction,
        entity_type: EntityType,
        entity_id: Uuid,
        details: Value,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            actor,
            action,
            entity_type,
            entity_id,
            details,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            actor: data.actor,
            action: data.action,
            entity_type: data.entity_type,
            entity_id: data.entity_id,
            details: data.details,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn actor(&self) -> UserId {
        self.actor
    }

    /// Returns the action kind.
    #[must_use]
    pub const fn action(&self) -> ActivityAction {
        self.action
    }

    /// Returns the entity type.
    #[must_use]
    pub const fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Returns the entity identifier.
    #[must_use]
    pub const fn entity_id(&self) -> Uuid {
        self.entity_id
    }

    /// Returns the JSON details payload.
    #[must_use]
    pub const fn details(&self) -> &Value {
        &self.details
    }

    /// Returns when the action happened.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
