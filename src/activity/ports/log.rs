//! Append-only activity log port.

use crate::activity::domain::{ActivityId, ActivityLogEntry, EntityType};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Result type for activity log operations.
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Activity log persistence contract.
///
/// Implementations only ever add entries.
#[async_trait]
pub trait ActivityLog: Send + Sync {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::DuplicateEntry`] when the entry ID already
    /// exists.
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()>;

    /// Returns up to `limit` entries, newest first.
    async fn recent(&self, limit: usize) -> ActivityLogResult<Vec<ActivityLogEntry>>;

    /// Returns every entry about one entity, oldest first.
    async fn for_entity(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>>;
}

/// Errors returned by activity log implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivityLogError {
    /// An entry with the same identifier already exists.
    #[error("duplicate activity entry: {0}")]
    DuplicateEntry(ActivityId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivityLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
