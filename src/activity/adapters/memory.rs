//! In-memory activity log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::activity::{
    domain::{ActivityLogEntry, EntityType},
    ports::{ActivityLog, ActivityLogError, ActivityLogResult},
};

/// Thread-safe in-memory activity log. Entries are kept in append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivityLog {
    entries: Arc<RwLock<Vec<ActivityLogEntry>>>,
}

impl InMemoryActivityLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every entry in append order.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityLogError::Persistence`] if the lock is poisoned.
    pub fn entries(&self) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.clone())
    }
}

#[async_trait]
impl ActivityLog for InMemoryActivityLog {
    async fn append(&self, entry: &ActivityLogEntry) -> ActivityLogResult<()> {
        let mut entries = self.entries.write().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(ActivityLogError::DuplicateEntry(entry.id()));
        }
        entries.push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }

    async fn for_entity(
        &self,
        entity_type: EntityType,
        entity_id: Uuid,
    ) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.entries.read().map_err(|err| {
            ActivityLogError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(entries
            .iter()
            .filter(|entry| entry.entity_type() == entity_type && entry.entity_id() == entity_id)
            .cloned()
            .collect())
    }
}
