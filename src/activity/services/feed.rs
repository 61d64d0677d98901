//! Recent-activity feed for dashboards.

use crate::activity::{
    domain::ActivityLogEntry,
    ports::{ActivityLog, ActivityLogResult},
};
use crate::settings::ActivitySettings;
use std::sync::Arc;

/// Serves the newest activity entries, capped at a configured size.
#[derive(Clone)]
pub struct ActivityFeedService<L>
where
    L: ActivityLog,
{
    log: Arc<L>,
    limit: usize,
}

impl<L> ActivityFeedService<L>
where
    L: ActivityLog,
{
    /// Creates a feed returning at most `limit` entries.
    #[must_use]
    pub const fn new(log: Arc<L>, limit: usize) -> Self {
        Self { log, limit }
    }

    /// Creates a feed sized by [`ActivitySettings::feed_limit`].
    #[must_use]
    pub const fn from_settings(log: Arc<L>, settings: &ActivitySettings) -> Self {
        Self::new(log, settings.feed_limit)
    }

    /// Returns the configured page size.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the newest entries first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::activity::ports::ActivityLogError`] when the log
    /// cannot be read.
    pub async fn recent(&self) -> ActivityLogResult<Vec<ActivityLogEntry>> {
        let entries = self.log.recent(self.limit).await?;
        tracing::debug!(count = entries.len(), limit = self.limit, "loaded activity feed");
        Ok(entries)
    }
}
