//! Domain model for activity log entries.

mod entry;
mod ids;

pub use entry::{
    ActivityAction, ActivityLogEntry, EntityType, ParseActivityError, PersistedActivityData,
};
pub use ids::ActivityId;
