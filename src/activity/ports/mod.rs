//! Port contracts for the activity log.

pub mod log;

pub use log::{ActivityLog, ActivityLogError, ActivityLogResult};
