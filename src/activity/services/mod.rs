//! Application services over the activity log.

mod feed;
mod recorder;

pub use feed::ActivityFeedService;
pub(crate) use recorder::{Subject, record_activity};
