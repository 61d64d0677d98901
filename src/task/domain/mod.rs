//! Domain model for board tasks.
//!
//! A task sits in exactly one column at a position within it. Assignment
//! and status rules live outside the aggregate: the aggregate only records
//! the placement it is given, after [`crate::workflow`] has approved it.

mod comment;
mod error;
mod ids;
mod priority;
mod task;

pub use comment::{CommentId, PersistedCommentData, TaskComment};
pub use error::TaskDomainError;
pub use ids::{TaskId, TaskTitle};
pub use priority::Priority;
pub use task::{PersistedTaskData, Placement, Task, TaskDraft, TaskEdit};

pub use crate::project::domain::ProjectId;
pub use crate::workflow::{ParseTaskStatusError, TaskStatus};
