//! Application services for task orchestration.
//!
//! [`TaskWorkflowService`] applies status moves approved by the workflow
//! engine. [`TaskLifecycleService`] covers admin-only creation, edits and
//! deletion, comments, and role-scoped listings. Both record one activity
//! entry per committed board mutation.

mod lifecycle;
mod workflow;

pub use lifecycle::{
    CreateTaskRequest, LifecycleError, LifecycleResult, TaskLifecycleService, UpdateTaskRequest,
};
pub use workflow::{
    MoveDetails, MoveTaskError, MoveTaskRequest, MoveTaskResult, TaskWorkflowService,
};
