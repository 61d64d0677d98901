//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The priority value is not one of `low`, `medium`, `high`.
    #[error("unknown task priority: {0}")]
    InvalidPriority(String),

    /// A comment has no content after trimming.
    #[error("comment must not be empty")]
    EmptyComment,
}
