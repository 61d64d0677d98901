//! Error types for project validation and parsing.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or editing projects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyName,

    /// The status value is not `active` or `completed`.
    #[error("unknown project status: {0}")]
    InvalidStatus(String),

    /// The end date falls before the start date.
    #[error("project ends on {end} before it starts on {start}")]
    EndsBeforeStart {
        /// Start of the schedule.
        start: NaiveDate,
        /// Requested end of the schedule.
        end: NaiveDate,
    },
}
