//! Port contracts for task persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod comments;
pub mod repository;

pub use comments::TaskCommentRepository;
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, TaskScope};
