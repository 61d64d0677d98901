//! Domain model for projects.
//!
//! A project groups board tasks and records which users are members of it.
//! Membership decides which projects an employee can list.

mod error;
mod ids;
mod project;
mod status;

pub use error::ProjectDomainError;
pub use ids::{ProjectId, ProjectName};
pub use project::{PersistedProjectData, Project, ProjectDraft, ProjectEdit};
pub use status::ProjectStatus;
