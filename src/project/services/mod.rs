//! Application services for projects.
//!
//! [`ProjectService`] covers admin-only creation, edits, deletion and
//! membership plus the role-scoped project listing.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, ProjectError, ProjectOverview, ProjectResult, ProjectService,
    UpdateProjectRequest,
};
