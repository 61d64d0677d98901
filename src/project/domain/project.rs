//! Project aggregate root.

use super::{ProjectDomainError, ProjectId, ProjectName, ProjectStatus};
use crate::actor::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated input for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    /// Project name.
    pub name: ProjectName,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Optional planned start.
    pub start_date: Option<NaiveDate>,
    /// Optional planned end.
    pub end_date: Option<NaiveDate>,
}

impl ProjectDraft {
    /// Creates a draft with no description or schedule.
    #[must_use]
    pub const fn new(name: ProjectName) -> Self {
        Self {
            name,
            description: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// Partial edit of a project. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEdit {
    /// Replacement name.
    pub name: Option<ProjectName>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status.
    pub status: Option<ProjectStatus>,
    /// Replacement start date.
    pub start_date: Option<NaiveDate>,
    /// Replacement end date.
    pub end_date: Option<NaiveDate>,
}

/// Project aggregate root. Tasks refer to it by [`ProjectId`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: Option<String>,
    status: ProjectStatus,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted identifier.
    pub id: ProjectId,
    /// Persisted name.
    pub name: ProjectName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: ProjectStatus,
    /// Persisted start date.
    pub start_date: Option<NaiveDate>,
    /// Persisted end date.
    pub end_date: Option<NaiveDate>,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates an active project from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EndsBeforeStart`] when the schedule is
    /// inverted.
    pub fn new(
        draft: ProjectDraft,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, ProjectDomainError> {
        check_schedule(draft.start_date, draft.end_date)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            name: draft.name,
            description: draft.description,
            status: ProjectStatus::default(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            status: data.status,
            start_date: data.start_date,
            end_date: data.end_date,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the name.
    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the progress status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the planned start, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    /// Returns the planned end, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// Returns the user who created the project.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial edit.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EndsBeforeStart`] when the resulting
    /// schedule is inverted; the project is left unchanged.
    pub fn apply_edit(
        &mut self,
        edit: ProjectEdit,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        let ProjectEdit {
            name,
            description,
            status,
            start_date,
            end_date,
        } = edit;
        let next_start = start_date.or(self.start_date);
        let next_end = end_date.or(self.end_date);
        check_schedule(next_start, next_end)?;

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(new_status) = status {
            self.status = new_status;
        }
        self.start_date = next_start;
        self.end_date = next_end;
        self.updated_at = clock.utc();
        Ok(())
    }
}

fn check_schedule(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<(), ProjectDomainError> {
    match (start, end) {
        (Some(start_day), Some(end_day)) if end_day < start_day => {
            Err(ProjectDomainError::EndsBeforeStart {
                start: start_day,
                end: end_day,
            })
        }
        _ => Ok(()),
    }
}
