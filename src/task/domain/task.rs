//! Task aggregate root and related board placement types.

use super::{Priority, ProjectId, TaskId, TaskStatus, TaskTitle};
use crate::actor::UserId;
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Where a task sits on the board: its column and its order inside it.
///
/// Positions only need to sort; gaps and ties are allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Board column.
    pub status: TaskStatus,
    /// Ordering key within the column.
    pub position: i64,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(status: TaskStatus, position: i64) -> Self {
        Self { status, position }
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Owning project.
    pub project_id: ProjectId,
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Priority level.
    pub priority: Priority,
    /// Initial placement on the board.
    pub placement: Placement,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Creates a draft in `todo` at position 0 with medium priority.
    #[must_use]
    pub fn new(project_id: ProjectId, title: TaskTitle) -> Self {
        Self {
            project_id,
            title,
            description: None,
            priority: Priority::default(),
            placement: Placement::default(),
            due_date: None,
        }
    }
}

/// Partial edit of task details. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement due date.
    pub due_date: Option<NaiveDate>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    title: TaskTitle,
    description: Option<String>,
    priority: Priority,
    placement: Placement,
    created_by: UserId,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning project.
    pub project_id: ProjectId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted board placement.
    pub placement: Placement,
    /// Persisted creator.
    pub created_by: UserId,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a validated draft.
    #[must_use]
    pub fn new(draft: TaskDraft, created_by: UserId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            project_id: draft.project_id,
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            placement: draft.placement,
            created_by,
            due_date: draft.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            placement: data.placement,
            created_by: data.created_by,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the board placement.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Returns the board column.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.placement.status
    }

    /// Returns the ordering key within the column.
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.placement.position
    }

    /// Returns the user who created the task.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
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

    /// Moves the task to a new placement.
    ///
    /// No policy is checked here; callers evaluate the move first.
    pub fn place(&mut self, placement: Placement, clock: &impl Clock) {
        self.place_at(placement, clock.utc());
    }

    /// Moves the task to a new placement with an explicit update timestamp.
    ///
    /// Used by stores that receive the timestamp alongside the placement.
    pub fn place_at(&mut self, placement: Placement, updated_at: DateTime<Utc>) {
        self.placement = placement;
        self.updated_at = updated_at;
    }

    /// Applies a partial detail edit.
    pub fn apply_edit(&mut self, edit: TaskEdit, clock: &impl Clock) {
        let TaskEdit {
            title,
            description,
            priority,
            due_date,
        } = edit;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if description.is_some() {
            self.description = description;
        }
        if let Some(new_priority) = priority {
            self.priority = new_priority;
        }
        if due_date.is_some() {
            self.due_date = due_date;
        }
        self.touch(clock);
    }

    /// Copies the editable details and update timestamp of `edited` onto
    /// this task. The placement stays as it is.
    pub(crate) fn merge_details(&mut self, edited: &Self) {
        self.title.clone_from(&edited.title);
        self.description.clone_from(&edited.description);
        self.priority = edited.priority;
        self.due_date = edited.due_date;
        self.updated_at = edited.updated_at;
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
