//! Per-role transition rules.

use super::{Decision, DenialReason, TaskStatus};
use crate::actor::Role;

/// Decides whether `role` may move a task from `current` to `requested`.
///
/// `is_actor_assigned` is only consulted for [`Role::Employee`].
///
/// - A same-status request is always allowed, so tasks can be re-ordered
///   within a column. The one exception is an unassigned employee, who is
///   refused before any status is considered.
/// - Employees move assigned tasks one column forward, never out of
///   `review` or `done`.
/// - Testers only act on tasks in `review`, approving to `done` or
///   rejecting back to `in-progress`.
/// - Admins may make any move.
#[must_use]
pub fn evaluate_transition(
    current: TaskStatus,
    requested: TaskStatus,
    role: Role,
    is_actor_assigned: bool,
) -> Decision {
    match role {
        Role::Admin => Decision::Allowed,
        Role::Employee => evaluate_employee(current, requested, is_actor_assigned),
        Role::Tester => evaluate_tester(current, requested),
    }
}

/// Returns the statuses, in column order, that `role` may move a task to
/// from `current`. The current status itself is never listed.
#[must_use]
pub fn allowed_targets(
    current: TaskStatus,
    role: Role,
    is_actor_assigned: bool,
) -> Vec<TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .filter(|target| *target != current)
        .filter(|target| {
            evaluate_transition(current, *target, role, is_actor_assigned).is_allowed()
        })
        .collect()
}

fn evaluate_employee(
    current: TaskStatus,
    requested: TaskStatus,
    is_actor_assigned: bool,
) -> Decision {
    if !is_actor_assigned {
        return Decision::Denied(DenialReason::NotAssigned);
    }
    if current == requested || employee_successor(current) == Some(requested) {
        return Decision::Allowed;
    }
    Decision::Denied(DenialReason::InvalidTransitionForRole)
}

fn evaluate_tester(current: TaskStatus, requested: TaskStatus) -> Decision {
    if current == requested {
        return Decision::Allowed;
    }
    match (current, requested) {
        (TaskStatus::Review, TaskStatus::Done | TaskStatus::InProgress) => Decision::Allowed,
        (TaskStatus::Review, TaskStatus::Todo | TaskStatus::Review) => {
            Decision::Denied(DenialReason::InvalidTransitionForRole)
        }
        (TaskStatus::Todo | TaskStatus::InProgress | TaskStatus::Done, _) => {
            Decision::Denied(DenialReason::WrongSourceStateForRole)
        }
    }
}

/// Forward-only adjacency for employees.
const fn employee_successor(current: TaskStatus) -> Option<TaskStatus> {
    match current {
        TaskStatus::Todo => Some(TaskStatus::InProgress),
        TaskStatus::InProgress => Some(TaskStatus::Review),
        TaskStatus::Review | TaskStatus::Done => None,
    }
}
