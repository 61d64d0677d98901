//! Outcome of evaluating a status move.

use super::TaskStatus;
use crate::actor::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of evaluating a requested status move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// The move may proceed.
    Allowed,
    /// The move is rejected by policy.
    Denied(DenialReason),
}

impl Decision {
    /// Returns `true` when the move may proceed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub const fn denial_reason(self) -> Option<DenialReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(reason),
        }
    }
}

/// Why a status move was rejected.
///
/// These are expected policy outcomes, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// An employee tried to move a task they are not assigned to.
    NotAssigned,
    /// The destination is not reachable from the current status for the role.
    InvalidTransitionForRole,
    /// The role may not move tasks out of the current status at all.
    WrongSourceStateForRole,
}

impl DenialReason {
    /// Returns a stable machine-readable code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotAssigned => "not_assigned",
            Self::InvalidTransitionForRole => "invalid_transition_for_role",
            Self::WrongSourceStateForRole => "wrong_source_state_for_role",
        }
    }

    /// Renders a user-facing explanation for the rejected move.
    #[must_use]
    pub fn explain(self, role: Role, from: TaskStatus, to: TaskStatus) -> String {
        match (self, role) {
            (Self::NotAssigned, _) => "You can only move tasks assigned to you.".to_owned(),
            (Self::WrongSourceStateForRole, Role::Tester) => {
                "Testers can only move tasks that are in 'review'.".to_owned()
            }
            (Self::InvalidTransitionForRole, Role::Tester) => {
                "Testers can only move tasks to 'done' (approve) or 'in-progress' (reject)."
                    .to_owned()
            }
            (Self::InvalidTransitionForRole, Role::Employee) => {
                format!("Employees cannot move tasks from '{from}' to '{to}'.")
            }
            (Self::InvalidTransitionForRole | Self::WrongSourceStateForRole, _) => {
                format!("The {role} role cannot move tasks from '{from}' to '{to}'.")
            }
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
