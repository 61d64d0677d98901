//! The authenticated actor behind a request.

use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Authenticated user making a request, with the role they act under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from an authenticated user and role.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Creates an admin actor with a fresh identifier.
    #[must_use]
    pub fn admin() -> Self {
        Self::new(UserId::new(), Role::Admin)
    }

    /// Creates an employee actor with a fresh identifier.
    #[must_use]
    pub fn employee() -> Self {
        Self::new(UserId::new(), Role::Employee)
    }

    /// Creates a tester actor with a fresh identifier.
    #[must_use]
    pub fn tester() -> Self {
        Self::new(UserId::new(), Role::Tester)
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the actor's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}
