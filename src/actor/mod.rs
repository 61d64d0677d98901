//! Authenticated actors and their board roles.
//!
//! Actors are supplied by the outer authentication layer. The crate only
//! reads them: a role is fixed for the duration of any workflow decision.

mod identity;
mod ids;
mod role;

pub use identity::Actor;
pub use ids::UserId;
pub(crate) use ids::unique_users;
pub use role::{ParseRoleError, Role};
