//! Projects: the containers board tasks belong to.
//!
//! Admins create, edit and delete projects and decide who is a member.
//! Employees only see the projects they are members of. Assigning a user to
//! a task makes them a member of the task's project. The module follows
//! the same hexagonal split as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
