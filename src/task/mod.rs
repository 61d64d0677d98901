//! Board tasks: storage, moves between columns, and lifecycle operations.
//!
//! Status moves go through [`services::TaskWorkflowService`], which asks
//! [`crate::workflow`] for a decision before persisting anything. Creation,
//! edits, and deletion are admin operations handled by
//! [`services::TaskLifecycleService`]. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
