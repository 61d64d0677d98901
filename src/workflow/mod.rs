//! Task status workflow engine.
//!
//! The board has four fixed columns. Whether a task may move between them
//! depends only on the acting role, the current column, and (for employees)
//! whether the actor is assigned to the task. [`evaluate_transition`] is the
//! single authoritative rule table; [`allowed_targets`] derives board hints
//! from it so that no caller keeps a second copy of the rules.
//!
//! The engine is pure. Loading the inputs and applying an allowed move is
//! the job of [`crate::task::services::TaskWorkflowService`].

mod decision;
mod policy;
mod status;

pub use decision::{Decision, DenialReason};
pub use policy::{allowed_targets, evaluate_transition};
pub use status::{ParseTaskStatusError, TaskStatus};

#[cfg(test)]
mod tests;
