//! Taskboard: a role-aware Kanban task tracking backend.
//!
//! Tasks move between the `todo`, `in-progress`, `review`, and `done`
//! columns. Who may move what is decided by a single workflow engine that
//! looks at the actor's role, the task's current column, and whether the
//! actor is assigned to it. Every mutation leaves an entry in an
//! append-only activity log.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//!
//! # Modules
//!
//! - [`actor`]: Authenticated users and their roles
//! - [`workflow`]: Status transition rules
//! - [`project`]: Projects and their members
//! - [`task`]: Task storage, board moves, comments, and lifecycle operations
//! - [`activity`]: Audit log and recent-activity feed
//! - [`settings`], [`database`], [`telemetry`]: Runtime wiring

pub mod activity;
pub mod actor;
pub mod database;
pub mod project;
pub mod settings;
pub mod task;
pub mod telemetry;
pub mod workflow;
