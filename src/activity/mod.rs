//! Append-only activity log for board mutations.
//!
//! Every mutating task operation records one [`domain::ActivityLogEntry`].
//! Entries are never changed or removed once appended. The module follows
//! the same hexagonal split as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The recent-activity feed in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
