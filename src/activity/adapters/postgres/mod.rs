//! `PostgreSQL` adapter for the activity log.

mod log;
mod models;
mod schema;

pub use log::PostgresActivityLog;
