//! `PostgreSQL` adapters for task, assignment, and comment persistence.

mod comments;
mod models;
mod repository;
mod schema;

pub use repository::PostgresTaskRepository;
