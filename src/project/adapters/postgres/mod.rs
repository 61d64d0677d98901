//! `PostgreSQL` adapter for projects and memberships.

mod models;
mod repository;
mod schema;

pub use repository::PostgresProjectRepository;
