//! In-memory task adapters.

mod comment;
mod task;

pub use task::InMemoryTaskRepository;
