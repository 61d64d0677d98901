//! Adapter implementations of the task repository and comment ports.

pub mod memory;
pub mod postgres;
