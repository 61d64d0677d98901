//! Step definitions for board move scenarios.

pub mod then;
pub mod when;
pub mod world;
