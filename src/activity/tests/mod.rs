//! Unit tests for the activity module.
