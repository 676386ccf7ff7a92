//! Data models for the student record store.
//!
//! These models match the JSON shapes the client exchanges with the API.

mod student;

pub use student::*;
