//! mentor-edit - Mentor Application Editor
//!
//! A terminal form for viewing and updating your mentor application for a
//! mentorship program, backed by the platform's HTTP API.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
