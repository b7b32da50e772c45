//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! holding the editor's view state and running its load and submit workflows.

pub mod state;
pub mod workflow;

pub use state::*;
pub use workflow::*;
