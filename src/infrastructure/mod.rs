//! Infrastructure layer providing external service integrations.
//!
//! This module contains the backend API client, session loading,
//! configuration parsing and log setup.

pub mod api;
pub mod config;
pub mod session;
pub mod telemetry;

pub use api::*;
pub use config::*;
pub use session::*;
pub use telemetry::TelemetryError;
