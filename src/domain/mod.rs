pub mod models;
pub mod form;
pub mod errors;

pub use models::*;
pub use form::*;
pub use errors::*;
