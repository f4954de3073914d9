//! Infrastructure layer: local storage and mocked external services.

pub mod persistence;
pub mod services;

pub use persistence::*;
pub use services::*;
