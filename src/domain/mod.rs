//! Domain layer: booking data, validation, and navigation rules.
//!
//! Everything here is pure. Clock, randomness, and storage are passed in
//! by the application layer.

pub mod cleaners;
pub mod models;
pub mod navigation;
pub mod neighborhoods;
pub mod validation;

pub use cleaners::*;
pub use models::*;
pub use navigation::*;
pub use neighborhoods::*;
pub use validation::*;
