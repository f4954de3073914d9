//! suds - Terminal booking app for home-cleaning services
//!
//! A multi-step booking wizard in the terminal: pick an area, a service,
//! a time, and a cleaner, then check out with mocked auth and payment.
//! Confirmed bookings live in local JSON storage and come with a
//! receipt, task info, and an in-app chat view.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use application::*;
pub use domain::*;
