//! Presentation layer handling terminal UI and user input.
//!
//! Rendering goes through ratatui; keyboard events come from crossterm
//! and are dispatched by [`InputHandler`].

pub mod input;
pub mod ui;

pub use input::*;
pub use ui::*;
