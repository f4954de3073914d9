//! Application layer coordinating the domain rules with storage, the
//! mocked services, and the UI state.

pub mod flow;
pub mod session;
pub mod state;

pub use flow::*;
pub use session::*;
pub use state::*;
