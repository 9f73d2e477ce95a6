//! Core session machinery: configuration, errors, state, scheduling and the
//! session controller.

pub mod config;
pub mod constants;
pub mod error;
pub mod game_state;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod tick;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use game_state::*;
pub use scheduler::*;
pub use session::*;
pub use stats::*;
pub use tick::*;
