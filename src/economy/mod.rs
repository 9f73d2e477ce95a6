//! Resource ledger and reward application.

pub mod resources;
pub mod rewards;

pub use resources::*;
pub use rewards::*;
