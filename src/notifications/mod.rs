//! Transient player-facing notifications.

pub mod queue;

pub use queue::*;
