//! Random events and their choices.

pub mod logic;

pub use logic::*;
