//! Sect cultivation techniques and their cooldowns.

pub mod practice;

pub use practice::*;
