//! Utility modules: build info and JSON file helpers.

pub mod build_info;
pub mod persistence;

pub use build_info::*;
