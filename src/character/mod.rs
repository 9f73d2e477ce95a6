//! Character types, attributes, progression, run history and the
//! end-of-run summary.

pub mod attributes;
pub mod derived_stats;
pub mod history;
pub mod progression;
pub mod summary;
pub mod types;

pub use attributes::*;
pub use derived_stats::*;
pub use history::*;
pub use progression::*;
pub use summary::*;
pub use types::*;
