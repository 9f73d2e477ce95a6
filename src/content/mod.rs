//! Static game content: immutable tables shared by the whole process.

pub mod adventures;
pub mod equipment;
pub mod monsters;
pub mod quests;
pub mod sects;

pub use adventures::*;
pub use equipment::*;
pub use monsters::*;
pub use quests::*;
pub use sects::*;
