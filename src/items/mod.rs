//! Item system: equipment types, equipped slots, loot and the shop.

pub mod drops;
pub mod equipment;
pub mod shop;
pub mod types;

pub use drops::*;
pub use equipment::*;
pub use shop::*;
pub use types::*;
