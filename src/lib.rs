//! Xianxia - Idle Cultivation Engine Library
//!
//! Progression, combat and economy rules plus the session controller that
//! sequences them. Hosts drive a [`GameSession`] and render its snapshots.

pub mod adventure;
pub mod character;
pub mod combat;
pub mod content;
pub mod core;
pub mod cultivation;
pub mod economy;
pub mod items;
pub mod notifications;
pub mod persistence;
pub mod quests;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::core::error::GameError;
pub use crate::core::session::GameSession;
pub use crate::core::tick::TickEvent;
