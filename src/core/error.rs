//! Error taxonomy for rejected actions.

use crate::economy::ResourceKind;
use thiserror::Error;

/// Every failure a command or callback can produce.
///
/// None of these is fatal: the session rejects the action, leaves state as it
/// was and surfaces [`GameError::notification`] to the player.
#[derive(Debug, Error)]
pub enum GameError {
    /// No monster satisfies the level filter.
    #[error("no eligible encounter for the current level")]
    NoEligibleEncounter,

    /// A spend was attempted without sufficient balance.
    #[error("insufficient {resource}: need {required}, have {available}")]
    InsufficientResources {
        resource: ResourceKind,
        required: u64,
        available: u64,
    },

    /// The import payload is not a JSON object.
    #[error("invalid save format: {0}")]
    InvalidFormat(String),

    /// The import payload is missing a required field or has the wrong shape.
    #[error("malformed save: {0}")]
    MalformedSave(String),

    /// A cooldown-gated action was invoked too early.
    #[error("{technique} is on cooldown for another {remaining_ms} ms")]
    CooldownActive {
        technique: String,
        remaining_ms: u64,
    },

    /// A deferred combat callback fired against a superseded encounter.
    #[error("stale callback for encounter {encounter_id}")]
    StaleEncounterCallback { encounter_id: u64 },

    /// The session is in its terminal state.
    #[error("the journey has ended")]
    GameOver,

    #[error("character name must be 1-{max} characters")]
    InvalidName { max: usize },

    #[error("cultivation requires sect membership")]
    NotInSect,

    #[error("unknown cultivation technique: {0}")]
    UnknownTechnique(String),

    #[error("unknown catalog item: {0}")]
    UnknownItem(String),

    #[error("item not in inventory: {0}")]
    ItemNotFound(String),

    #[error("nothing equipped in the {0} slot")]
    SlotEmpty(String),

    #[error("unknown quest: {0}")]
    QuestNotFound(u32),

    #[error("quest {0} has no reward to claim")]
    QuestNotClaimable(u32),

    #[error("no adventure is waiting for a choice")]
    NoPendingAdventure,

    #[error("adventure has no option {0}")]
    UnknownAdventureOption(u32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GameError {
    /// Title and message shown to the player, or `None` for silent errors.
    pub fn notification(&self) -> Option<(&'static str, String)> {
        let title = match self {
            GameError::StaleEncounterCallback { .. } => return None,
            GameError::InvalidFormat(_) | GameError::MalformedSave(_) => "导入失败",
            GameError::InsufficientResources { .. } => "资源不足",
            GameError::CooldownActive { .. } => "修炼冷却",
            GameError::NoEligibleEncounter => "无可挑战",
            GameError::GameOver => "修仙结束",
            _ => "提示",
        };
        Some((title, self.to_string()))
    }

    /// True for errors that reject an import.
    pub fn is_import_failure(&self) -> bool {
        matches!(
            self,
            GameError::InvalidFormat(_) | GameError::MalformedSave(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_callback_is_silent() {
        let err = GameError::StaleEncounterCallback { encounter_id: 3 };
        assert!(err.notification().is_none());
    }

    #[test]
    fn test_insufficient_resources_message() {
        let err = GameError::InsufficientResources {
            resource: ResourceKind::Currency,
            required: 300,
            available: 100,
        };
        let (title, message) = err.notification().unwrap();
        assert_eq!(title, "资源不足");
        assert!(message.contains("300"));
        assert!(message.contains("100"));
    }

    #[test]
    fn test_cooldown_reports_remaining_time() {
        let err = GameError::CooldownActive {
            technique: "青云吐纳诀".to_string(),
            remaining_ms: 1500,
        };
        assert!(err.to_string().contains("1500"));
    }

    #[test]
    fn test_import_failures() {
        assert!(GameError::MalformedSave("x".into()).is_import_failure());
        assert!(GameError::InvalidFormat("x".into()).is_import_failure());
        assert!(!GameError::GameOver.is_import_failure());
    }
}
