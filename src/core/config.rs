//! Session timing configuration.

use serde::{Deserialize, Serialize};

/// Cadence of the cooperative scheduler, in virtual milliseconds.
///
/// Every field has a default so a partial `config.json` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Interval between combat rounds.
    pub tick_interval_ms: u64,

    /// Delay between the player's strike and the monster's counter-strike.
    /// Must be shorter than `tick_interval_ms`.
    pub strike_delay_ms: u64,

    /// Delay between a lethal blow and the encounter resolving.
    pub resolve_delay_ms: u64,

    /// Pause between encounters while auto-play is on.
    pub auto_play_delay_ms: u64,

    /// Lifetime of a notification before it self-expires.
    pub notification_ttl_ms: u64,

    /// Quiet period after the last mutation before a save is requested.
    pub autosave_debounce_ms: u64,

    /// Delay before the sect-recruitment offer follows a breakthrough.
    pub sect_offer_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            strike_delay_ms: 500,
            resolve_delay_ms: 500,
            auto_play_delay_ms: 1000,
            notification_ttl_ms: 5000,
            autosave_debounce_ms: 1000,
            sect_offer_delay_ms: 1000,
        }
    }
}

impl GameConfig {
    /// Compressed cadence for tests and fast-forward simulation.
    pub fn fast() -> Self {
        Self {
            tick_interval_ms: 10,
            strike_delay_ms: 5,
            resolve_delay_ms: 5,
            auto_play_delay_ms: 10,
            notification_ttl_ms: 50,
            autosave_debounce_ms: 10,
            sect_offer_delay_ms: 10,
        }
    }

    /// Clamp values that would break round ordering.
    pub fn normalized(mut self) -> Self {
        self.tick_interval_ms = self.tick_interval_ms.max(2);
        if self.strike_delay_ms >= self.tick_interval_ms {
            self.strike_delay_ms = self.tick_interval_ms / 2;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: GameConfig = serde_json::from_str(r#"{"tick_interval_ms": 250}"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.strike_delay_ms, 500);
        assert_eq!(config.notification_ttl_ms, 5000);
    }

    #[test]
    fn test_normalized_keeps_strike_inside_tick() {
        let config = GameConfig {
            tick_interval_ms: 250,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.strike_delay_ms, 125);

        let default = GameConfig::default().normalized();
        assert_eq!(default, GameConfig::default());
    }
}
