use crate::character::types::Realm;
use serde::{Deserialize, Serialize};

/// Run statistics, persisted with the save and shown in the final summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub total_battles: u64,
    pub victories: u64,
    pub defeats: u64,
    #[serde(alias = "totalMonstersKilled")]
    pub monsters_killed: u64,
    #[serde(alias = "goldEarned")]
    pub currency_earned: u64,
    #[serde(alias = "spiritStonesEarned")]
    pub rare_currency_earned: u64,
    pub consumables_earned: u64,
    #[serde(alias = "pillsUsed")]
    pub consumables_used: u64,
    pub quests_completed: u64,
    pub breakthroughs: u64,
    #[serde(alias = "maxRealmReached")]
    pub highest_realm: Realm,
}

impl GameStats {
    pub fn record_realm(&mut self, realm: Realm) {
        if realm > self.highest_realm {
            self.highest_realm = realm;
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_battles == 0 {
            0.0
        } else {
            self.victories as f64 / self.total_battles as f64
        }
    }
}
