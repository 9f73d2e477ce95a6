//! Events produced while the session advances.
//!
//! The host maps these to log lines and save requests; the session never
//! touches presentation types.

use crate::character::summary::GameSummary;
use crate::character::types::Realm;
use crate::items::types::Quality;

#[derive(Debug, Clone, PartialEq)]
pub enum TickEvent {
    // ── Combat ──────────────────────────────────────────────────
    EncounterStarted {
        encounter_id: u64,
        monster: &'static str,
        level: u32,
    },

    PlayerStrike {
        damage: u32,
        crit: bool,
        enemy_hp: u32,
    },

    MonsterStrike {
        damage: u32,
        player_hp: u32,
    },

    Victory {
        monster: &'static str,
        experience: u64,
        currency: u64,
        rare_currency: u64,
        consumables: u64,
    },

    Defeat {
        monster: &'static str,
        hp_restored: u32,
    },

    // ── Progression ─────────────────────────────────────────────
    LeveledUp { level: u32 },

    Breakthrough {
        from: Realm,
        to: Realm,
        age_limit_gain: u32,
    },

    GameOver { summary: Box<GameSummary> },

    // ── Rewards ─────────────────────────────────────────────────
    LootDropped { item_name: String, quality: Quality },

    QuestCompleted { quest_id: u32, name: String },

    AdventureOffered { adventure_id: u32, title: &'static str },

    // ── Notifications ───────────────────────────────────────────
    /// A notification was posted. It may expire before the host next looks
    /// at the queue, so hosts that print notifications read them here.
    Notified {
        id: u64,
        title: String,
        message: String,
    },

    // ── Persistence ─────────────────────────────────────────────
    /// The debounce window after the last change elapsed; the host should
    /// write the save document now.
    SaveRequested,
}
