use crate::character::derived_stats::DerivedStats;
use crate::character::history::HistoryEntry;
use crate::character::summary::GameSummary;
use crate::character::types::Character;
use crate::combat::types::{CombatLog, Encounter};
use crate::content::quests::initial_quests;
use crate::core::stats::GameStats;
use crate::cultivation::practice::Cooldowns;
use crate::economy::resources::Resources;
use crate::items::equipment::EquipmentSlots;
use crate::items::types::EquipmentItem;
use crate::quests::types::Quest;

/// Aggregate state of one run, exclusively owned by the session.
///
/// Fields below `auto_play` are transient: they are rebuilt, not saved.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub character: Character,
    pub resources: Resources,
    pub equipment: EquipmentSlots,
    pub inventory: Vec<EquipmentItem>,
    pub quests: Vec<Quest>,
    pub stats: GameStats,
    /// Milestones of the run, oldest first
    pub history: Vec<HistoryEntry>,
    pub auto_play: bool,

    /// Current encounter, `None` while idle
    pub encounter: Option<Encounter>,
    /// Adventure id waiting for the player's choice
    pub pending_adventure: Option<u32>,
    /// Set once the age limit ends the run
    pub game_over: Option<GameSummary>,
    pub cooldowns: Cooldowns,
    pub combat_log: CombatLog,
    /// Folded into item instance ids
    pub next_item_serial: u64,
}

impl GameState {
    pub fn new(character: Character) -> Self {
        let mut stats = GameStats::default();
        stats.record_realm(character.realm);
        Self {
            character,
            resources: Resources::starting(),
            equipment: EquipmentSlots::default(),
            inventory: Vec::new(),
            quests: initial_quests(),
            stats,
            history: Vec::new(),
            auto_play: false,
            encounter: None,
            pending_adventure: None,
            game_over: None,
            cooldowns: Cooldowns::default(),
            combat_log: CombatLog::default(),
            next_item_serial: 1,
        }
    }

    pub fn derived_stats(&self) -> DerivedStats {
        DerivedStats::calculate_derived_stats(&self.character.attributes, &self.equipment)
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// An encounter exists, whether still trading blows or awaiting resolution.
    pub fn battle_in_progress(&self) -> bool {
        self.encounter.is_some()
    }

    pub fn record_history(&mut self, event: impl Into<String>, details: impl Into<String>) {
        let entry = HistoryEntry::new(self.character.age, event, details);
        tracing::debug!(event = %entry.event, details = %entry.details, "history recorded");
        self.history.push(entry);
    }

    pub fn take_item_serial(&mut self) -> u64 {
        let serial = self.next_item_serial;
        self.next_item_serial += 1;
        serial
    }
}
