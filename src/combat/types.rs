use crate::content::monsters::Monster;
use crate::core::constants::COMBAT_LOG_CAPACITY;
use crate::items::types::EquipmentItem;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// `Engaged` accepts rounds; `Resolving` waits for the scheduled resolution
/// and ignores every further round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncounterPhase {
    Engaged,
    Resolving(CombatOutcome),
}

/// One fight against one monster. Transient: never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Encounter {
    pub id: u64,
    pub monster: &'static Monster,
    pub enemy_hp: u32,
    pub phase: EncounterPhase,
    pub rounds: u32,
}

impl Encounter {
    pub fn new(id: u64, monster: &'static Monster) -> Self {
        Self {
            id,
            monster,
            enemy_hp: monster.hp,
            phase: EncounterPhase::Engaged,
            rounds: 0,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.phase == EncounterPhase::Engaged
    }

    pub fn enemy_alive(&self) -> bool {
        self.enemy_hp > 0
    }
}

/// Result of one half-round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strike {
    pub damage: u32,
    pub crit: bool,
    pub lethal: bool,
}

/// Everything a victory pays out, rolled before anything is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct VictoryLoot {
    pub experience: u64,
    pub currency: u64,
    pub rare_currency: u64,
    pub consumables: u64,
    pub equipment: Option<EquipmentItem>,
}

/// Rolling log of the most recent combat lines, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatLog {
    lines: VecDeque<String>,
}

impl CombatLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push_back(line.into());
        while self.lines.len() > COMBAT_LOG_CAPACITY {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::monsters::MONSTERS;

    #[test]
    fn test_new_encounter_starts_engaged_at_full_hp() {
        let enc = Encounter::new(1, &MONSTERS[0]);
        assert!(enc.is_engaged());
        assert_eq!(enc.enemy_hp, 50);
        assert_eq!(enc.rounds, 0);
    }

    #[test]
    fn test_combat_log_is_capped() {
        let mut log = CombatLog::default();
        for i in 0..15 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.len(), COMBAT_LOG_CAPACITY);
        assert_eq!(log.lines().next(), Some("line 5"));
        assert_eq!(log.lines().last(), Some("line 14"));
    }
}
