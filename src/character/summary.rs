use super::history::HistoryEntry;
use super::types::{Character, Profession, Realm, Talent};
use crate::core::stats::GameStats;
use crate::economy::resources::Resources;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Snapshot taken when the run ends at the age limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub name: String,
    pub profession: Profession,
    pub talent: Talent,
    pub level: u32,
    pub realm: Realm,
    pub age: u32,
    pub age_limit: u32,
    pub experience: u64,
    pub sect: Option<String>,
    pub companion: Option<String>,
    pub resources: Resources,
    pub stats: GameStats,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl GameSummary {
    pub fn capture(
        character: &Character,
        resources: &Resources,
        stats: &GameStats,
        history: &[HistoryEntry],
    ) -> Self {
        Self {
            name: character.name.clone(),
            profession: character.profession,
            talent: character.talent,
            level: character.level,
            realm: character.realm,
            age: character.age,
            age_limit: character.age_limit,
            experience: character.experience,
            sect: character.sect.clone(),
            companion: character.companion.clone(),
            resources: resources.clone(),
            stats: stats.clone(),
            history: history.to_vec(),
        }
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "寿元已尽，{}的修仙之路到此为止。", self.name)?;
        writeln!(
            f,
            "{} · {} · {}境 第{}级 · 享年{}岁",
            self.profession.name(),
            self.talent.name(),
            self.realm,
            self.level,
            self.age
        )?;
        writeln!(f, "门派: {}", self.sect.as_deref().unwrap_or("散修"))?;
        if let Some(companion) = &self.companion {
            writeln!(f, "灵宠: {}", companion)?;
        }
        writeln!(
            f,
            "金币 {} · 灵石 {} · 丹药 {}",
            self.resources.currency, self.resources.rare_currency, self.resources.consumables
        )?;
        write!(
            f,
            "战斗 {} 场 (胜 {} / 败 {}) · 突破 {} 次 · 完成任务 {} 个",
            self.stats.total_battles,
            self.stats.victories,
            self.stats.defeats,
            self.stats.breakthroughs,
            self.stats.quests_completed
        )?;
        if !self.history.is_empty() {
            write!(f, "\n生平:")?;
            for entry in &self.history {
                write!(f, "\n  {}", entry)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_and_display() {
        let mut c = Character::new("王林", Profession::Thunder, Talent::Normal).unwrap();
        c.age = 100;
        let history = [HistoryEntry::new(40, "境界突破", "从淬体境突破到炼气境")];
        let summary =
            GameSummary::capture(&c, &Resources::starting(), &GameStats::default(), &history);
        assert_eq!(summary.age, 100);
        assert_eq!(summary.realm, Realm::BodyTempering);
        assert_eq!(summary.history.len(), 1);
        let text = summary.to_string();
        assert!(text.contains("王林"));
        assert!(text.contains("散修"));
        assert!(text.contains("淬体"));
        assert!(text.contains("40岁 [境界突破]"));
    }

    #[test]
    fn test_display_without_history() {
        let c = Character::new("王林", Profession::Thunder, Talent::Normal).unwrap();
        let summary = GameSummary::capture(&c, &Resources::starting(), &GameStats::default(), &[]);
        assert!(!summary.to_string().contains("生平"));
    }
}
