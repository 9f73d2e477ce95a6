use crate::economy::rewards::RewardBundle;
use serde::{Deserialize, Serialize};

/// What a quest measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestKind {
    #[serde(alias = "monster_kill")]
    Kill,
    #[serde(alias = "resource_collect")]
    Collect,
    #[serde(alias = "realm_reach")]
    ReachRealm,
    #[serde(alias = "join_sect")]
    JoinSect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    InProgress,
    Completed,
    Claimed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "type")]
    pub kind: QuestKind,
    /// Monster name, resource key, realm name; unused for sect quests.
    #[serde(alias = "targetKey", default)]
    pub target: String,
    #[serde(default)]
    pub progress: u64,
    pub goal: u64,
    #[serde(default)]
    pub status: QuestStatus,
    #[serde(default)]
    pub rewards: RewardBundle,
}

impl Quest {
    pub fn is_in_progress(&self) -> bool {
        self.status == QuestStatus::InProgress
    }

    pub fn is_claimable(&self) -> bool {
        self.status == QuestStatus::Completed
    }

    /// Set progress and flip to completed when the goal is met.
    /// Returns true when this call completed the quest.
    pub fn set_progress(&mut self, progress: u64) -> bool {
        if !self.is_in_progress() {
            return false;
        }
        self.progress = progress.min(self.goal);
        if self.progress >= self.goal {
            self.status = QuestStatus::Completed;
            return true;
        }
        false
    }
}
