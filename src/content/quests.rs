//! Quest templates handed out at the start of every run.

use crate::economy::rewards::RewardBundle;
use crate::quests::types::{Quest, QuestKind, QuestStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct QuestTemplate {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: QuestKind,
    pub target: &'static str,
    pub goal: u64,
    pub rewards: RewardBundle,
}

impl QuestTemplate {
    pub fn instantiate(&self) -> Quest {
        Quest {
            id: self.id,
            name: self.name.to_string(),
            description: self.description.to_string(),
            kind: self.kind,
            target: self.target.to_string(),
            progress: 0,
            goal: self.goal,
            status: QuestStatus::InProgress,
            rewards: self.rewards.clone(),
        }
    }
}

pub static QUEST_TEMPLATES: [QuestTemplate; 4] = [
    QuestTemplate {
        id: 1,
        name: "初试锋芒",
        description: "击败3只山妖",
        kind: QuestKind::Kill,
        target: "山妖",
        goal: 3,
        rewards: RewardBundle::experience_and_currency(50, 100),
    },
    QuestTemplate {
        id: 2,
        name: "积累资源",
        description: "收集100金币",
        kind: QuestKind::Collect,
        target: "currency",
        goal: 100,
        rewards: RewardBundle::experience_and_currency(30, 50),
    },
    QuestTemplate {
        id: 3,
        name: "筑基之路",
        description: "达到筑基境",
        kind: QuestKind::ReachRealm,
        target: "筑基",
        goal: 1,
        rewards: RewardBundle::experience_and_currency(500, 500),
    },
    QuestTemplate {
        id: 4,
        name: "拜入师门",
        description: "加入任意门派",
        kind: QuestKind::JoinSect,
        target: "",
        goal: 1,
        rewards: RewardBundle::experience_and_currency(1000, 1000),
    },
];

pub fn initial_quests() -> Vec<Quest> {
    QUEST_TEMPLATES.iter().map(QuestTemplate::instantiate).collect()
}
