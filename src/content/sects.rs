//! Sects and the cultivation techniques each one teaches.

use crate::character::attributes::StatBonus;
use crate::economy::rewards::RewardBundle;

#[derive(Debug, Clone, PartialEq)]
pub struct Sect {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// A cooldown-gated practice that costs rare currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Technique {
    pub id: &'static str,
    pub name: &'static str,
    /// Name of the sect whose members may practice it.
    pub sect: &'static str,
    pub rare_currency_cost: u64,
    pub cooldown_ms: u64,
    pub rewards: RewardBundle,
}

pub static SECTS: [Sect; 7] = [
    Sect { id: "qingyun", name: "青云门", description: "正道魁首，底蕴深厚" },
    Sect { id: "tianjian", name: "天剑宗", description: "剑道圣地，剑意通天" },
    Sect { id: "huoyan", name: "火焰宗", description: "火系霸主，烈焰焚天" },
    Sect { id: "shenshan", name: "神山派", description: "古老门派，根基深厚" },
    Sect { id: "xueyun", name: "雪云宗", description: "冰系传承，寒冰刺骨" },
    Sect { id: "leiting", name: "雷霆阁", description: "雷系传承，雷霆万钧" },
    Sect { id: "wanbeast", name: "万兽山", description: "万兽争鸣，灵力充沛" },
];

const fn attribute_reward(experience: u64, attributes: StatBonus) -> RewardBundle {
    RewardBundle {
        experience,
        currency: 0,
        rare_currency: 0,
        consumables: 0,
        age_limit: 0,
        companion: None,
        sect: None,
        attributes,
    }
}

pub static TECHNIQUES: [Technique; 9] = [
    Technique {
        id: "qingyun_breathing",
        name: "青云吐纳诀",
        sect: "青云门",
        rare_currency_cost: 3,
        cooldown_ms: 30_000,
        rewards: RewardBundle::experience(80),
    },
    Technique {
        id: "qingyun_guard",
        name: "青云护体诀",
        sect: "青云门",
        rare_currency_cost: 5,
        cooldown_ms: 60_000,
        rewards: attribute_reward(0, StatBonus::new(0, 0, 20, 0.0)),
    },
    Technique {
        id: "tianjian_intent",
        name: "天剑剑意",
        sect: "天剑宗",
        rare_currency_cost: 5,
        cooldown_ms: 60_000,
        rewards: attribute_reward(50, StatBonus::new(2, 0, 0, 0.0)),
    },
    Technique {
        id: "huoyan_heart",
        name: "烈焰心法",
        sect: "火焰宗",
        rare_currency_cost: 4,
        cooldown_ms: 45_000,
        rewards: attribute_reward(40, StatBonus::new(1, 0, 0, 0.0)),
    },
    Technique {
        id: "shenshan_tempering",
        name: "神山锻体",
        sect: "神山派",
        rare_currency_cost: 5,
        cooldown_ms: 60_000,
        rewards: attribute_reward(0, StatBonus::new(0, 0, 20, 0.0)),
    },
    Technique {
        id: "xueyun_frost",
        name: "寒冰诀",
        sect: "雪云宗",
        rare_currency_cost: 4,
        cooldown_ms: 45_000,
        rewards: attribute_reward(30, StatBonus::new(0, 2, 0, 0.0)),
    },
    Technique {
        id: "leiting_thunder",
        name: "雷霆诀",
        sect: "雷霆阁",
        rare_currency_cost: 6,
        cooldown_ms: 90_000,
        rewards: attribute_reward(0, StatBonus::new(0, 0, 0, 0.01)),
    },
    Technique {
        id: "wanbeast_communion",
        name: "万兽通灵",
        sect: "万兽山",
        rare_currency_cost: 3,
        cooldown_ms: 30_000,
        rewards: RewardBundle::resources(40, 0, 0, 1),
    },
    Technique {
        id: "wanbeast_bond",
        name: "灵兽共修",
        sect: "万兽山",
        rare_currency_cost: 5,
        cooldown_ms: 60_000,
        rewards: attribute_reward(60, StatBonus::new(1, 1, 0, 0.0)),
    },
];

pub fn get_sect(name: &str) -> Option<&'static Sect> {
    SECTS.iter().find(|s| s.name == name || s.id == name)
}

pub fn get_technique(id: &str) -> Option<&'static Technique> {
    TECHNIQUES.iter().find(|t| t.id == id)
}

pub fn techniques_for_sect(sect_name: &str) -> Vec<&'static Technique> {
    TECHNIQUES.iter().filter(|t| t.sect == sect_name).collect()
}
