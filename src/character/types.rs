use super::attributes::Attributes;
use crate::core::constants::{
    CHARACTER_NAME_MAX_LENGTH, EXP_PER_LEVEL, STARTING_AGE, STARTING_AGE_LIMIT,
};
use crate::core::error::GameError;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profession {
    #[default]
    Sword,
    Body,
    Fire,
    Ice,
    Thunder,
    Beast,
}

impl Profession {
    pub fn all() -> [Profession; 6] {
        [
            Profession::Sword,
            Profession::Body,
            Profession::Fire,
            Profession::Ice,
            Profession::Thunder,
            Profession::Beast,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Profession::Sword => "剑修",
            Profession::Body => "体修",
            Profession::Fire => "灵焰师",
            Profession::Ice => "冰灵师",
            Profession::Thunder => "雷灵师",
            Profession::Beast => "御兽师",
        }
    }

    /// Parse the lowercase key used in saves and on the command line.
    pub fn from_key(key: &str) -> Option<Profession> {
        Profession::all()
            .into_iter()
            .find(|p| p.key() == key.trim().to_ascii_lowercase())
    }

    pub fn key(&self) -> &'static str {
        match self {
            Profession::Sword => "sword",
            Profession::Body => "body",
            Profession::Fire => "fire",
            Profession::Ice => "ice",
            Profession::Thunder => "thunder",
            Profession::Beast => "beast",
        }
    }
}

/// Innate constitution; scales base attributes once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Talent {
    #[default]
    Normal,
    Huanggu,
    Xianti,
}

impl Talent {
    pub fn multiplier(&self) -> f64 {
        match self {
            Talent::Normal => 1.0,
            Talent::Huanggu => 1.5,
            Talent::Xianti => 2.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Talent::Normal => "普通体质",
            Talent::Huanggu => "荒古圣体",
            Talent::Xianti => "先天圣体道胎",
        }
    }

    pub fn from_key(key: &str) -> Option<Talent> {
        match key.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(Talent::Normal),
            "huanggu" => Some(Talent::Huanggu),
            "xianti" => Some(Talent::Xianti),
            _ => None,
        }
    }
}

/// The nine-stage realm ladder, lowest first.
///
/// Serialized by its display name so saves read `"realm": "筑基"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Realm {
    #[default]
    #[serde(rename = "淬体")]
    BodyTempering,
    #[serde(rename = "炼气")]
    QiRefining,
    #[serde(rename = "筑基")]
    FoundationBuilding,
    #[serde(rename = "金丹")]
    GoldenCore,
    #[serde(rename = "元婴")]
    NascentSoul,
    #[serde(rename = "化神")]
    SpiritTransformation,
    #[serde(rename = "大乘")]
    GreatAscension,
    #[serde(rename = "渡劫")]
    Tribulation,
    #[serde(rename = "飞升")]
    Immortal,
}

impl Realm {
    pub const ALL: [Realm; 9] = [
        Realm::BodyTempering,
        Realm::QiRefining,
        Realm::FoundationBuilding,
        Realm::GoldenCore,
        Realm::NascentSoul,
        Realm::SpiritTransformation,
        Realm::GreatAscension,
        Realm::Tribulation,
        Realm::Immortal,
    ];

    pub const LAST: Realm = Realm::Immortal;

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Realm> {
        Realm::ALL.get(index).copied()
    }

    pub fn next(&self) -> Option<Realm> {
        Realm::from_index(self.index() + 1)
    }

    pub fn is_final(&self) -> bool {
        *self == Realm::LAST
    }

    pub fn name(&self) -> &'static str {
        match self {
            Realm::BodyTempering => "淬体",
            Realm::QiRefining => "炼气",
            Realm::FoundationBuilding => "筑基",
            Realm::GoldenCore => "金丹",
            Realm::NascentSoul => "元婴",
            Realm::SpiritTransformation => "化神",
            Realm::GreatAscension => "大乘",
            Realm::Tribulation => "渡劫",
            Realm::Immortal => "飞升",
        }
    }

    pub fn from_name(name: &str) -> Option<Realm> {
        Realm::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl std::fmt::Display for Realm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// `level = floor(exp / 100) + 1`.
pub fn level_for_experience(experience: u64) -> u32 {
    u32::try_from(experience / EXP_PER_LEVEL)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

fn default_level() -> u32 {
    1
}

fn default_age() -> u32 {
    STARTING_AGE
}

fn default_age_limit() -> u32 {
    STARTING_AGE_LIMIT
}

/// Treats `null`, `""` and whitespace as "none"; older saves store an
/// unaffiliated character's sect as an empty string.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub profession: Profession,
    #[serde(default)]
    pub talent: Talent,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub realm: Realm,
    #[serde(alias = "exp", default)]
    pub experience: u64,
    #[serde(default = "default_age")]
    pub age: u32,
    #[serde(default = "default_age_limit")]
    pub age_limit: u32,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub sect: Option<String>,
    #[serde(default, alias = "pet", deserialize_with = "blank_as_none")]
    pub companion: Option<String>,
    pub attributes: Attributes,
}

impl Character {
    /// Create a fresh cultivator. The name is trimmed and must be non-empty.
    pub fn new(name: &str, profession: Profession, talent: Talent) -> Result<Self, GameError> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > CHARACTER_NAME_MAX_LENGTH {
            return Err(GameError::InvalidName {
                max: CHARACTER_NAME_MAX_LENGTH,
            });
        }

        Ok(Self {
            name: name.to_string(),
            profession,
            talent,
            level: 1,
            realm: Realm::default(),
            experience: 0,
            age: STARTING_AGE,
            age_limit: STARTING_AGE_LIMIT,
            sect: None,
            companion: None,
            attributes: Attributes::for_talent(talent.multiplier()),
        })
    }

    /// Add experience and re-derive the level. Returns true on level-up.
    pub fn gain_experience(&mut self, amount: u64) -> bool {
        let before = self.level;
        self.experience = self.experience.saturating_add(amount);
        self.level = level_for_experience(self.experience);
        self.level > before
    }

    pub fn has_sect(&self) -> bool {
        self.sect.is_some()
    }

    /// Re-establish derived invariants after loading external data.
    pub fn normalize(&mut self) {
        self.level = level_for_experience(self.experience);
        self.attributes.clamp_hp();
    }
}
