//! The single reward shape shared by quests, adventures, cultivation and
//! consumables, together with the one routine that applies it.

use super::resources::{ResourceKind, Resources};
use crate::character::attributes::StatBonus;
use crate::character::types::Character;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

fn is_zero(value: &u64) -> bool {
    *value == 0
}

fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

fn is_no_bonus(bonus: &StatBonus) -> bool {
    bonus.is_empty()
}

/// Optional deltas for every resource and attribute a reward can touch.
///
/// Content tables build these as `const`s; saves carry them inside quests.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardBundle {
    #[serde(alias = "exp", skip_serializing_if = "is_zero")]
    pub experience: u64,
    #[serde(alias = "gold", skip_serializing_if = "is_zero")]
    pub currency: u64,
    #[serde(alias = "spiritStone", skip_serializing_if = "is_zero")]
    pub rare_currency: u64,
    #[serde(alias = "pills", skip_serializing_if = "is_zero")]
    pub consumables: u64,
    #[serde(alias = "lifespan", skip_serializing_if = "is_zero_u32")]
    pub age_limit: u32,
    #[serde(alias = "pet", skip_serializing_if = "Option::is_none")]
    pub companion: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sect: Option<Cow<'static, str>>,
    #[serde(skip_serializing_if = "is_no_bonus")]
    pub attributes: StatBonus,
}

/// What applying a bundle changed beyond plain counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardEffects {
    pub leveled_up: bool,
    /// Set when the character had no sect before this reward.
    pub joined_sect: Option<String>,
    pub companion: Option<String>,
}

impl RewardBundle {
    pub const EMPTY: RewardBundle = RewardBundle {
        experience: 0,
        currency: 0,
        rare_currency: 0,
        consumables: 0,
        age_limit: 0,
        companion: None,
        sect: None,
        attributes: StatBonus::NONE,
    };

    pub const fn experience(amount: u64) -> Self {
        RewardBundle::resources(amount, 0, 0, 0)
    }

    pub const fn experience_and_currency(experience: u64, currency: u64) -> Self {
        RewardBundle::resources(experience, currency, 0, 0)
    }

    /// Plain counter reward with no attribute, sect or companion parts.
    pub const fn resources(
        experience: u64,
        currency: u64,
        rare_currency: u64,
        consumables: u64,
    ) -> Self {
        RewardBundle {
            experience,
            currency,
            rare_currency,
            consumables,
            age_limit: 0,
            companion: None,
            sect: None,
            attributes: StatBonus::NONE,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == RewardBundle::EMPTY
    }

    pub fn resource(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Currency => self.currency,
            ResourceKind::RareCurrency => self.rare_currency,
            ResourceKind::Consumables => self.consumables,
        }
    }

    /// Apply every delta to the character and ledger.
    ///
    /// Experience re-derives the level only; realm advancement is left to the
    /// progression resolver on the next victory.
    pub fn apply(&self, character: &mut Character, resources: &mut Resources) -> RewardEffects {
        let mut effects = RewardEffects::default();

        if self.experience > 0 {
            effects.leveled_up = character.gain_experience(self.experience);
        }
        for kind in [
            ResourceKind::Currency,
            ResourceKind::RareCurrency,
            ResourceKind::Consumables,
        ] {
            let amount = self.resource(kind);
            if amount > 0 {
                resources.add(kind, amount);
            }
        }
        if self.age_limit > 0 {
            character.age_limit = character.age_limit.saturating_add(self.age_limit);
        }
        if !self.attributes.is_empty() {
            character.attributes.raise(&self.attributes);
        }
        if let Some(companion) = &self.companion {
            character.companion = Some(companion.to_string());
            effects.companion = Some(companion.to_string());
        }
        if let Some(sect) = &self.sect {
            // A later recruitment replaces the previous affiliation.
            if !character.has_sect() {
                effects.joined_sect = Some(sect.to_string());
            }
            character.sect = Some(sect.to_string());
        }

        effects
    }

    /// Human-readable list such as `+50 修为 +100 金币`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.experience > 0 {
            parts.push(format!("+{} 修为", self.experience));
        }
        for kind in [
            ResourceKind::Currency,
            ResourceKind::RareCurrency,
            ResourceKind::Consumables,
        ] {
            let amount = self.resource(kind);
            if amount > 0 {
                parts.push(format!("+{} {}", amount, kind.name()));
            }
        }
        if self.age_limit > 0 {
            parts.push(format!("+{} 寿元", self.age_limit));
        }
        let stats = self.attributes.describe();
        if !stats.is_empty() {
            parts.push(stats);
        }
        if let Some(companion) = &self.companion {
            parts.push(format!("获得灵宠 {}", companion));
        }
        if let Some(sect) = &self.sect {
            parts.push(format!("加入 {}", sect));
        }
        parts.join(" ")
    }
}
