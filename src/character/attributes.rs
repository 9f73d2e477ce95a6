use serde::{Deserialize, Serialize};

/// Base combat attributes stored on the character.
///
/// Only `hp` may ever go down; everything else is raised by breakthroughs,
/// rewards and cultivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attributes {
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
    pub max_hp: u32,
    #[serde(alias = "crit")]
    pub crit_chance: f64,
}

impl Attributes {
    /// Starting attributes scaled once by the talent multiplier.
    pub fn for_talent(multiplier: f64) -> Self {
        use crate::core::constants::{BASE_ATTACK, BASE_CRIT_CHANCE, BASE_DEFENSE, BASE_HP};

        let max_hp = (BASE_HP * multiplier).floor() as u32;
        Self {
            attack: (BASE_ATTACK * multiplier).floor() as u32,
            defense: (BASE_DEFENSE * multiplier).floor() as u32,
            hp: max_hp,
            max_hp,
            crit_chance: BASE_CRIT_CHANCE * multiplier,
        }
    }

    /// Permanently raise attributes. HP bonuses raise both max and current.
    pub fn raise(&mut self, bonus: &StatBonus) {
        self.attack = self.attack.saturating_add(bonus.attack);
        self.defense = self.defense.saturating_add(bonus.defense);
        self.max_hp = self.max_hp.saturating_add(bonus.hp);
        self.hp = self.hp.saturating_add(bonus.hp).min(self.max_hp);
        self.crit_chance += bonus.crit_chance.max(0.0);
    }

    /// Restore HP, never above max.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Re-establish `hp <= max_hp` after loading external data.
    pub fn clamp_hp(&mut self) {
        self.hp = self.hp.min(self.max_hp);
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::for_talent(1.0)
    }
}

/// Additive attribute bonus shared by rewards, breakthroughs and equipment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatBonus {
    pub attack: u32,
    pub defense: u32,
    pub hp: u32,
    #[serde(alias = "crit")]
    pub crit_chance: f64,
}

impl StatBonus {
    pub const NONE: StatBonus = StatBonus {
        attack: 0,
        defense: 0,
        hp: 0,
        crit_chance: 0.0,
    };

    pub const fn new(attack: u32, defense: u32, hp: u32, crit_chance: f64) -> Self {
        Self {
            attack,
            defense,
            hp,
            crit_chance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.attack == 0 && self.defense == 0 && self.hp == 0 && self.crit_chance == 0.0
    }

    /// Component-wise sum.
    pub fn combine(&self, other: &StatBonus) -> StatBonus {
        StatBonus {
            attack: self.attack + other.attack,
            defense: self.defense + other.defense,
            hp: self.hp + other.hp,
            crit_chance: self.crit_chance + other.crit_chance,
        }
    }

    /// Short summary such as `+5 攻击 +3 防御`.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.attack > 0 {
            parts.push(format!("+{} 攻击", self.attack));
        }
        if self.defense > 0 {
            parts.push(format!("+{} 防御", self.defense));
        }
        if self.hp > 0 {
            parts.push(format!("+{} 生命", self.hp));
        }
        if self.crit_chance > 0.0 {
            parts.push(format!("+{:.0}% 暴击", self.crit_chance * 100.0));
        }
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talent_scaling_is_floored() {
        let normal = Attributes::for_talent(1.0);
        assert_eq!(normal.attack, 10);
        assert_eq!(normal.defense, 5);
        assert_eq!(normal.max_hp, 100);
        assert_eq!(normal.hp, 100);

        let huanggu = Attributes::for_talent(1.5);
        assert_eq!(huanggu.attack, 15);
        assert_eq!(huanggu.defense, 7);
        assert_eq!(huanggu.max_hp, 150);
        assert!((huanggu.crit_chance - 0.075).abs() < 1e-9);

        let xianti = Attributes::for_talent(2.0);
        assert_eq!(xianti.attack, 20);
        assert_eq!(xianti.max_hp, 200);
    }

    #[test]
    fn test_raise_keeps_hp_within_max() {
        let mut attrs = Attributes::for_talent(1.0);
        attrs.take_damage(60);
        attrs.raise(&StatBonus::new(5, 3, 50, 0.0));
        assert_eq!(attrs.attack, 15);
        assert_eq!(attrs.defense, 8);
        assert_eq!(attrs.max_hp, 150);
        assert_eq!(attrs.hp, 90);
    }

    #[test]
    fn test_heal_and_damage_clamp() {
        let mut attrs = Attributes::for_talent(1.0);
        attrs.take_damage(500);
        assert_eq!(attrs.hp, 0);
        assert!(!attrs.is_alive());
        attrs.heal(1000);
        assert_eq!(attrs.hp, attrs.max_hp);
    }

    #[test]
    fn test_legacy_crit_alias() {
        let json = r#"{"attack":10,"defense":5,"hp":80,"maxHp":100,"crit":0.1}"#;
        let attrs: Attributes = serde_json::from_str(json).unwrap();
        assert_eq!(attrs.max_hp, 100);
        assert!((attrs.crit_chance - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_describe_bonus() {
        assert_eq!(StatBonus::new(5, 3, 0, 0.0).describe(), "+5 攻击 +3 防御");
        assert!(StatBonus::NONE.is_empty());
        assert_eq!(StatBonus::NONE.describe(), "");
    }
}
