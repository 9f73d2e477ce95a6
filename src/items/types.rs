use crate::character::attributes::StatBonus;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "武器",
            EquipmentSlot::Armor => "护甲",
            EquipmentSlot::Accessory => "饰品",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Accessory => "accessory",
        }
    }

    pub fn from_key(key: &str) -> Option<EquipmentSlot> {
        EquipmentSlot::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Quality ladder, white (lowest) to red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    White = 0,
    Green = 1,
    Blue = 2,
    Purple = 3,
    Orange = 4,
    Red = 5,
}

impl Quality {
    pub fn name(&self) -> &'static str {
        match self {
            Quality::White => "凡品",
            Quality::Green => "良品",
            Quality::Blue => "上品",
            Quality::Purple => "极品",
            Quality::Orange => "灵品",
            Quality::Red => "仙品",
        }
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub slot: EquipmentSlot,
    pub tier: u32,
    pub quality: Quality,
    pub price: u64,
    pub bonus: StatBonus,
}

/// An owned copy of a catalog entry, distinguished by its instance id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    #[serde(rename = "id")]
    pub instance_id: Uuid,
    pub template_id: String,
    pub name: String,
    pub slot: EquipmentSlot,
    pub tier: u32,
    #[serde(rename = "rarity")]
    pub quality: Quality,
    pub price: u64,
    #[serde(rename = "attributeBonuses", default)]
    pub bonus: StatBonus,
}

impl EquipmentItem {
    pub fn from_template(template: &EquipmentTemplate, instance_id: Uuid) -> Self {
        Self {
            instance_id,
            template_id: template.id.to_string(),
            name: template.name.to_string(),
            slot: template.slot,
            tier: template.tier,
            quality: template.quality,
            price: template.price,
            bonus: template.bonus,
        }
    }

    pub fn display_name(&self) -> String {
        format!("[{}] {}", self.quality.name(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_ordering() {
        assert!(Quality::White < Quality::Green);
        assert!(Quality::Orange < Quality::Red);
    }

    #[test]
    fn test_slot_keys() {
        for slot in EquipmentSlot::ALL {
            assert_eq!(EquipmentSlot::from_key(slot.key()), Some(slot));
        }
        assert_eq!(EquipmentSlot::from_key("helmet"), None);
    }

    #[test]
    fn test_item_serialized_shape() {
        let item = EquipmentItem {
            instance_id: Uuid::nil(),
            template_id: "iron_sword".to_string(),
            name: "铁剑".to_string(),
            slot: EquipmentSlot::Weapon,
            tier: 1,
            quality: Quality::White,
            price: 50,
            bonus: StatBonus::new(5, 0, 0, 0.0),
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(value["rarity"], "white");
        assert_eq!(value["attributeBonuses"]["attack"], 5);
        let back: EquipmentItem = serde_json::from_value(value).unwrap();
        assert_eq!(back, item);
    }
}
