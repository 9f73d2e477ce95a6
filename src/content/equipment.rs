//! Equipment catalog sold in the shop and rolled as loot.
//!
//! No entry carries an HP bonus: effective max HP is always the base value.

use crate::character::attributes::StatBonus;
use crate::items::types::{EquipmentSlot, EquipmentTemplate, Quality};

pub static EQUIPMENT_CATALOG: [EquipmentTemplate; 9] = [
    // ==== Weapons ====
    EquipmentTemplate {
        id: "iron_sword",
        name: "铁剑",
        slot: EquipmentSlot::Weapon,
        tier: 1,
        quality: Quality::White,
        price: 50,
        bonus: StatBonus::new(5, 0, 0, 0.0),
    },
    EquipmentTemplate {
        id: "azure_blade",
        name: "青锋剑",
        slot: EquipmentSlot::Weapon,
        tier: 2,
        quality: Quality::Blue,
        price: 300,
        bonus: StatBonus::new(15, 0, 0, 0.02),
    },
    EquipmentTemplate {
        id: "violet_lightning_sword",
        name: "紫电剑",
        slot: EquipmentSlot::Weapon,
        tier: 3,
        quality: Quality::Purple,
        price: 1500,
        bonus: StatBonus::new(40, 0, 0, 0.05),
    },
    // ==== Armor ====
    EquipmentTemplate {
        id: "cloth_robe",
        name: "布衣",
        slot: EquipmentSlot::Armor,
        tier: 1,
        quality: Quality::White,
        price: 40,
        bonus: StatBonus::new(0, 3, 0, 0.0),
    },
    EquipmentTemplate {
        id: "dark_iron_armor",
        name: "玄铁甲",
        slot: EquipmentSlot::Armor,
        tier: 2,
        quality: Quality::Blue,
        price: 280,
        bonus: StatBonus::new(0, 10, 0, 0.0),
    },
    EquipmentTemplate {
        id: "golden_silk_robe",
        name: "金缕衣",
        slot: EquipmentSlot::Armor,
        tier: 3,
        quality: Quality::Purple,
        price: 1400,
        bonus: StatBonus::new(0, 25, 0, 0.0),
    },
    // ==== Accessories ====
    EquipmentTemplate {
        id: "jade_pendant",
        name: "玉佩",
        slot: EquipmentSlot::Accessory,
        tier: 1,
        quality: Quality::Green,
        price: 60,
        bonus: StatBonus::new(0, 1, 0, 0.01),
    },
    EquipmentTemplate {
        id: "spirit_pearl",
        name: "灵珠",
        slot: EquipmentSlot::Accessory,
        tier: 2,
        quality: Quality::Blue,
        price: 320,
        bonus: StatBonus::new(5, 0, 0, 0.03),
    },
    EquipmentTemplate {
        id: "dragon_ring",
        name: "龙纹戒",
        slot: EquipmentSlot::Accessory,
        tier: 3,
        quality: Quality::Orange,
        price: 1800,
        bonus: StatBonus::new(20, 10, 0, 0.05),
    },
];

pub fn catalog_item(id: &str) -> Option<&'static EquipmentTemplate> {
    EQUIPMENT_CATALOG.iter().find(|t| t.id == id)
}

pub fn catalog_up_to_tier(max_tier: u32) -> Vec<&'static EquipmentTemplate> {
    EQUIPMENT_CATALOG
        .iter()
        .filter(|t| t.tier <= max_tier)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_no_hp_bonuses() {
        assert!(EQUIPMENT_CATALOG.iter().all(|t| t.bonus.hp == 0));
    }

    #[test]
    fn test_each_slot_has_three_tiers() {
        for slot in EquipmentSlot::ALL {
            let mut tiers: Vec<_> = EQUIPMENT_CATALOG
                .iter()
                .filter(|t| t.slot == slot)
                .map(|t| t.tier)
                .collect();
            tiers.sort();
            assert_eq!(tiers, vec![1, 2, 3]);
        }
    }

    #[test]
    fn test_tier_filter() {
        assert_eq!(catalog_up_to_tier(1).len(), 3);
        assert_eq!(catalog_up_to_tier(3).len(), 9);
        assert_eq!(catalog_item("dragon_ring").map(|t| t.price), Some(1800));
    }
}
