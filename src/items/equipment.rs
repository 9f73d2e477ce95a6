use super::types::{EquipmentItem, EquipmentSlot};
use crate::character::attributes::StatBonus;
use serde::{Deserialize, Serialize};

/// The three equipped slots.
///
/// Every field is `#[serde(default)]` so saves written before a slot existed
/// still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSlots {
    #[serde(default)]
    pub weapon: Option<EquipmentItem>,
    #[serde(default)]
    pub armor: Option<EquipmentItem>,
    #[serde(default)]
    pub accessory: Option<EquipmentItem>,
}

impl EquipmentSlots {
    pub fn get(&self, slot: EquipmentSlot) -> &Option<EquipmentItem> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Accessory => &self.accessory,
        }
    }

    pub fn set(&mut self, slot: EquipmentSlot, item: Option<EquipmentItem>) {
        match slot {
            EquipmentSlot::Weapon => self.weapon = item,
            EquipmentSlot::Armor => self.armor = item,
            EquipmentSlot::Accessory => self.accessory = item,
        }
    }

    /// Remove and return whatever occupies `slot`.
    pub fn take(&mut self, slot: EquipmentSlot) -> Option<EquipmentItem> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.take(),
            EquipmentSlot::Armor => self.armor.take(),
            EquipmentSlot::Accessory => self.accessory.take(),
        }
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = &EquipmentItem> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|item| item.as_ref())
    }

    pub fn total_bonus(&self) -> StatBonus {
        self.iter_equipped()
            .fold(StatBonus::NONE, |acc, item| acc.combine(&item.bonus))
    }
}
