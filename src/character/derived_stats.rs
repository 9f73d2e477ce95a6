use super::attributes::Attributes;
use crate::items::equipment::EquipmentSlots;

/// Effective combat numbers: base attributes plus equipped bonuses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedStats {
    pub attack: u32,
    pub defense: u32,
    pub max_hp: u32,
    pub crit_chance: f64,
}

impl DerivedStats {
    pub fn calculate_derived_stats(attributes: &Attributes, equipment: &EquipmentSlots) -> Self {
        let bonus = equipment.total_bonus();
        Self {
            attack: attributes.attack.saturating_add(bonus.attack),
            defense: attributes.defense.saturating_add(bonus.defense),
            // Equipment never carries HP so `hp <= max_hp` holds on the base record.
            max_hp: attributes.max_hp,
            crit_chance: (attributes.crit_chance + bonus.crit_chance).clamp(0.0, 1.0),
        }
    }
}
