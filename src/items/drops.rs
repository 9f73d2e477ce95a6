//! Equipment loot rolls and instance creation.

use super::types::{EquipmentItem, EquipmentTemplate};
use crate::character::types::Realm;
use crate::content::equipment::catalog_up_to_tier;
use crate::core::constants::{EQUIPMENT_DROP_CHANCE, MAX_EQUIPMENT_TIER};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Random v4 id with `serial` folded into the low bytes, so ids stay unique
/// even when the random source repeats itself.
pub fn new_instance_id(serial: u64, rng: &mut impl Rng) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    bytes[8..].copy_from_slice(&serial.to_be_bytes());
    uuid::Builder::from_random_bytes(bytes).into_uuid()
}

/// Create an owned copy of a template; never aliases the catalog entry.
pub fn instantiate(template: &EquipmentTemplate, serial: u64, rng: &mut impl Rng) -> EquipmentItem {
    EquipmentItem::from_template(template, new_instance_id(serial, rng))
}

/// Highest catalog tier that can drop at `realm`.
pub fn max_drop_tier(realm: Realm) -> u32 {
    (realm.index() as u32 / 3 + 1).min(MAX_EQUIPMENT_TIER)
}

/// Roll the post-victory equipment drop.
pub fn roll_equipment_drop(realm: Realm, serial: u64, rng: &mut impl Rng) -> Option<EquipmentItem> {
    if rng.gen::<f64>() >= EQUIPMENT_DROP_CHANCE {
        return None;
    }
    let pool = catalog_up_to_tier(max_drop_tier(realm));
    let template = pool.choose(rng)?;
    Some(instantiate(template, serial, rng))
}
