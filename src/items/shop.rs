//! Buying, selling and (un)equipping items.
//!
//! Every operation validates before it mutates, so a rejected call leaves
//! the ledger, inventory and slots exactly as they were.

use super::drops::instantiate;
use super::equipment::EquipmentSlots;
use super::types::{EquipmentItem, EquipmentSlot};
use crate::content::equipment::catalog_item;
use crate::core::constants::SELL_PRICE_DIVISOR;
use crate::core::error::GameError;
use crate::economy::resources::{ResourceKind, Resources};
use rand::Rng;
use uuid::Uuid;

pub fn sell_price(item: &EquipmentItem) -> u64 {
    item.price / SELL_PRICE_DIVISOR
}

/// Debit the catalog price and add a fresh instance to the inventory.
pub fn buy(
    template_id: &str,
    serial: u64,
    resources: &mut Resources,
    inventory: &mut Vec<EquipmentItem>,
    rng: &mut impl Rng,
) -> Result<EquipmentItem, GameError> {
    let template =
        catalog_item(template_id).ok_or_else(|| GameError::UnknownItem(template_id.to_string()))?;
    resources.spend(ResourceKind::Currency, template.price)?;

    let item = instantiate(template, serial, rng);
    inventory.push(item.clone());
    Ok(item)
}

/// Remove an unequipped item from the inventory for half its price.
pub fn sell(
    instance_id: Uuid,
    resources: &mut Resources,
    inventory: &mut Vec<EquipmentItem>,
) -> Result<u64, GameError> {
    let index = inventory
        .iter()
        .position(|i| i.instance_id == instance_id)
        .ok_or_else(|| GameError::ItemNotFound(instance_id.to_string()))?;
    let item = inventory.remove(index);
    let price = sell_price(&item);
    resources.add(ResourceKind::Currency, price);
    Ok(price)
}

/// Move an inventory item into its slot. Whatever was there goes back to the
/// inventory and is returned.
pub fn equip(
    instance_id: Uuid,
    inventory: &mut Vec<EquipmentItem>,
    slots: &mut EquipmentSlots,
) -> Result<Option<EquipmentItem>, GameError> {
    let index = inventory
        .iter()
        .position(|i| i.instance_id == instance_id)
        .ok_or_else(|| GameError::ItemNotFound(instance_id.to_string()))?;
    let item = inventory.remove(index);
    let slot = item.slot;

    let displaced = slots.take(slot);
    if let Some(old) = &displaced {
        inventory.push(old.clone());
    }
    slots.set(slot, Some(item));
    Ok(displaced)
}

pub fn unequip(
    slot: EquipmentSlot,
    inventory: &mut Vec<EquipmentItem>,
    slots: &mut EquipmentSlots,
) -> Result<EquipmentItem, GameError> {
    let item = slots
        .take(slot)
        .ok_or_else(|| GameError::SlotEmpty(slot.to_string()))?;
    inventory.push(item.clone());
    Ok(item)
}
