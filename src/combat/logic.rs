//! Damage math, encounter selection and the per-half-round steps.
//!
//! These functions only touch the encounter and the character they are
//! given. Sequencing across ticks belongs to the session.

use super::types::{CombatOutcome, Encounter, EncounterPhase, Strike, VictoryLoot};
use crate::character::derived_stats::DerivedStats;
use crate::character::types::{Character, Realm};
use crate::content::monsters::{eligible_monsters, Monster};
use crate::core::constants::{
    CONSUMABLE_DROP_MAX, CONSUMABLE_DROP_MIN, CRIT_MULTIPLIER, DEFEAT_RECOVERY_RATIO,
    MONSTER_LEVEL_WINDOW, RARE_CURRENCY_DROP_MAX, RARE_CURRENCY_DROP_MIN,
};
use crate::core::error::GameError;
use crate::items::drops::roll_equipment_drop;
use rand::seq::SliceRandom;
use rand::Rng;

/// `max(1, floor(attack - defense / 2))`.
pub fn strike_damage(attack: u32, defense: u32) -> u32 {
    let doubled = 2 * i64::from(attack) - i64::from(defense);
    doubled.div_euclid(2).max(1) as u32
}

pub fn roll_crit(chance: f64, rng: &mut impl Rng) -> bool {
    chance > 0.0 && rng.gen::<f64>() < chance
}

/// Critical damage, floored.
pub fn apply_crit(damage: u32) -> u32 {
    (f64::from(damage) * CRIT_MULTIPLIER).floor() as u32
}

/// Uniform pick from `pool`; an empty pool is `NoEligibleEncounter`.
pub fn choose_monster(
    pool: &[&'static Monster],
    rng: &mut impl Rng,
) -> Result<&'static Monster, GameError> {
    pool.choose(rng).copied().ok_or(GameError::NoEligibleEncounter)
}

/// Uniform pick among monsters within the level window.
pub fn select_monster(level: u32, rng: &mut impl Rng) -> Result<&'static Monster, GameError> {
    choose_monster(&eligible_monsters(level, MONSTER_LEVEL_WINDOW), rng)
}

pub fn begin_encounter(id: u64, level: u32, rng: &mut impl Rng) -> Result<Encounter, GameError> {
    let monster = select_monster(level, rng)?;
    Ok(Encounter::new(id, monster))
}

/// Player half-round. A lethal strike moves the encounter to
/// `Resolving(Victory)`.
pub fn player_strike(encounter: &mut Encounter, stats: &DerivedStats, rng: &mut impl Rng) -> Strike {
    encounter.rounds += 1;
    let mut damage = strike_damage(stats.attack, encounter.monster.defense);
    let crit = roll_crit(stats.crit_chance, rng);
    if crit {
        damage = apply_crit(damage);
    }
    encounter.enemy_hp = encounter.enemy_hp.saturating_sub(damage);

    let lethal = !encounter.enemy_alive();
    if lethal {
        encounter.phase = EncounterPhase::Resolving(CombatOutcome::Victory);
    }
    Strike { damage, crit, lethal }
}

/// Monster half-round. A lethal strike moves the encounter to
/// `Resolving(Defeat)`.
pub fn monster_strike(encounter: &mut Encounter, character: &mut Character, stats: &DerivedStats) -> Strike {
    let damage = strike_damage(encounter.monster.attack, stats.defense);
    character.attributes.take_damage(damage);

    let lethal = !character.attributes.is_alive();
    if lethal {
        encounter.phase = EncounterPhase::Resolving(CombatOutcome::Defeat);
    }
    Strike {
        damage,
        crit: false,
        lethal,
    }
}

fn roll_quantity(rate: f64, min: u64, max: u64, rng: &mut impl Rng) -> u64 {
    if rng.gen::<f64>() < rate {
        rng.gen_range(min..=max)
    } else {
        0
    }
}

/// Roll the two independent drops and the equipment drop.
pub fn roll_victory_loot(
    monster: &Monster,
    realm: Realm,
    item_serial: u64,
    rng: &mut impl Rng,
) -> VictoryLoot {
    let rare_currency = roll_quantity(
        monster.drop_rates.rare_currency,
        RARE_CURRENCY_DROP_MIN,
        RARE_CURRENCY_DROP_MAX,
        rng,
    );
    let consumables = roll_quantity(
        monster.drop_rates.consumable,
        CONSUMABLE_DROP_MIN,
        CONSUMABLE_DROP_MAX,
        rng,
    );
    VictoryLoot {
        experience: monster.exp_reward,
        currency: monster.currency_reward,
        rare_currency,
        consumables,
        equipment: roll_equipment_drop(realm, item_serial, rng),
    }
}

/// Partial recovery after a defeat: `hp = floor(max_hp * 0.5)`.
pub fn apply_defeat(character: &mut Character) {
    let attrs = &mut character.attributes;
    attrs.hp = (f64::from(attrs.max_hp) * DEFEAT_RECOVERY_RATIO).floor() as u32;
}
