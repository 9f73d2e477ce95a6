//! Progression resolver: experience, levels, realm breakthroughs, aging and
//! the age-limit game-over check.
//!
//! Both entry points are pure: they take the character by reference and
//! return the updated copy together with what happened, so the caller can
//! decide how to surface it.

use super::attributes::StatBonus;
use super::types::{Character, Realm};
use crate::core::constants::{
    AGE_LIMIT_GAIN_BASE, AGE_LIMIT_GAIN_PER_REALM, AGE_PER_ENCOUNTER, BREAKTHROUGH_ATTACK,
    BREAKTHROUGH_DEFENSE, BREAKTHROUGH_HP, EXP_PER_REALM_STEP,
};

/// Attribute gain applied by every breakthrough.
pub const BREAKTHROUGH_BONUS: StatBonus =
    StatBonus::new(BREAKTHROUGH_ATTACK, BREAKTHROUGH_DEFENSE, BREAKTHROUGH_HP, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakthrough {
    pub from: Realm,
    pub to: Realm,
    pub age_limit_gain: u32,
}

/// Outcome of one progression step.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub character: Character,
    pub experience_gained: u64,
    pub leveled_up: bool,
    pub breakthrough: Option<Breakthrough>,
    pub game_over: bool,
}

/// Realm index the experience formally justifies:
/// `min(current + floor(exp / 200), last)`.
pub fn realm_target_index(current: Realm, experience: u64) -> usize {
    let steps = usize::try_from(experience / EXP_PER_REALM_STEP).unwrap_or(usize::MAX);
    current.index().saturating_add(steps).min(Realm::LAST.index())
}

/// Age-limit gained when stepping into the realm at `new_index`.
pub fn age_limit_gain(new_index: usize) -> u32 {
    AGE_LIMIT_GAIN_BASE + AGE_LIMIT_GAIN_PER_REALM * new_index as u32
}

pub fn can_break_through(character: &Character) -> bool {
    realm_target_index(character.realm, character.experience) > character.realm.index()
}

/// Step at most one realm up. Surplus experience stays and is re-evaluated
/// on the next call.
pub fn apply_breakthrough(character: &mut Character) -> Option<Breakthrough> {
    if !can_break_through(character) {
        return None;
    }
    let from = character.realm;
    let to = from.next()?;
    let gain = age_limit_gain(to.index());

    character.realm = to;
    character.age_limit = character.age_limit.saturating_add(gain);
    character.attributes.raise(&BREAKTHROUGH_BONUS);

    Some(Breakthrough {
        from,
        to,
        age_limit_gain: gain,
    })
}

/// Age limit reached, not at the final realm, and no breakthrough pending.
pub fn is_game_over(character: &Character) -> bool {
    character.age >= character.age_limit
        && !character.realm.is_final()
        && !can_break_through(character)
}

/// Resolve a victory worth `exp_gained`.
pub fn resolve_victory(character: &Character, exp_gained: u64) -> Resolution {
    let mut next = character.clone();
    let leveled_up = next.gain_experience(exp_gained);
    let breakthrough = apply_breakthrough(&mut next);
    next.age = next.age.saturating_add(AGE_PER_ENCOUNTER);
    let game_over = is_game_over(&next);

    Resolution {
        character: next,
        experience_gained: exp_gained,
        leveled_up,
        breakthrough,
        game_over,
    }
}

/// Resolve a defeat: time still passes, nothing else advances.
pub fn resolve_defeat(character: &Character) -> Resolution {
    let mut next = character.clone();
    next.age = next.age.saturating_add(AGE_PER_ENCOUNTER);
    let game_over = is_game_over(&next);

    Resolution {
        character: next,
        experience_gained: 0,
        leveled_up: false,
        breakthrough: None,
        game_over,
    }
}
