//! Balance numbers shared by combat, progression and the economy.
//!
//! Timing lives in [`super::config::GameConfig`]; everything here is fixed
//! game design.

// =============================================================================
// LEVELING & REALMS
// =============================================================================

/// Experience per character level: `level = exp / EXP_PER_LEVEL + 1`.
pub const EXP_PER_LEVEL: u64 = 100;

/// Experience step used by the realm target formula.
pub const EXP_PER_REALM_STEP: u64 = 200;

/// Flat attack gained on each realm breakthrough.
pub const BREAKTHROUGH_ATTACK: u32 = 5;

/// Flat defense gained on each realm breakthrough.
pub const BREAKTHROUGH_DEFENSE: u32 = 3;

/// Max HP (and current HP) gained on each realm breakthrough.
pub const BREAKTHROUGH_HP: u32 = 50;

/// Age-limit gain on breakthrough: `BASE + PER_REALM * new_realm_index`.
pub const AGE_LIMIT_GAIN_BASE: u32 = 50;
pub const AGE_LIMIT_GAIN_PER_REALM: u32 = 20;

/// Years that pass per resolved encounter.
pub const AGE_PER_ENCOUNTER: u32 = 1;

// =============================================================================
// CHARACTER CREATION
// =============================================================================

pub const BASE_ATTACK: f64 = 10.0;
pub const BASE_DEFENSE: f64 = 5.0;
pub const BASE_HP: f64 = 100.0;
pub const BASE_CRIT_CHANCE: f64 = 0.05;

pub const STARTING_AGE: u32 = 16;
pub const STARTING_AGE_LIMIT: u32 = 100;

pub const STARTING_CURRENCY: u64 = 100;
pub const STARTING_RARE_CURRENCY: u64 = 10;
pub const STARTING_CONSUMABLES: u64 = 5;

pub const CHARACTER_NAME_MAX_LENGTH: usize = 16;

// =============================================================================
// COMBAT
// =============================================================================

/// Monsters up to `character.level + MONSTER_LEVEL_WINDOW` are eligible.
pub const MONSTER_LEVEL_WINDOW: u32 = 5;

pub const CRIT_MULTIPLIER: f64 = 1.5;

/// On defeat HP is set to `floor(max_hp * DEFEAT_RECOVERY_RATIO)`.
pub const DEFEAT_RECOVERY_RATIO: f64 = 0.5;

/// HP restored after each victory (clamped to max).
pub const VICTORY_HP_RECOVERY: u32 = 10;

/// Rare-currency drop quantity (inclusive).
pub const RARE_CURRENCY_DROP_MIN: u64 = 1;
pub const RARE_CURRENCY_DROP_MAX: u64 = 3;

/// Consumable drop quantity (inclusive).
pub const CONSUMABLE_DROP_MIN: u64 = 1;
pub const CONSUMABLE_DROP_MAX: u64 = 2;

/// Independent chance per victory to drop a catalog equipment piece.
pub const EQUIPMENT_DROP_CHANCE: f64 = 0.05;

/// Equipment tiers available as loot: `realm_index / 3 + 1`, capped at this.
pub const MAX_EQUIPMENT_TIER: u32 = 3;

pub const COMBAT_LOG_CAPACITY: usize = 10;

// =============================================================================
// ECONOMY
// =============================================================================

/// Experience granted per consumable used.
pub const CONSUMABLE_EXP: u64 = 50;

/// Sell price = `price / SELL_PRICE_DIVISOR`.
pub const SELL_PRICE_DIVISOR: u64 = 2;

// =============================================================================
// PERSISTENCE
// =============================================================================

pub const SAVE_FILE_NAME: &str = "save.json";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const EXPORT_FILE_PREFIX: &str = "xianxia";
