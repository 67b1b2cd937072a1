//! Combat constants and tunable policy switches

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// Percent chance that the AI picks its passive action instead of attacking
pub const AI_PASSIVE_CHANCE: i32 = 25;

/// What the AI does when it does not attack
pub const AI_PASSIVE_ACTION: PassiveAction = PassiveAction::Defend;

/// A defending actor gains `armor / DEFEND_ARMOR_DIVISOR` extra armor...
pub const DEFEND_ARMOR_DIVISOR: i32 = 5;

/// ...but never less than this
pub const DEFEND_MIN_GUARD: i32 = 2;

/// Attack damage varies by up to this much either way
pub const DAMAGE_SPREAD: i32 = 2;

/// Floor applied to every damaging hit under [`MissRule::FloorBeforeCheck`]
pub const MIN_DAMAGE: i32 = 1;

/// Non-offensive choice the AI falls back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassiveAction {
    Defend,
    Wait,
}

/// Order of the minimum-damage floor and the miss check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissRule {
    /// Floor damage at [`MIN_DAMAGE`] first; attacks never miss
    #[default]
    FloorBeforeCheck,
    /// Raw damage at or below zero is a miss dealing nothing
    CheckBeforeFloor,
}

/// Who acts first when both initiatives are equal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    #[default]
    Player,
    Npc,
}

/// Tunable combat constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default)]
    pub ai: AiConstants,
    #[serde(default)]
    pub defend: DefendConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub initiative: InitiativeConstants,
}

impl CombatConstants {
    /// Parse constants from TOML and validate them
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::parse_toml(content)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Load constants from a TOML file and validate them
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let constants: CombatConstants = super::load_toml(path)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=100).contains(&self.ai.passive_chance) {
            return Err(ConfigError::ValidationError(format!(
                "ai.passive_chance must be within 0..=100, got {}",
                self.ai.passive_chance
            )));
        }
        if self.defend.armor_divisor <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "defend.armor_divisor must be positive, got {}",
                self.defend.armor_divisor
            )));
        }
        if self.defend.min_guard < 0 {
            return Err(ConfigError::ValidationError(format!(
                "defend.min_guard must not be negative, got {}",
                self.defend.min_guard
            )));
        }
        if self.damage.spread < 0 {
            return Err(ConfigError::ValidationError(format!(
                "damage.spread must not be negative, got {}",
                self.damage.spread
            )));
        }
        if self.damage.min_damage < 1 {
            return Err(ConfigError::ValidationError(format!(
                "damage.min_damage must be at least 1, got {}",
                self.damage.min_damage
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConstants {
    #[serde(default = "default_passive_chance")]
    pub passive_chance: i32,
    #[serde(default = "default_passive_action")]
    pub passive_action: PassiveAction,
}

impl Default for AiConstants {
    fn default() -> Self {
        AiConstants {
            passive_chance: AI_PASSIVE_CHANCE,
            passive_action: AI_PASSIVE_ACTION,
        }
    }
}

fn default_passive_chance() -> i32 {
    AI_PASSIVE_CHANCE
}
fn default_passive_action() -> PassiveAction {
    AI_PASSIVE_ACTION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefendConstants {
    #[serde(default = "default_armor_divisor")]
    pub armor_divisor: i32,
    #[serde(default = "default_min_guard")]
    pub min_guard: i32,
}

impl Default for DefendConstants {
    fn default() -> Self {
        DefendConstants {
            armor_divisor: DEFEND_ARMOR_DIVISOR,
            min_guard: DEFEND_MIN_GUARD,
        }
    }
}

fn default_armor_divisor() -> i32 {
    DEFEND_ARMOR_DIVISOR
}
fn default_min_guard() -> i32 {
    DEFEND_MIN_GUARD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageConstants {
    #[serde(default = "default_spread")]
    pub spread: i32,
    #[serde(default = "default_min_damage")]
    pub min_damage: i32,
    #[serde(default)]
    pub miss_rule: MissRule,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            spread: DAMAGE_SPREAD,
            min_damage: MIN_DAMAGE,
            miss_rule: MissRule::default(),
        }
    }
}

fn default_spread() -> i32 {
    DAMAGE_SPREAD
}
fn default_min_damage() -> i32 {
    MIN_DAMAGE
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitiativeConstants {
    #[serde(default)]
    pub tie_break: TieBreak,
}
