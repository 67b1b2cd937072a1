//! Mitigation - Defend guard bonus and armor subtraction

use crate::config::{DefendConstants, MissRule};

/// Extra armor granted by defending
///
/// `armor / divisor`, floored, but never below `min_guard`. Zero when not defending.
pub fn guard_bonus(armor: i32, defending: bool, constants: &DefendConstants) -> i32 {
    if !defending {
        return 0;
    }
    armor
        .checked_div(constants.armor_divisor)
        .unwrap_or(0)
        .max(constants.min_guard)
}

/// Armor used for one resolution, including any guard bonus
///
/// The actor's stored armor is never modified; the bonus only exists in
/// this return value. Saturates at `i32::MAX`.
pub fn effective_armor(armor: i32, defending: bool, constants: &DefendConstants) -> i32 {
    armor.saturating_add(guard_bonus(armor, defending, constants))
}

/// Power minus armor, shifted by the spread roll. May be zero or negative.
pub fn raw_damage(power: i32, effective_armor: i32, spread_roll: i32) -> i32 {
    power
        .saturating_sub(effective_armor)
        .saturating_add(spread_roll)
}

/// Damage actually applied for a raw value under the given miss rule
pub fn final_damage(raw: i32, rule: MissRule, min_damage: i32) -> i32 {
    match rule {
        MissRule::FloorBeforeCheck => raw.max(min_damage),
        MissRule::CheckBeforeFloor => raw.max(0),
    }
}
