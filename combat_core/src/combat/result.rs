//! Outcomes of resolving a single action

use crate::types::AttackKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of one attack against a defender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub kind: AttackKind,

    // === Damage Breakdown ===
    /// Attacker power used for this attack
    pub base_power: i32,
    /// Spread roll added to the raw damage
    pub spread_roll: i32,
    /// Extra armor from the defender's guard (0 when not defending)
    pub guard_bonus: i32,
    /// Armor including guard
    pub effective_armor: i32,
    /// Damage before the floor/miss rule
    pub raw_damage: i32,
    /// Damage after the floor/miss rule
    pub damage_dealt: i32,

    // === State Changes ===
    pub defender_health_before: i32,
    pub defender_remaining_health: i32,

    // === Flags ===
    /// Health did not drop at all
    pub was_miss: bool,
    pub is_killing_blow: bool,

    /// Human-readable line for the combat log
    pub log_line: String,
}

impl AttackOutcome {
    /// Health actually removed from the defender
    pub fn health_lost(&self) -> i32 {
        self.defender_health_before - self.defender_remaining_health
    }

    /// Damage absorbed by armor and guard
    pub fn mitigated(&self) -> i32 {
        (self.base_power + self.spread_roll - self.raw_damage).max(0)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.was_miss {
            parts.push("Miss".to_string());
        } else {
            parts.push(format!("{} damage", self.damage_dealt));
        }

        if self.guard_bonus > 0 {
            parts.push(format!("+{} guard", self.guard_bonus));
        }

        if self.mitigated() > 0 {
            parts.push(format!("{} mitigated", self.mitigated()));
        }

        if self.is_killing_blow {
            parts.push("FATAL".to_string());
        }

        parts.join(", ")
    }
}

/// Why an item use was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemRejection {
    #[error("already at full health")]
    FullHealth,
    #[error("no inventory to use items from")]
    NoInventory,
    #[error("item is not in the inventory")]
    UnknownItem,
    #[error("item has no uses left")]
    Depleted,
    #[error("item does not heal")]
    Inert,
}

/// Result of trying to use a healing item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcome {
    pub item: String,
    /// Health actually restored
    pub healed: i32,
    pub rejected: Option<ItemRejection>,
    /// Log line for a successful use, empty when rejected
    pub log_line: String,
}

impl ItemOutcome {
    pub(crate) fn rejected(item: &str, reason: ItemRejection) -> Self {
        ItemOutcome {
            item: item.to_string(),
            healed: 0,
            rejected: Some(reason),
            log_line: String::new(),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected.is_some()
    }
}
