//! Core types shared by the engine, the AI and the session

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of an encounter an actor fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Npc,
}

impl Side {
    /// The opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Npc,
            Side::Npc => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Npc => write!(f, "npc"),
        }
    }
}

/// Delivery of an attack, selecting which power stat is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackKind {
    Melee,
    Ranged,
}

impl AttackKind {
    /// Verb used in combat log lines
    pub fn verb(self) -> &'static str {
        match self {
            AttackKind::Melee => "strikes",
            AttackKind::Ranged => "shoots",
        }
    }
}

/// A choice made by an actor on its turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Action {
    Attack(AttackKind),
    Defend,
    /// Use an inventory item, identified by its stacking name
    UseItem(String),
    /// Pass the turn
    None,
}

impl Action {
    /// Whether this action deals damage
    pub fn is_offensive(&self) -> bool {
        matches!(self, Action::Attack(_))
    }
}

/// Status effects an actor may carry
///
/// These are preserved across turns but have no effect on damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusEffect {
    Poisoned,
    Burning,
    Weakened,
    Strengthened,
    Regenerating,
    Slowed,
    Fast,
}

impl StatusEffect {
    /// Get all status effects
    pub fn all() -> &'static [StatusEffect] {
        &[
            StatusEffect::Poisoned,
            StatusEffect::Burning,
            StatusEffect::Weakened,
            StatusEffect::Strengthened,
            StatusEffect::Regenerating,
            StatusEffect::Slowed,
            StatusEffect::Fast,
        ]
    }
}
