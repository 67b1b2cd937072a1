//! Actor - A combat participant (player character or NPC)

mod inventory;
mod status;

pub use inventory::{Inventory, Item};
pub use status::StatusEffects;

use crate::types::{AttackKind, Side};
use serde::{Deserialize, Serialize};

/// Combat-relevant state of one participant
///
/// Health is kept private so every change goes through a clamping method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    // === Identity ===
    pub name: String,
    pub side: Side,

    // === Combat Attributes ===
    pub melee_power: i32,
    pub ranged_power: i32,
    pub armor: i32,
    pub initiative: i32,

    // === Vitals ===
    health: i32,
    max_health: i32,

    // === Transient ===
    #[serde(default)]
    is_defending: bool,
    #[serde(default)]
    pub status: StatusEffects,

    /// Only player-controlled actors carry an inventory
    #[serde(default)]
    inventory: Option<Inventory>,
}

impl Actor {
    /// Create an actor at full health with zeroed combat attributes
    pub fn new(name: impl Into<String>, side: Side, max_health: i32) -> Self {
        Actor {
            name: name.into(),
            side,
            melee_power: 0,
            ranged_power: 0,
            armor: 0,
            initiative: 0,
            health: max_health,
            max_health,
            is_defending: false,
            status: StatusEffects::default(),
            inventory: None,
        }
    }

    pub fn with_melee(mut self, power: i32) -> Self {
        self.melee_power = power;
        self
    }

    pub fn with_ranged(mut self, power: i32) -> Self {
        self.ranged_power = power;
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_initiative(mut self, initiative: i32) -> Self {
        self.initiative = initiative;
        self
    }

    /// Set current health, clamped to `[0, max_health]`
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, self.max_health);
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = Some(inventory);
        self
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= self.max_health
    }

    /// Health as a percentage of max health
    pub fn health_percent(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64 * 100.0
    }

    pub fn is_defending(&self) -> bool {
        self.is_defending
    }

    pub(crate) fn set_defending(&mut self, defending: bool) {
        self.is_defending = defending;
    }

    /// Power stat used for an attack of the given kind
    pub fn power(&self, kind: AttackKind) -> i32 {
        match kind {
            AttackKind::Melee => self.melee_power,
            AttackKind::Ranged => self.ranged_power,
        }
    }

    /// The attack kind backed by the higher power (melee on ties)
    pub fn preferred_attack(&self) -> AttackKind {
        if self.ranged_power > self.melee_power {
            AttackKind::Ranged
        } else {
            AttackKind::Melee
        }
    }

    /// Reduce health, returning the actual reduction after clamping
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_sub(amount.max(0)).clamp(0, self.max_health);
        self.assert_invariants();
        before - self.health
    }

    /// Restore health, returning the amount actually healed
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = self.health.saturating_add(amount.max(0)).clamp(0, self.max_health);
        self.assert_invariants();
        self.health - before
    }

    pub fn inventory(&self) -> Option<&Inventory> {
        self.inventory.as_ref()
    }

    pub fn inventory_mut(&mut self) -> Option<&mut Inventory> {
        self.inventory.as_mut()
    }

    /// Check the record is usable in an encounter
    ///
    /// Returns a description of the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_health <= 0 {
            return Err(format!("{} has non-positive max health {}", self.name, self.max_health));
        }
        if !(0..=self.max_health).contains(&self.health) {
            return Err(format!(
                "{} has health {} outside [0, {}]",
                self.name, self.health, self.max_health
            ));
        }
        if self.armor < 0 {
            return Err(format!("{} has negative armor {}", self.name, self.armor));
        }
        if !self.is_alive() {
            return Err(format!("{} is already dead", self.name));
        }
        if let Some(item) = self.inventory().and_then(|inv| inv.find_invalid()) {
            return Err(format!(
                "{} carries unusable item {} (heals {}, x{})",
                self.name, item.name, item.heal_amount, item.quantity
            ));
        }
        Ok(())
    }

    /// Panic if health or armor left their valid ranges
    pub(crate) fn assert_invariants(&self) {
        assert!(
            (0..=self.max_health).contains(&self.health),
            "{} health {} outside [0, {}]",
            self.name,
            self.health,
            self.max_health
        );
        assert!(self.armor >= 0, "{} armor went negative: {}", self.name, self.armor);
    }
}
