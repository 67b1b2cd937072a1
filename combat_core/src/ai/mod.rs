//! AI decision - Choosing an NPC action each turn

use crate::actor::Actor;
use crate::config::{AiConstants, PassiveAction};
use crate::rng::CombatRng;
use crate::types::Action;
use tracing::debug;

/// Anything that can pick an action for an actor
///
/// Consulted once per turn. Implementations may be smarter than the default
/// without the session needing to change.
pub trait AiPolicy {
    /// Short identifier for logs and menus
    fn name(&self) -> &str;

    /// Choose an action for `me` against `opponent`
    fn choose(&self, me: &Actor, opponent: &Actor, rng: &mut CombatRng) -> Action;
}

/// Default policy: sometimes hold back, otherwise attack with the stronger stat
///
/// With `passive_chance` percent probability the actor takes its passive
/// action (defend or wait), else it attacks using whichever of melee or
/// ranged power is higher. Stateless and without look-ahead.
#[derive(Debug, Clone)]
pub struct PassiveChancePolicy {
    pub passive_chance: i32,
    pub passive_action: PassiveAction,
}

impl PassiveChancePolicy {
    pub fn new(constants: &AiConstants) -> Self {
        PassiveChancePolicy {
            passive_chance: constants.passive_chance,
            passive_action: constants.passive_action,
        }
    }
}

impl Default for PassiveChancePolicy {
    fn default() -> Self {
        Self::new(&AiConstants::default())
    }
}

impl AiPolicy for PassiveChancePolicy {
    fn name(&self) -> &str {
        "passive_chance"
    }

    fn choose(&self, me: &Actor, opponent: &Actor, rng: &mut CombatRng) -> Action {
        let action = if rng.chance(self.passive_chance) {
            match self.passive_action {
                PassiveAction::Defend => Action::Defend,
                PassiveAction::Wait => Action::None,
            }
        } else {
            Action::Attack(me.preferred_attack())
        };

        debug!(actor = %me.name, target = %opponent.name, ?action, "ai chose action");
        action
    }
}

/// Always attacks with the stronger stat
#[derive(Debug, Clone, Default)]
pub struct AggressivePolicy;

impl AiPolicy for AggressivePolicy {
    fn name(&self) -> &str {
        "aggressive"
    }

    fn choose(&self, me: &Actor, _opponent: &Actor, _rng: &mut CombatRng) -> Action {
        Action::Attack(me.preferred_attack())
    }
}

/// Choose an NPC action with the default policy
pub fn ai_choose(me: &Actor, opponent: &Actor, rng: &mut CombatRng) -> Action {
    PassiveChancePolicy::default().choose(me, opponent, rng)
}
