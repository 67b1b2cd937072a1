//! Action resolution - Apply one chosen action to the actors

use super::mitigation::{effective_armor, final_damage, guard_bonus, raw_damage};
use super::result::{AttackOutcome, ItemOutcome, ItemRejection};
use crate::actor::Actor;
use crate::config::CombatConstants;
use crate::rng::CombatRng;
use crate::types::{Action, AttackKind};
use tracing::debug;

/// What happened when an action was resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Attack(AttackOutcome),
    Defend { log_line: String },
    Item(ItemOutcome),
    Pass { log_line: String },
}

impl Resolution {
    /// Lines to append to the combat log (none for a rejected item)
    pub fn log_lines(&self) -> Vec<String> {
        match self {
            Resolution::Attack(outcome) => vec![outcome.log_line.clone()],
            Resolution::Defend { log_line } | Resolution::Pass { log_line } => {
                vec![log_line.clone()]
            }
            Resolution::Item(outcome) if outcome.is_rejected() => Vec::new(),
            Resolution::Item(outcome) => vec![outcome.log_line.clone()],
        }
    }
}

/// Resolve an attack against a defender
///
/// 1. Adds the defender's guard bonus to its armor if it is defending
/// 2. Rolls the damage spread and subtracts effective armor from the attacker's power
/// 3. Applies the floor/miss rule
/// 4. Removes health from the defender, clamped to `[0, max_health]`
///
/// Only the defender's health changes. Armor is read, never written, so it is
/// identical before and after the call on every path.
pub fn resolve_attack(
    attacker: &Actor,
    defender: &mut Actor,
    kind: AttackKind,
    rng: &mut CombatRng,
    constants: &CombatConstants,
) -> AttackOutcome {
    let defending = defender.is_defending();
    let guard = guard_bonus(defender.armor, defending, &constants.defend);
    let armor = effective_armor(defender.armor, defending, &constants.defend);

    let base_power = attacker.power(kind);
    let spread = constants.damage.spread;
    let spread_roll = rng.uniform(-spread, spread);

    let raw = raw_damage(base_power, armor, spread_roll);
    let damage = final_damage(raw, constants.damage.miss_rule, constants.damage.min_damage);

    let health_before = defender.health();
    let lost = defender.take_damage(damage);
    let was_miss = lost == 0;

    let log_line = if was_miss {
        format!(
            "{} misses {} ({}: {}/{} HP)",
            attacker.name,
            defender.name,
            defender.name,
            defender.health(),
            defender.max_health()
        )
    } else {
        format!(
            "{} {} {} for {} damage{} ({}: {}/{} HP)",
            attacker.name,
            kind.verb(),
            defender.name,
            damage,
            if guard > 0 { " through their guard" } else { "" },
            defender.name,
            defender.health(),
            defender.max_health()
        )
    };

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        ?kind,
        base_power,
        spread_roll,
        guard,
        raw,
        damage,
        remaining = defender.health(),
        "attack resolved"
    );

    AttackOutcome {
        kind,
        base_power,
        spread_roll,
        guard_bonus: guard,
        effective_armor: armor,
        raw_damage: raw,
        damage_dealt: damage,
        defender_health_before: health_before,
        defender_remaining_health: defender.health(),
        was_miss,
        is_killing_blow: health_before > 0 && !defender.is_alive(),
        log_line,
    }
}

/// Raise an actor's guard until the start of its next turn
pub fn resolve_defend(actor: &mut Actor) -> String {
    actor.set_defending(true);
    debug!(actor = %actor.name, "defending");
    format!("{} takes a defensive stance", actor.name)
}

/// Use one unit of a healing item from the actor's inventory
///
/// Rejected without side effects when the actor has no inventory, the item is
/// missing, empty or heals nothing, or the actor is already at full health.
pub fn resolve_item_use(actor: &mut Actor, item_name: &str) -> ItemOutcome {
    let rejection = match actor.inventory().map(|inv| inv.get(item_name)) {
        None => Some(ItemRejection::NoInventory),
        Some(None) => Some(ItemRejection::UnknownItem),
        Some(Some(item)) if item.quantity == 0 => Some(ItemRejection::Depleted),
        Some(Some(item)) if item.heal_amount <= 0 => Some(ItemRejection::Inert),
        Some(Some(_)) if actor.is_full_health() => Some(ItemRejection::FullHealth),
        Some(Some(_)) => None,
    };

    if let Some(reason) = rejection {
        debug!(actor = %actor.name, item = item_name, %reason, "item use rejected");
        return ItemOutcome::rejected(item_name, reason);
    }

    let heal_amount = match actor.inventory_mut().and_then(|inv| inv.consume_one(item_name)) {
        Some(amount) => amount,
        None => return ItemOutcome::rejected(item_name, ItemRejection::Depleted),
    };
    let healed = actor.heal(heal_amount);

    debug!(actor = %actor.name, item = item_name, healed, "item used");

    ItemOutcome {
        item: item_name.to_string(),
        healed,
        rejected: None,
        log_line: format!(
            "{} uses {} and recovers {} HP ({}/{} HP)",
            actor.name,
            item_name,
            healed,
            actor.health(),
            actor.max_health()
        ),
    }
}

/// Dispatch an action taken by `actor` against `opponent`
pub fn resolve_action(
    action: &Action,
    actor: &mut Actor,
    opponent: &mut Actor,
    rng: &mut CombatRng,
    constants: &CombatConstants,
) -> Resolution {
    match action {
        Action::Attack(kind) => {
            Resolution::Attack(resolve_attack(actor, opponent, *kind, rng, constants))
        }
        Action::Defend => Resolution::Defend {
            log_line: resolve_defend(actor),
        },
        Action::UseItem(name) => Resolution::Item(resolve_item_use(actor, name)),
        Action::None => Resolution::Pass {
            log_line: format!("{} hesitates", actor.name),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::{Inventory, Item};
    use crate::config::MissRule;
    use crate::types::Side;

    fn hero() -> Actor {
        Actor::new("P", Side::Player, 20).with_melee(5).with_ranged(3).with_armor(2)
    }

    fn zombie() -> Actor {
        Actor::new("Z", Side::Npc, 10).with_melee(4).with_armor(1)
    }

    fn no_spread() -> CombatConstants {
        let mut constants = CombatConstants::default();
        constants.damage.spread = 0;
        constants
    }

    #[test]
    fn test_basic_attack() {
        let attacker = hero();
        let mut defender = zombie();
        let mut rng = CombatRng::seeded(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &no_spread(),
        );

        // 5 power - 1 armor = 4
        assert_eq!(outcome.damage_dealt, 4);
        assert_eq!(defender.health(), 6);
        assert_eq!(outcome.defender_remaining_health, 6);
        assert!(!outcome.was_miss);
        assert!(outcome.log_line.contains("Z"));
        assert!(outcome.log_line.contains("6/10"));
    }

    #[test]
    fn test_ranged_uses_ranged_power() {
        let attacker = hero();
        let mut defender = zombie();
        let mut rng = CombatRng::seeded(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Ranged,
            &mut rng,
            &no_spread(),
        );

        // 3 power - 1 armor = 2
        assert_eq!(outcome.damage_dealt, 2);
        assert!(outcome.log_line.contains("shoots"));
    }

    #[test]
    fn test_defending_adds_guard() {
        let attacker = hero();
        let mut defender = zombie();
        resolve_defend(&mut defender);
        let mut rng = CombatRng::seeded(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &no_spread(),
        );

        // guard = max(1 / 5, 2) = 2, effective armor 3, damage 2
        assert_eq!(outcome.guard_bonus, 2);
        assert_eq!(outcome.damage_dealt, 2);
        assert_eq!(defender.armor, 1);
    }

    #[test]
    fn test_minimum_damage_floor() {
        let attacker = Actor::new("Weakling", Side::Npc, 5).with_melee(1);
        let mut defender = hero().with_armor(50);
        let mut rng = CombatRng::seeded(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &CombatConstants::default(),
        );

        assert_eq!(outcome.damage_dealt, 1);
        assert!(!outcome.was_miss);
        assert_eq!(defender.health(), 19);
    }

    #[test]
    fn test_check_before_floor_can_miss() {
        let attacker = Actor::new("Weakling", Side::Npc, 5).with_melee(1);
        let mut defender = hero().with_armor(50);
        let mut rng = CombatRng::seeded(1);
        let mut constants = CombatConstants::default();
        constants.damage.miss_rule = MissRule::CheckBeforeFloor;

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &constants,
        );

        assert!(outcome.was_miss);
        assert_eq!(outcome.damage_dealt, 0);
        assert_eq!(defender.health(), 20);
        assert!(outcome.log_line.contains("misses"));
    }

    #[test]
    fn test_killing_blow_clamps() {
        let attacker = Actor::new("Brute", Side::Npc, 30).with_melee(50);
        let mut defender = zombie();
        let mut rng = CombatRng::seeded(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &CombatConstants::default(),
        );

        assert!(outcome.is_killing_blow);
        assert_eq!(defender.health(), 0);
        assert!(!defender.is_alive());
        assert_eq!(outcome.health_lost(), 10);
    }

    #[test]
    fn test_max_armor_while_defending() {
        let attacker = hero();
        let mut defender = zombie().with_armor(i32::MAX);
        assert!(defender.validate().is_ok());
        resolve_defend(&mut defender);
        let mut rng = CombatRng::seeded(1);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &CombatConstants::default(),
        );

        assert_eq!(outcome.effective_armor, i32::MAX);
        assert_eq!(outcome.damage_dealt, 1);
        assert_eq!(defender.health(), 9);
        assert_eq!(defender.armor, i32::MAX);

        let mut constants = CombatConstants::default();
        constants.damage.miss_rule = MissRule::CheckBeforeFloor;
        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &constants,
        );
        assert!(outcome.was_miss);
        assert_eq!(defender.health(), 9);
    }

    #[test]
    fn test_max_power_attack_clamps() {
        let attacker = Actor::new("Titan", Side::Npc, 10).with_melee(i32::MAX);
        let mut defender = zombie();
        let mut rng = CombatRng::seeded(3);

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            AttackKind::Melee,
            &mut rng,
            &CombatConstants::default(),
        );

        assert!(outcome.is_killing_blow);
        assert_eq!(outcome.health_lost(), 10);
        assert_eq!(defender.health(), 0);
    }

    #[test]
    fn test_defend_sets_flag() {
        let mut actor = zombie();
        assert!(!actor.is_defending());
        let line = resolve_defend(&mut actor);
        assert!(actor.is_defending());
        assert!(line.contains("Z"));
        assert_eq!(actor.health(), 10);
    }

    #[test]
    fn test_item_use_heals_and_consumes() {
        let mut actor = hero()
            .with_health(5)
            .with_inventory(vec![Item::health_potion(2)].into_iter().collect());

        let outcome = resolve_item_use(&mut actor, "Health Potion");

        assert!(!outcome.is_rejected());
        assert_eq!(outcome.healed, 15);
        assert_eq!(actor.health(), 20);
        assert_eq!(actor.inventory().unwrap().get("Health Potion").unwrap().quantity, 1);
    }

    #[test]
    fn test_item_use_rejected_at_full_health() {
        let mut actor = hero().with_inventory(vec![Item::health_potion(1)].into_iter().collect());

        let outcome = resolve_item_use(&mut actor, "Health Potion");

        assert_eq!(outcome.rejected, Some(ItemRejection::FullHealth));
        assert_eq!(actor.inventory().unwrap().get("Health Potion").unwrap().quantity, 1);
    }

    #[test]
    fn test_item_that_heals_nothing_is_rejected() {
        let json = r#"{"items":[{"name":"Dud","heal_amount":0,"quantity":1}]}"#;
        let inventory: Inventory = serde_json::from_str(json).unwrap();
        let mut actor = hero().with_health(5).with_inventory(inventory);
        let before = actor.clone();

        let outcome = resolve_item_use(&mut actor, "Dud");

        assert_eq!(outcome.rejected, Some(ItemRejection::Inert));
        assert_eq!(outcome.healed, 0);
        assert_eq!(actor, before);
    }

    #[test]
    fn test_item_use_rejections() {
        let mut npc = zombie().with_health(5);
        assert_eq!(
            resolve_item_use(&mut npc, "Health Potion").rejected,
            Some(ItemRejection::NoInventory)
        );

        let mut actor = hero().with_health(5).with_inventory(Inventory::new());
        assert_eq!(
            resolve_item_use(&mut actor, "Health Potion").rejected,
            Some(ItemRejection::UnknownItem)
        );
        assert_eq!(actor.health(), 5);
    }

    #[test]
    fn test_resolve_action_dispatch() {
        let mut actor = hero();
        let mut opponent = zombie();
        let mut rng = CombatRng::seeded(5);
        let constants = no_spread();

        let res = resolve_action(&Action::None, &mut actor, &mut opponent, &mut rng, &constants);
        assert!(matches!(res, Resolution::Pass { .. }));
        assert_eq!(res.log_lines().len(), 1);

        let res = resolve_action(&Action::Defend, &mut actor, &mut opponent, &mut rng, &constants);
        assert!(matches!(res, Resolution::Defend { .. }));
        assert!(actor.is_defending());

        let res = resolve_action(
            &Action::Attack(AttackKind::Melee),
            &mut actor,
            &mut opponent,
            &mut rng,
            &constants,
        );
        assert!(matches!(res, Resolution::Attack(_)));
        assert_eq!(opponent.health(), 6);

        let res = resolve_action(
            &Action::UseItem("Health Potion".to_string()),
            &mut actor,
            &mut opponent,
            &mut rng,
            &constants,
        );
        assert!(res.log_lines().is_empty());
    }
}
