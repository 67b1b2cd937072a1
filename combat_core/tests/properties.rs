//! Property tests for the resolution engine invariants

use combat_core::prelude::*;
use combat_core::{
    resolve_attack, resolve_defend, resolve_item_use, ItemRejection, MissRule, StatusEffect,
    StatusEffects,
};
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = AttackKind> {
    prop_oneof![Just(AttackKind::Melee), Just(AttackKind::Ranged)]
}

fn status_strategy() -> impl Strategy<Value = StatusEffects> {
    prop::collection::vec(any::<bool>(), StatusEffect::all().len()).prop_map(|flags| {
        let mut status = StatusEffects::default();
        for (effect, active) in StatusEffect::all().iter().zip(flags) {
            status.set(*effect, active);
        }
        status
    })
}

proptest! {
    #[test]
    fn test_health_stays_clamped(
        max_health in 1i32..500,
        changes in prop::collection::vec(-300i32..300, 0..40),
    ) {
        let mut actor = Actor::new("A", Side::Npc, max_health);
        for change in changes {
            if change < 0 {
                actor.take_damage(-change);
            } else {
                actor.heal(change);
            }
            prop_assert!(actor.health() >= 0);
            prop_assert!(actor.health() <= actor.max_health());
        }
    }

    #[test]
    fn test_default_rule_always_lands(
        seed in any::<u64>(),
        power in 0i32..40,
        armor in 0i32..60,
        health in 1i32..200,
        defending in any::<bool>(),
        kind in kind_strategy(),
    ) {
        let attacker = Actor::new("A", Side::Player, 10).with_melee(power).with_ranged(power);
        let mut defender = Actor::new("D", Side::Npc, health).with_armor(armor);
        if defending {
            resolve_defend(&mut defender);
        }

        let outcome = resolve_attack(
            &attacker,
            &mut defender,
            kind,
            &mut CombatRng::seeded(seed),
            &CombatConstants::default(),
        );

        prop_assert!(outcome.damage_dealt >= 1);
        prop_assert!(!outcome.was_miss);
        prop_assert!(defender.health() < health);
    }

    #[test]
    fn test_defending_never_increases_damage(
        seed in any::<u64>(),
        power in 0i32..40,
        armor in 0i32..40,
        kind in kind_strategy(),
    ) {
        let attacker = Actor::new("A", Side::Player, 10).with_melee(power).with_ranged(power);
        let constants = CombatConstants::default();

        let mut open = Actor::new("D", Side::Npc, 100).with_armor(armor);
        let mut rng = CombatRng::seeded(seed);
        let plain = resolve_attack(&attacker, &mut open, kind, &mut rng, &constants);

        let mut guarded = Actor::new("D", Side::Npc, 100).with_armor(armor);
        resolve_defend(&mut guarded);
        let mut rng = CombatRng::seeded(seed);
        let defended = resolve_attack(&attacker, &mut guarded, kind, &mut rng, &constants);

        prop_assert_eq!(plain.spread_roll, defended.spread_roll);
        prop_assert!(defended.damage_dealt <= plain.damage_dealt);
    }

    #[test]
    fn test_attack_leaves_armor_untouched(
        seed in any::<u64>(),
        attacker_armor in 0i32..50,
        defender_armor in 0i32..50,
        defending in any::<bool>(),
        check_before_floor in any::<bool>(),
    ) {
        let mut constants = CombatConstants::default();
        if check_before_floor {
            constants.damage.miss_rule = MissRule::CheckBeforeFloor;
        }
        let attacker = Actor::new("A", Side::Player, 10).with_melee(6).with_armor(attacker_armor);
        let mut defender = Actor::new("D", Side::Npc, 30).with_armor(defender_armor);
        if defending {
            resolve_defend(&mut defender);
        }

        let mut rng = CombatRng::seeded(seed);
        resolve_attack(&attacker, &mut defender, AttackKind::Melee, &mut rng, &constants);

        prop_assert_eq!(attacker.armor, attacker_armor);
        prop_assert_eq!(defender.armor, defender_armor);
    }

    #[test]
    fn test_full_health_rejection_is_idempotent(
        max_health in 1i32..200,
        quantity in 1u32..10,
        attempts in 1usize..10,
    ) {
        let inventory: Inventory =
            vec![Item::new("Health Potion", 20, quantity)].into_iter().collect();
        let mut actor = Actor::new("P", Side::Player, max_health).with_inventory(inventory);
        let before = actor.clone();

        for _ in 0..attempts {
            let outcome = resolve_item_use(&mut actor, "Health Potion");
            prop_assert_eq!(outcome.rejected, Some(ItemRejection::FullHealth));
        }
        prop_assert_eq!(actor, before);
    }

    #[test]
    fn test_repeated_item_use_depletes(
        quantity in 1u32..8,
        heal in 1i32..10,
    ) {
        let inventory: Inventory = vec![Item::new("Salve", heal, quantity)].into_iter().collect();
        let mut actor = Actor::new("P", Side::Player, 1000)
            .with_health(1)
            .with_inventory(inventory);

        let mut used = 0;
        for _ in 0..quantity + 3 {
            let outcome = resolve_item_use(&mut actor, "Salve");
            if outcome.is_rejected() {
                prop_assert_eq!(outcome.rejected, Some(ItemRejection::UnknownItem));
            } else {
                used += 1;
            }
            if let Some(item) = actor.inventory().and_then(|inv| inv.get("Salve")) {
                prop_assert!(item.quantity > 0);
            }
        }

        prop_assert_eq!(used, quantity);
        prop_assert!(actor.inventory().unwrap().get("Salve").is_none());
        prop_assert_eq!(actor.health(), 1 + heal * quantity as i32);
    }

    #[test]
    fn test_resolution_preserves_status(
        seed in any::<u64>(),
        attacker_status in status_strategy(),
        defender_status in status_strategy(),
        kind in kind_strategy(),
        defending in any::<bool>(),
    ) {
        let mut attacker = Actor::new("A", Side::Player, 50)
            .with_melee(9)
            .with_ranged(7)
            .with_health(20)
            .with_inventory(vec![Item::health_potion(1)].into_iter().collect());
        attacker.status = attacker_status;
        let mut defender = Actor::new("D", Side::Npc, 40).with_armor(3);
        defender.status = defender_status;

        if defending {
            resolve_defend(&mut defender);
        }
        let mut rng = CombatRng::seeded(seed);
        resolve_attack(&attacker, &mut defender, kind, &mut rng, &CombatConstants::default());
        resolve_item_use(&mut attacker, "Health Potion");
        resolve_item_use(&mut defender, "Health Potion");

        prop_assert_eq!(attacker.status, attacker_status);
        prop_assert_eq!(defender.status, defender_status);
    }
}
