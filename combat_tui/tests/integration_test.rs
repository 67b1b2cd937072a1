//! Integration test: Load templates -> Spawn actors -> Fight -> Persist outcome
//!
//! This test walks one encounter through the public engine API the way the
//! terminal host drives it.

use combat_core::{
    default_templates, Action, Actor, AttackKind, CombatConstants, CombatError, CombatRng,
    CombatSession, CombatState, PassiveChancePolicy, Resolution, SessionOutcome, Side,
};

/// Helper to print a separator
fn separator(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("  {}", title);
    println!("{}\n", "=".repeat(60));
}

/// Helper to print an actor summary
fn print_actor(actor: &Actor) {
    println!("  Name: {} ({})", actor.name, actor.side);
    println!("    HP: {}/{}", actor.health(), actor.max_health());
    println!(
        "    Melee {} / Ranged {} / Armor {} / Initiative {}",
        actor.melee_power, actor.ranged_power, actor.armor, actor.initiative
    );
    if let Some(inventory) = actor.inventory() {
        for item in inventory.items() {
            println!("    - {} x{} (heals {})", item.name, item.quantity, item.heal_amount);
        }
    }
}

#[test]
fn test_full_encounter_flow() {
    separator("INTEGRATION TEST: Templates -> Session -> Outcome");

    // =========================================================================
    // STEP 1: Load templates
    // =========================================================================
    separator("STEP 1: Loading Templates");

    let templates = default_templates();
    assert!(!templates.players().is_empty());
    assert!(!templates.npcs().is_empty());
    println!(
        "  {} player classes, {} npc types",
        templates.players().len(),
        templates.npcs().len()
    );

    // =========================================================================
    // STEP 2: Spawn actors
    // =========================================================================
    separator("STEP 2: Spawning Actors");

    let player = templates.get("mage").expect("mage template").spawn();
    let npc = templates.get("orc_brute").expect("orc template").spawn();
    print_actor(&player);
    print_actor(&npc);

    assert!(player.is_full_health());
    assert_eq!(player.inventory().map(|inv| inv.len()), Some(2));
    assert!(npc.inventory().is_none());

    // =========================================================================
    // STEP 3: Fight
    // =========================================================================
    separator("STEP 3: Fighting");

    let mut session = CombatSession::new(player, npc, CombatConstants::default())
        .expect("valid encounter");
    let mut rng = CombatRng::seeded(31337);
    let policy = PassiveChancePolicy::default();
    let armor_before = (session.player().armor, session.npc().armor);

    let mut potions_used = 0;
    while !session.is_over() {
        let report = match session.whose_turn() {
            Some(Side::Player) => {
                let me = session.player();
                let potion = me.inventory().and_then(|inv| inv.items().first());
                let action = match potion {
                    Some(item) if me.health_percent() < 40.0 => Action::UseItem(item.name.clone()),
                    _ => Action::Attack(AttackKind::Ranged),
                };
                session.submit_player_action(action, &mut rng).expect("player turn")
            }
            Some(Side::Npc) => session.run_npc_turn(&policy, &mut rng).expect("npc turn"),
            None => unreachable!(),
        };

        if let Resolution::Item(outcome) = &report.resolution {
            assert!(outcome.healed > 0);
            potions_used += 1;
        }
        for line in &report.lines {
            println!("  {}", line);
        }

        assert!(session.player().health() >= 0);
        assert!(session.npc().health() >= 0);
        assert_eq!((session.player().armor, session.npc().armor), armor_before);
    }

    println!("\n  Potions used: {}", potions_used);

    // =========================================================================
    // STEP 4: Check the outcome
    // =========================================================================
    separator("STEP 4: Outcome");

    let outcome = session.outcome().expect("decided fight");
    match session.state() {
        CombatState::Victory => {
            assert_eq!(outcome.winner, Side::Player);
            assert_eq!(outcome.npc_health, 0);
        }
        CombatState::Defeat => {
            assert_eq!(outcome.winner, Side::Npc);
            assert_eq!(outcome.player_health, 0);
        }
        other => panic!("unexpected state {:?}", other),
    }
    assert_eq!(
        session.submit_player_action(Action::Defend, &mut rng),
        Err(CombatError::SessionOver)
    );

    // =========================================================================
    // STEP 5: Persist
    // =========================================================================
    separator("STEP 5: Persisting Outcome");

    let json = serde_json::to_string_pretty(&outcome).expect("serialize outcome");
    println!("{}", json);
    let restored: SessionOutcome = serde_json::from_str(&json).expect("deserialize outcome");
    assert_eq!(restored, outcome);

    separator("TEST COMPLETE");
    println!("  {} turns, winner: {}", outcome.turns, outcome.winner);
}
