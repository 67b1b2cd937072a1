//! Encounter simulation utilities

use combat_core::{
    ActorTemplate, Action, Actor, AiPolicy, CombatConstants, CombatError, CombatRng,
    CombatSession, PolicyInput, Side,
};
use tracing::debug;

/// Turns after which an encounter is abandoned as a stalemate
pub const MAX_TURNS: u32 = 500;

/// Player stand-in for simulations: drinks below a health threshold, otherwise attacks
#[derive(Debug, Clone)]
pub struct CautiousPlayer {
    /// Health percentage below which an item is used
    pub heal_below: f64,
}

impl Default for CautiousPlayer {
    fn default() -> Self {
        CautiousPlayer { heal_below: 35.0 }
    }
}

impl AiPolicy for CautiousPlayer {
    fn name(&self) -> &str {
        "cautious_player"
    }

    fn choose(&self, me: &Actor, _opponent: &Actor, _rng: &mut CombatRng) -> Action {
        if me.health_percent() < self.heal_below {
            if let Some(item) = me.inventory().and_then(|inv| inv.items().first()) {
                return Action::UseItem(item.name.clone());
            }
        }
        Action::Attack(me.preferred_attack())
    }
}

/// Aggregate results of many simulated encounters
#[derive(Debug, Clone, Default)]
pub struct EncounterSimulation {
    pub player: String,
    pub npc: String,
    pub encounters: u32,
    pub wins: u32,
    pub losses: u32,
    pub stalemates: u32,
    pub total_turns: u64,
    /// Sum of the player's remaining health over won encounters
    pub total_health_left: i64,
}

impl EncounterSimulation {
    /// Play `encounters` fights between fresh spawns of two templates
    pub fn run(
        player: &ActorTemplate,
        npc: &ActorTemplate,
        encounters: u32,
        npc_policy: &dyn AiPolicy,
        constants: &CombatConstants,
        rng: &mut CombatRng,
    ) -> Result<Self, CombatError> {
        let mut result = EncounterSimulation {
            player: player.name.clone(),
            npc: npc.name.clone(),
            ..Default::default()
        };

        for _ in 0..encounters {
            let mut session =
                CombatSession::new(player.spawn(), npc.spawn(), constants.clone())?;
            let input_seed = rng.uniform(0, i32::MAX) as u64;
            let mut input =
                PolicyInput::new(CautiousPlayer::default(), CombatRng::seeded(input_seed));

            while !session.is_over() && session.turns() < MAX_TURNS {
                session.step(&mut input, npc_policy, rng)?;
            }
            if !session.is_over() {
                session.abort();
            }

            result.encounters += 1;
            result.total_turns += session.turns() as u64;
            match session.outcome() {
                Some(outcome) if outcome.winner == Side::Player => {
                    result.wins += 1;
                    result.total_health_left += outcome.player_health as i64;
                }
                Some(_) => result.losses += 1,
                None => result.stalemates += 1,
            }
        }

        debug!(
            player = %result.player,
            npc = %result.npc,
            wins = result.wins,
            losses = result.losses,
            "simulation finished"
        );
        Ok(result)
    }

    /// Calculate win rate as a percentage
    pub fn win_rate(&self) -> f64 {
        if self.encounters > 0 {
            self.wins as f64 / self.encounters as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Calculate average turns per encounter
    pub fn avg_turns(&self) -> f64 {
        if self.encounters > 0 {
            self.total_turns as f64 / self.encounters as f64
        } else {
            0.0
        }
    }

    /// Calculate average player health left after a win
    pub fn avg_health_left(&self) -> f64 {
        if self.wins > 0 {
            self.total_health_left as f64 / self.wins as f64
        } else {
            0.0
        }
    }
}
