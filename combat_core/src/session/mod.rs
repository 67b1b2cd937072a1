//! Combat session - The turn state machine for one encounter
//!
//! A session owns both actors, the log and the whose-turn state. The host
//! owns the session and the RNG and drives it one turn at a time, either by
//! submitting player actions directly or through a [`PlayerInput`].

mod input;
mod log;

pub use input::{parse_action, InputError, PlayerInput, PolicyInput, ScriptedInput};
pub use log::CombatLog;

use crate::actor::Actor;
use crate::ai::AiPolicy;
use crate::combat::{resolve_action, Resolution};
use crate::config::{CombatConstants, TieBreak};
use crate::error::CombatError;
use crate::rng::CombatRng;
use crate::types::{Action, Side};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Externally visible state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatState {
    /// Waiting for the given side to act
    AwaitingAction(Side),
    /// The NPC died
    Victory,
    /// The player died
    Defeat,
    /// The host cancelled the encounter
    Aborted,
}

impl CombatState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, CombatState::AwaitingAction(_))
    }
}

/// Where the session is within a single turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingAction,
    Resolving,
    CheckingTerminal,
    Finished,
}

/// What one resolved turn did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub side: Side,
    pub action: Action,
    pub resolution: Resolution,
    /// Log lines appended by this turn, including any end-of-combat line
    pub lines: Vec<String>,
    /// State after the turn
    pub state: CombatState,
}

/// Final result of a finished encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub winner: Side,
    pub player_name: String,
    pub npc_name: String,
    pub player_health: i32,
    pub npc_health: i32,
    /// Turns resolved, counting both sides
    pub turns: u32,
}

/// Read-only snapshot handed to a [`PlayerInput`]
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub player: &'a Actor,
    pub npc: &'a Actor,
    pub log: &'a CombatLog,
    pub turn: u32,
}

/// Pick which side acts first
///
/// Higher initiative goes first; equal initiative is settled by `tie_break`.
pub fn first_to_act(player: &Actor, npc: &Actor, tie_break: TieBreak) -> Side {
    if player.initiative > npc.initiative {
        Side::Player
    } else if npc.initiative > player.initiative {
        Side::Npc
    } else {
        match tie_break {
            TieBreak::Player => Side::Player,
            TieBreak::Npc => Side::Npc,
        }
    }
}

/// One encounter between a player-controlled actor and an NPC
#[derive(Debug, Clone)]
pub struct CombatSession {
    player: Actor,
    npc: Actor,
    state: CombatState,
    phase: TurnPhase,
    log: CombatLog,
    constants: CombatConstants,
    turns: u32,
}

impl CombatSession {
    /// Start an encounter
    ///
    /// Both actors must be alive with valid vitals, and must be on the side
    /// their slot implies.
    pub fn new(
        player: Actor,
        npc: Actor,
        constants: CombatConstants,
    ) -> Result<Self, CombatError> {
        if player.side != Side::Player {
            return Err(CombatError::InvalidActor(format!(
                "{} is not player-controlled",
                player.name
            )));
        }
        if npc.side != Side::Npc {
            return Err(CombatError::InvalidActor(format!("{} is not an NPC", npc.name)));
        }
        player.validate().map_err(CombatError::InvalidActor)?;
        npc.validate().map_err(CombatError::InvalidActor)?;
        constants
            .validate()
            .map_err(|e| CombatError::InvalidConstants(e.to_string()))?;

        let first = first_to_act(&player, &npc, constants.initiative.tie_break);

        let mut session = CombatSession {
            player,
            npc,
            state: CombatState::AwaitingAction(first),
            phase: TurnPhase::AwaitingAction,
            log: CombatLog::new(),
            constants,
            turns: 0,
        };

        session.log.push(format!(
            "{} engages {}!",
            session.player.name, session.npc.name
        ));
        session
            .log
            .push(format!("{} acts first", session.actor(first).name));
        session.enter_turn(first);

        info!(
            player = %session.player.name,
            npc = %session.npc.name,
            %first,
            "combat session started"
        );
        Ok(session)
    }

    // === Queries ===

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Side expected to act next, if the session is still running
    pub fn whose_turn(&self) -> Option<Side> {
        match self.state {
            CombatState::AwaitingAction(side) => Some(side),
            _ => None,
        }
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn npc(&self) -> &Actor {
        &self.npc
    }

    pub fn actor(&self, side: Side) -> &Actor {
        match side {
            Side::Player => &self.player,
            Side::Npc => &self.npc,
        }
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn constants(&self) -> &CombatConstants {
        &self.constants
    }

    /// Turns resolved so far, counting both sides
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn view(&self) -> SessionView<'_> {
        SessionView {
            player: &self.player,
            npc: &self.npc,
            log: &self.log,
            turn: self.turns,
        }
    }

    /// Winner and final vitals, once the fight is decided
    ///
    /// `None` while running and after an abort.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        let winner = match self.state {
            CombatState::Victory => Side::Player,
            CombatState::Defeat => Side::Npc,
            _ => return None,
        };
        Some(SessionOutcome {
            winner,
            player_name: self.player.name.clone(),
            npc_name: self.npc.name.clone(),
            player_health: self.player.health(),
            npc_health: self.npc.health(),
            turns: self.turns,
        })
    }

    /// Hand the actors back, e.g. to carry the player into the next encounter
    pub fn into_actors(self) -> (Actor, Actor) {
        (self.player, self.npc)
    }

    // === Driving the session ===

    /// Resolve the player's chosen action
    ///
    /// A refused item use returns `ItemRejected` and leaves the turn with the
    /// player, with nothing logged.
    pub fn submit_player_action(
        &mut self,
        action: Action,
        rng: &mut CombatRng,
    ) -> Result<TurnReport, CombatError> {
        match self.state {
            CombatState::AwaitingAction(Side::Player) => {
                self.resolve_turn(Side::Player, action, rng)
            }
            CombatState::AwaitingAction(Side::Npc) => Err(CombatError::NotPlayersTurn),
            _ => Err(CombatError::SessionOver),
        }
    }

    /// Let the NPC pick and resolve its action
    pub fn run_npc_turn(
        &mut self,
        policy: &dyn AiPolicy,
        rng: &mut CombatRng,
    ) -> Result<TurnReport, CombatError> {
        match self.state {
            CombatState::AwaitingAction(Side::Npc) => {}
            CombatState::AwaitingAction(Side::Player) => return Err(CombatError::NotNpcsTurn),
            _ => return Err(CombatError::SessionOver),
        }

        let action = policy.choose(&self.npc, &self.player, rng);
        match self.resolve_turn(Side::Npc, action, rng) {
            Err(CombatError::ItemRejected(reason)) => {
                // An NPC never blocks the fight; a refused item becomes a pass
                warn!(
                    npc = %self.npc.name,
                    policy = policy.name(),
                    %reason,
                    "npc item use refused"
                );
                self.resolve_turn(Side::Npc, Action::None, rng)
            }
            other => other,
        }
    }

    /// Resolve whichever side is due to act
    ///
    /// The player's action is read from `input`. Recoverable input errors and
    /// refused item uses ask again without touching any state.
    pub fn step(
        &mut self,
        input: &mut dyn PlayerInput,
        policy: &dyn AiPolicy,
        rng: &mut CombatRng,
    ) -> Result<TurnReport, CombatError> {
        match self.state {
            CombatState::AwaitingAction(Side::Npc) => self.run_npc_turn(policy, rng),
            CombatState::AwaitingAction(Side::Player) => loop {
                let action = match input.next_action(&self.view()) {
                    Ok(action) => action,
                    Err(e) if e.is_recoverable() => {
                        debug!(error = %e, "player input refused, asking again");
                        input.on_rejected(&e.to_string());
                        continue;
                    }
                    Err(_) => return Err(CombatError::InputExhausted),
                };

                match self.submit_player_action(action, rng) {
                    Err(e) if e.is_recoverable() => {
                        input.on_rejected(&e.to_string());
                    }
                    result => return result,
                }
            },
            _ => Err(CombatError::SessionOver),
        }
    }

    /// Step until the encounter is decided
    pub fn run_to_end(
        &mut self,
        input: &mut dyn PlayerInput,
        policy: &dyn AiPolicy,
        rng: &mut CombatRng,
    ) -> Result<SessionOutcome, CombatError> {
        while !self.is_over() {
            self.step(input, policy, rng)?;
        }
        self.outcome().ok_or(CombatError::SessionOver)
    }

    /// Cancel the encounter between turns
    ///
    /// Has no effect once the session has already ended.
    pub fn abort(&mut self) {
        if self.is_over() {
            return;
        }
        self.log.push("The fight is abandoned");
        self.state = CombatState::Aborted;
        self.phase = TurnPhase::Finished;
        info!(turns = self.turns, "combat session aborted");
    }

    // === Internals ===

    /// Start of a turn: the acting side's guard from last round drops
    fn enter_turn(&mut self, side: Side) {
        self.actor_mut(side).set_defending(false);
        self.phase = TurnPhase::AwaitingAction;
        debug!(%side, turn = self.turns + 1, "turn started");
    }

    fn actor_mut(&mut self, side: Side) -> &mut Actor {
        match side {
            Side::Player => &mut self.player,
            Side::Npc => &mut self.npc,
        }
    }

    fn resolve_turn(
        &mut self,
        side: Side,
        action: Action,
        rng: &mut CombatRng,
    ) -> Result<TurnReport, CombatError> {
        self.phase = TurnPhase::Resolving;
        debug!(%side, ?action, phase = ?self.phase, "resolving");

        let (actor, opponent) = match side {
            Side::Player => (&mut self.player, &mut self.npc),
            Side::Npc => (&mut self.npc, &mut self.player),
        };
        let resolution = resolve_action(&action, actor, opponent, rng, &self.constants);

        if let Resolution::Item(outcome) = &resolution {
            if let Some(reason) = outcome.rejected {
                warn!(%side, item = %outcome.item, %reason, "item use rejected");
                self.phase = TurnPhase::AwaitingAction;
                return Err(CombatError::ItemRejected(reason));
            }
        }

        let log_start = self.log.len();
        self.log.extend(resolution.log_lines());
        self.turns += 1;

        self.phase = TurnPhase::CheckingTerminal;
        self.state = self.check_terminal(side);
        debug!(state = ?self.state, phase = ?self.phase, "turn resolved");

        match self.state {
            CombatState::AwaitingAction(next) => self.enter_turn(next),
            CombatState::Victory => {
                self.log.push(format!("{} is defeated. Victory!", self.npc.name));
                self.finish();
            }
            CombatState::Defeat => {
                self.log.push(format!("{} has fallen. Defeat.", self.player.name));
                self.finish();
            }
            CombatState::Aborted => self.finish(),
        }

        Ok(TurnReport {
            side,
            action,
            resolution,
            lines: self.log.since(log_start).to_vec(),
            state: self.state,
        })
    }

    /// Decide the state after `side` acted
    ///
    /// The acting side's opponent is checked first.
    fn check_terminal(&self, side: Side) -> CombatState {
        for checked in [side.opponent(), side] {
            if !self.actor(checked).is_alive() {
                return match checked {
                    Side::Npc => CombatState::Victory,
                    Side::Player => CombatState::Defeat,
                };
            }
        }
        CombatState::AwaitingAction(side.opponent())
    }

    fn finish(&mut self) {
        self.phase = TurnPhase::Finished;
        info!(
            state = ?self.state,
            turns = self.turns,
            player_health = self.player.health(),
            npc_health = self.npc.health(),
            "combat session ended"
        );
    }
}
