//! Player input - Where the player's action comes from each turn

use super::SessionView;
use crate::ai::AiPolicy;
use crate::rng::CombatRng;
use crate::types::{Action, AttackKind};
use std::collections::VecDeque;
use thiserror::Error;

/// Problems turning a player's command into an [`Action`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no command given")]
    Empty,
    #[error("unrecognised command: {0}")]
    Unrecognised(String),
    #[error("no item in slot {0}")]
    OutOfRange(usize),
    /// The source has nothing left to give; the session cannot continue
    #[error("input source exhausted")]
    Exhausted,
}

impl InputError {
    /// Whether asking again could produce a valid action
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, InputError::Exhausted)
    }
}

/// Supplies the player's action when the session needs one
///
/// Recoverable errors make the session ask again without changing any state.
pub trait PlayerInput {
    fn next_action(&mut self, view: &SessionView<'_>) -> Result<Action, InputError>;

    /// Called when the last returned action or command was refused
    fn on_rejected(&mut self, _reason: &str) {}
}

/// Parse a typed command into an action
///
/// Accepts `m`/`melee`/`1`, `r`/`ranged`/`2`, `d`/`defend`/`3`, `w`/`wait`,
/// and `u <slot>` / `use <slot>` where slot is the 1-based inventory position.
pub fn parse_action(command: &str, view: &SessionView<'_>) -> Result<Action, InputError> {
    let command = command.trim().to_lowercase();
    let mut words = command.split_whitespace();
    let head = words.next().ok_or(InputError::Empty)?;

    match head {
        "m" | "melee" | "1" => Ok(Action::Attack(AttackKind::Melee)),
        "r" | "ranged" | "2" => Ok(Action::Attack(AttackKind::Ranged)),
        "d" | "defend" | "3" => Ok(Action::Defend),
        "w" | "wait" => Ok(Action::None),
        "u" | "use" | "4" => {
            let slot: usize = match words.next() {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| InputError::Unrecognised(command.clone()))?,
                None => 1,
            };
            let item = view
                .player
                .inventory()
                .and_then(|inv| slot.checked_sub(1).and_then(|i| inv.items().get(i)))
                .ok_or(InputError::OutOfRange(slot))?;
            Ok(Action::UseItem(item.name.clone()))
        }
        _ => Err(InputError::Unrecognised(command.clone())),
    }
}

enum Scripted {
    Action(Action),
    Command(String),
}

/// A fixed queue of actions or typed commands
///
/// Commands go through [`parse_action`], so bad lines behave like a user
/// mistyping. Once the queue is empty every call returns `Exhausted`.
#[derive(Default)]
pub struct ScriptedInput {
    queue: VecDeque<Scripted>,
    rejections: Vec<String>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        ScriptedInput {
            queue: actions.into_iter().map(Scripted::Action).collect(),
            rejections: Vec::new(),
        }
    }

    pub fn from_commands<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ScriptedInput {
            queue: commands
                .into_iter()
                .map(|c| Scripted::Command(c.into()))
                .collect(),
            rejections: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Reasons reported back through [`PlayerInput::on_rejected`]
    pub fn rejections(&self) -> &[String] {
        &self.rejections
    }
}

impl PlayerInput for ScriptedInput {
    fn next_action(&mut self, view: &SessionView<'_>) -> Result<Action, InputError> {
        match self.queue.pop_front() {
            Some(Scripted::Action(action)) => Ok(action),
            Some(Scripted::Command(command)) => parse_action(&command, view),
            None => Err(InputError::Exhausted),
        }
    }

    fn on_rejected(&mut self, reason: &str) {
        self.rejections.push(reason.to_string());
    }
}

/// Drives the player side with an AI policy and its own RNG stream
pub struct PolicyInput<P: AiPolicy> {
    policy: P,
    rng: CombatRng,
}

impl<P: AiPolicy> PolicyInput<P> {
    pub fn new(policy: P, rng: CombatRng) -> Self {
        PolicyInput { policy, rng }
    }
}

impl<P: AiPolicy> PlayerInput for PolicyInput<P> {
    fn next_action(&mut self, view: &SessionView<'_>) -> Result<Action, InputError> {
        Ok(self.policy.choose(view.player, view.npc, &mut self.rng))
    }
}
