//! Session-level errors

use crate::combat::ItemRejection;
use thiserror::Error;

/// Errors returned by [`CombatSession`](crate::session::CombatSession)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CombatError {
    #[error("invalid actor: {0}")]
    InvalidActor(String),
    #[error("invalid combat constants: {0}")]
    InvalidConstants(String),
    #[error("it is not the player's turn")]
    NotPlayersTurn,
    #[error("it is not the NPC's turn")]
    NotNpcsTurn,
    #[error("the combat session has already ended")]
    SessionOver,
    #[error("item use rejected: {0}")]
    ItemRejected(#[from] ItemRejection),
    #[error("player input source ran out of actions")]
    InputExhausted,
}

impl CombatError {
    /// Whether the caller can simply ask for another action
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CombatError::ItemRejected(_))
    }
}
