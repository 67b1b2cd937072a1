//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::actor::{Actor, Inventory, Item};
pub use crate::types::{Action, AttackKind, Side};

// Engine
pub use crate::combat::{resolve_action, AttackOutcome, ItemOutcome, Resolution};
pub use crate::rng::CombatRng;

// AI
pub use crate::ai::{AiPolicy, PassiveChancePolicy};

// Session
pub use crate::error::CombatError;
pub use crate::session::{CombatSession, CombatState, PlayerInput, ScriptedInput, SessionOutcome};

// Config
pub use crate::config::{default_templates, CombatConstants};
