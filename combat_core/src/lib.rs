//! combat_core - Turn-based combat engine for one player against one NPC
//!
//! This library provides:
//! - CombatRng: Seedable random number service passed into the engine
//! - Actor: Combat participant with clamped health and an optional inventory
//! - Action Resolution: Attacks, defending and healing items
//! - AiPolicy: NPC decision making
//! - CombatSession: Turn order, terminal states and the combat log

pub mod actor;
pub mod ai;
pub mod combat;
pub mod config;
pub mod error;
pub mod prelude;
pub mod rng;
pub mod session;
pub mod types;

// Re-export core types for convenience
pub use actor::{Actor, Inventory, Item, StatusEffects};
pub use ai::{ai_choose, AggressivePolicy, AiPolicy, PassiveChancePolicy};
pub use combat::{
    resolve_action, resolve_attack, resolve_defend, resolve_item_use, AttackOutcome,
    ItemOutcome, ItemRejection, Resolution,
};
pub use config::{
    default_templates, ActorTemplate, CombatConstants, MissRule, TemplateSet, TieBreak,
};
pub use error::CombatError;
pub use rng::CombatRng;
pub use session::{
    CombatLog, CombatSession, CombatState, InputError, PlayerInput, PolicyInput, ScriptedInput,
    SessionOutcome, SessionView, TurnPhase, TurnReport,
};
pub use types::{Action, AttackKind, Side, StatusEffect};
