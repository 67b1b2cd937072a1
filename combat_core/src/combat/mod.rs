//! Action resolution - Apply attacks, defends and item use to actors

mod mitigation;
mod resolution;
mod result;

pub use mitigation::{effective_armor, final_damage, guard_bonus, raw_damage};
pub use resolution::{resolve_action, resolve_attack, resolve_defend, resolve_item_use, Resolution};
pub use result::{AttackOutcome, ItemOutcome, ItemRejection};
