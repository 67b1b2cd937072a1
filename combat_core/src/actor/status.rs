//! StatusEffects - Boolean status flags carried through combat

use crate::types::StatusEffect;
use serde::{Deserialize, Serialize};

/// Set of status flags on an actor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    #[serde(default)]
    pub poisoned: bool,
    #[serde(default)]
    pub burning: bool,
    #[serde(default)]
    pub weakened: bool,
    #[serde(default)]
    pub strengthened: bool,
    #[serde(default)]
    pub regenerating: bool,
    #[serde(default)]
    pub slowed: bool,
    #[serde(default)]
    pub fast: bool,
}

impl StatusEffects {
    pub fn has(&self, effect: StatusEffect) -> bool {
        match effect {
            StatusEffect::Poisoned => self.poisoned,
            StatusEffect::Burning => self.burning,
            StatusEffect::Weakened => self.weakened,
            StatusEffect::Strengthened => self.strengthened,
            StatusEffect::Regenerating => self.regenerating,
            StatusEffect::Slowed => self.slowed,
            StatusEffect::Fast => self.fast,
        }
    }

    pub fn set(&mut self, effect: StatusEffect, active: bool) {
        let flag = match effect {
            StatusEffect::Poisoned => &mut self.poisoned,
            StatusEffect::Burning => &mut self.burning,
            StatusEffect::Weakened => &mut self.weakened,
            StatusEffect::Strengthened => &mut self.strengthened,
            StatusEffect::Regenerating => &mut self.regenerating,
            StatusEffect::Slowed => &mut self.slowed,
            StatusEffect::Fast => &mut self.fast,
        };
        *flag = active;
    }

    /// Active effects in declaration order
    pub fn active(&self) -> Vec<StatusEffect> {
        StatusEffect::all()
            .iter()
            .copied()
            .filter(|e| self.has(*e))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_has() {
        let mut status = StatusEffects::default();
        assert!(status.is_empty());

        status.set(StatusEffect::Burning, true);
        status.set(StatusEffect::Fast, true);
        assert!(status.has(StatusEffect::Burning));
        assert!(!status.has(StatusEffect::Poisoned));
        assert_eq!(status.active(), vec![StatusEffect::Burning, StatusEffect::Fast]);

        status.set(StatusEffect::Burning, false);
        assert_eq!(status.active(), vec![StatusEffect::Fast]);
    }
}
