//! Actor templates - Starting stats per character class or NPC type

use super::ConfigError;
use crate::actor::{Actor, Inventory, Item};
use crate::types::Side;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Starting stats for one class or NPC type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub id: String,
    pub name: String,
    pub side: Side,
    #[serde(default)]
    pub melee_power: i32,
    #[serde(default)]
    pub ranged_power: i32,
    #[serde(default)]
    pub armor: i32,
    #[serde(default)]
    pub initiative: i32,
    pub max_health: i32,
    /// Starting items, only used for player classes
    #[serde(default)]
    pub items: Vec<Item>,
}

impl ActorTemplate {
    /// Build a full-health actor from this template
    pub fn spawn(&self) -> Actor {
        let actor = Actor::new(self.name.clone(), self.side, self.max_health)
            .with_melee(self.melee_power)
            .with_ranged(self.ranged_power)
            .with_armor(self.armor)
            .with_initiative(self.initiative);

        match self.side {
            Side::Player => actor.with_inventory(self.items.iter().cloned().collect::<Inventory>()),
            Side::Npc => actor,
        }
    }
}

/// Container for template configurations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSet {
    #[serde(rename = "templates")]
    pub templates: Vec<ActorTemplate>,
}

impl TemplateSet {
    /// Get a template by ID
    pub fn get(&self, id: &str) -> Option<&ActorTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Player class templates in file order
    pub fn players(&self) -> Vec<&ActorTemplate> {
        self.of_side(Side::Player)
    }

    /// NPC templates in file order
    pub fn npcs(&self) -> Vec<&ActorTemplate> {
        self.of_side(Side::Npc)
    }

    fn of_side(&self, side: Side) -> Vec<&ActorTemplate> {
        self.templates.iter().filter(|t| t.side == side).collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for template in &self.templates {
            if !seen.insert(template.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "duplicate template id '{}'",
                    template.id
                )));
            }
            if template.max_health <= 0 {
                return Err(ConfigError::ValidationError(format!(
                    "template '{}' needs a positive max_health",
                    template.id
                )));
            }
            if template.armor < 0 {
                return Err(ConfigError::ValidationError(format!(
                    "template '{}' has negative armor",
                    template.id
                )));
            }
            if let Some(item) = template.items.iter().find(|i| i.heal_amount <= 0) {
                return Err(ConfigError::ValidationError(format!(
                    "item '{}' in template '{}' must heal a positive amount",
                    item.name, template.id
                )));
            }
        }
        Ok(())
    }
}

/// Load templates from a TOML file
pub fn load_templates(path: &Path) -> Result<TemplateSet, ConfigError> {
    let set: TemplateSet = super::load_toml(path)?;
    set.validate()?;
    Ok(set)
}

/// Load templates from a TOML string
pub fn parse_templates(content: &str) -> Result<TemplateSet, ConfigError> {
    let set: TemplateSet = super::parse_toml(content)?;
    set.validate()?;
    Ok(set)
}

/// Get the built-in templates
pub fn default_templates() -> TemplateSet {
    let toml = include_str!("../../config/templates.toml");
    parse_templates(toml).unwrap_or_else(|e| {
        tracing::warn!("built-in templates failed to parse: {}", e);
        TemplateSet {
            templates: vec![
                ActorTemplate {
                    id: "warrior".to_string(),
                    name: "Warrior".to_string(),
                    side: Side::Player,
                    melee_power: 9,
                    ranged_power: 3,
                    armor: 6,
                    initiative: 4,
                    max_health: 60,
                    items: vec![Item::health_potion(2)],
                },
                ActorTemplate {
                    id: "zombie".to_string(),
                    name: "Zombie".to_string(),
                    side: Side::Npc,
                    melee_power: 7,
                    ranged_power: 0,
                    armor: 1,
                    initiative: 1,
                    max_health: 40,
                    items: Vec::new(),
                },
            ],
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_templates() {
        let toml = r#"
[[templates]]
id = "knight"
name = "Knight"
side = "player"
melee_power = 10
armor = 8
max_health = 80

[[templates.items]]
name = "Health Potion"
heal_amount = 20
quantity = 1

[[templates]]
id = "bat"
name = "Bat"
side = "npc"
melee_power = 2
initiative = 9
max_health = 8
"#;

        let set = parse_templates(toml).unwrap();
        let knight = set.get("knight").unwrap();
        assert_eq!(knight.ranged_power, 0);
        assert_eq!(knight.items.len(), 1);
        assert_eq!(set.players().len(), 1);
        assert_eq!(set.npcs().len(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let toml = r#"
[[templates]]
id = "bat"
name = "Bat"
side = "npc"
max_health = 8

[[templates]]
id = "bat"
name = "Other Bat"
side = "npc"
max_health = 9
"#;
        assert!(matches!(parse_templates(toml), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_default_templates_loads_all() {
        let set = default_templates();
        assert_eq!(set.players().len(), 3, "Expected 3 player classes");
        assert_eq!(set.npcs().len(), 5, "Expected 5 NPC types");

        let ids = [
            "warrior",
            "ranger",
            "mage",
            "rat",
            "zombie",
            "goblin_archer",
            "skeleton",
            "orc_brute",
        ];
        for id in ids {
            assert!(set.get(id).is_some(), "Missing template: {}", id);
        }
    }

    #[test]
    fn test_spawn_player_gets_inventory() {
        let set = default_templates();
        let mage = set.get("mage").unwrap().spawn();
        assert_eq!(mage.side, Side::Player);
        assert!(mage.is_full_health());
        let inv = mage.inventory().unwrap();
        assert_eq!(inv.get("Health Potion").unwrap().quantity, 2);
        assert_eq!(inv.get("Elixir").unwrap().heal_amount, 40);
    }

    #[test]
    fn test_spawn_npc_has_no_inventory() {
        let set = default_templates();
        let zombie = set.get("zombie").unwrap().spawn();
        assert_eq!(zombie.side, Side::Npc);
        assert!(zombie.inventory().is_none());
        assert!(zombie.validate().is_ok());
    }
}
