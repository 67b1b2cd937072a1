//! Inventory - Consumable healing items keyed by name

use serde::{Deserialize, Serialize};

/// A stack of consumable healing items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, also the stacking key
    pub name: String,
    /// Health restored per use
    pub heal_amount: i32,
    /// Number of uses left
    pub quantity: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, heal_amount: i32, quantity: u32) -> Self {
        Item {
            name: name.into(),
            heal_amount,
            quantity,
        }
    }

    /// Standard healing potion
    pub fn health_potion(quantity: u32) -> Self {
        Item::new("Health Potion", 20, quantity)
    }
}

/// Ordered collection of item stacks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, stacking onto an existing entry with the same name
    ///
    /// Empty stacks and items that heal nothing are ignored, so every entry
    /// is usable.
    pub fn add(&mut self, item: Item) {
        if item.quantity == 0 || item.heal_amount <= 0 {
            return;
        }
        match self.items.iter_mut().find(|i| i.name == item.name) {
            Some(existing) => existing.quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Look up an item stack by name
    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    /// Take one unit of an item, removing the entry when it runs out
    ///
    /// Returns the heal amount of the consumed unit, or `None` if the item
    /// is missing or has no uses left.
    pub fn consume_one(&mut self, name: &str) -> Option<i32> {
        let index = self.items.iter().position(|i| i.name == name)?;
        let item = &mut self.items[index];
        if item.quantity == 0 {
            return None;
        }
        item.quantity -= 1;
        let heal = item.heal_amount;
        if item.quantity == 0 {
            self.items.remove(index);
        }
        Some(heal)
    }

    /// First entry that could not have been added through `add`
    pub fn find_invalid(&self) -> Option<&Item> {
        self.items
            .iter()
            .find(|i| i.quantity == 0 || i.heal_amount <= 0)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut inventory = Inventory::new();
        for item in iter {
            inventory.add(item);
        }
        inventory
    }
}
