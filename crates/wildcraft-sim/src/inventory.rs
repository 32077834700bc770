//! Player inventory and ground items.
//!
//! A fixed grid of stack slots; slots 0-8 are the hotbar and the held slot
//! selects the active tool. Items dropped into the world wait on the ground
//! until the player walks close enough to pick them up.

use tracing::debug;

use wildcraft_game::{ItemSink, Tool};

use crate::tools;

pub const INVENTORY_SIZE: usize = 36;
pub const HOTBAR_SIZE: usize = 9;
pub const MAX_STACK: u32 = 64;

/// One inventory slot. An empty slot has `count == 0`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStack {
    pub item_type: String,
    pub count: u32,
}

impl ItemStack {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// An item stack lying in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundItem {
    pub item_type: String,
    pub amount: u32,
    pub x: f32,
    pub z: f32,
}

fn max_stack(item_type: &str) -> u32 {
    if tools::tool_for_item(item_type).is_some() {
        1
    } else {
        MAX_STACK
    }
}

#[derive(Debug)]
pub struct Inventory {
    pub slots: Vec<ItemStack>,
    /// Currently selected hotbar slot (0-8).
    pub held_slot: u8,
    ground: Vec<GroundItem>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            slots: vec![ItemStack::default(); INVENTORY_SIZE],
            held_slot: 0,
            ground: Vec::new(),
        }
    }

    /// Inventory holding one of each starting item, in order.
    pub fn with_items(items: &[String]) -> Self {
        let mut inventory = Self::new();
        for item in items {
            if !inventory.add_item(item, 1) {
                debug!("Starting item {item} did not fit");
            }
        }
        inventory
    }

    pub fn count(&self, item_type: &str) -> u32 {
        self.slots
            .iter()
            .filter(|s| !s.is_empty() && s.item_type == item_type)
            .map(|s| s.count)
            .sum()
    }

    pub fn held_item(&self) -> &ItemStack {
        &self.slots[self.held_slot as usize]
    }

    /// Select the first hotbar slot holding `item_type`. Returns `false` if none does.
    pub fn select_item(&mut self, item_type: &str) -> bool {
        let found = self.slots[..HOTBAR_SIZE]
            .iter()
            .position(|s| !s.is_empty() && s.item_type == item_type);
        match found {
            Some(slot) => {
                self.held_slot = slot as u8;
                true
            }
            None => false,
        }
    }

    pub fn ground_items(&self) -> &[GroundItem] {
        &self.ground
    }

    /// Move ground items within `radius` of `(x, z)` into the inventory.
    ///
    /// Stacks that do not fit stay on the ground. Returns what was picked up.
    pub fn pickup_ground_items(&mut self, x: f32, z: f32, radius: f32) -> Vec<(String, u32)> {
        let mut picked = Vec::new();
        let ground = std::mem::take(&mut self.ground);
        for item in ground {
            let in_reach = ((item.x - x).powi(2) + (item.z - z).powi(2)).sqrt() <= radius;
            if in_reach && self.add_item(&item.item_type, item.amount) {
                picked.push((item.item_type, item.amount));
            } else {
                self.ground.push(item);
            }
        }
        picked
    }

    fn free_space(&self, item_type: &str) -> u32 {
        let limit = max_stack(item_type);
        self.slots
            .iter()
            .map(|s| {
                if s.is_empty() {
                    limit
                } else if s.item_type == item_type {
                    limit.saturating_sub(s.count)
                } else {
                    0
                }
            })
            .sum()
    }
}

impl ItemSink for Inventory {
    fn create_ground_item(&mut self, item_type: &str, amount: u32, x: f32, z: f32) {
        if amount == 0 {
            return;
        }
        self.ground.push(GroundItem {
            item_type: item_type.to_string(),
            amount,
            x,
            z,
        });
    }

    fn add_item(&mut self, item_type: &str, amount: u32) -> bool {
        if self.free_space(item_type) < amount {
            return false;
        }
        let limit = max_stack(item_type);
        let mut left = amount;

        // Top up existing stacks first, then fill empty slots.
        for slot in &mut self.slots {
            if left == 0 {
                break;
            }
            if !slot.is_empty() && slot.item_type == item_type {
                let moved = left.min(limit.saturating_sub(slot.count));
                slot.count += moved;
                left -= moved;
            }
        }
        for slot in &mut self.slots {
            if left == 0 {
                break;
            }
            if slot.is_empty() {
                let moved = left.min(limit);
                *slot = ItemStack {
                    item_type: item_type.to_string(),
                    count: moved,
                };
                left -= moved;
            }
        }
        true
    }

    fn remove_item(&mut self, item_type: &str, amount: u32) -> bool {
        if self.count(item_type) < amount {
            return false;
        }
        let mut left = amount;
        for slot in self.slots.iter_mut().rev() {
            if left == 0 {
                break;
            }
            if !slot.is_empty() && slot.item_type == item_type {
                let taken = left.min(slot.count);
                slot.count -= taken;
                left -= taken;
                if slot.is_empty() {
                    *slot = ItemStack::default();
                }
            }
        }
        true
    }

    fn has_item(&self, item_type: &str, amount: u32) -> bool {
        self.count(item_type) >= amount
    }

    fn selected_tool(&self) -> Option<Tool> {
        let held = self.held_item();
        if held.is_empty() {
            return None;
        }
        tools::tool_for_item(&held.item_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_inventory_is_empty() {
        let inv = Inventory::new();
        assert_eq!(inv.slots.len(), INVENTORY_SIZE);
        assert!(inv.slots.iter().all(|s| s.is_empty()));
        assert!(inv.selected_tool().is_none());
    }

    #[test]
    fn add_stacks_and_spills() {
        let mut inv = Inventory::new();
        assert!(inv.add_item("wood", 100));
        assert_eq!(inv.count("wood"), 100);
        assert_eq!(inv.slots[0].count, 64);
        assert_eq!(inv.slots[1].count, 36);
        assert!(inv.add_item("wood", 30));
        assert_eq!(inv.slots[1].count, 64);
        assert_eq!(inv.slots[2].count, 2);
    }

    #[test]
    fn add_fails_when_full() {
        let mut inv = Inventory::new();
        assert!(inv.add_item("stone", MAX_STACK * INVENTORY_SIZE as u32));
        assert!(!inv.add_item("stone", 1));
        assert!(!inv.add_item("wood", 1));
        assert_eq!(inv.count("wood"), 0);
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut inv = Inventory::new();
        inv.add_item("fiber", 5);
        assert!(!inv.remove_item("fiber", 6));
        assert_eq!(inv.count("fiber"), 5);
        assert!(inv.remove_item("fiber", 5));
        assert!(!inv.has_item("fiber", 1));
        assert!(inv.slots[0].is_empty());
    }

    #[test]
    fn tools_do_not_stack() {
        let inv = Inventory::with_items(&["axe".into(), "axe".into(), "spear".into()]);
        assert_eq!(inv.slots[0].count, 1);
        assert_eq!(inv.slots[1].item_type, "axe");
        assert_eq!(inv.slots[2].item_type, "spear");
    }

    #[test]
    fn selecting_changes_tool() {
        let mut inv = Inventory::with_items(&["spear".into(), "axe".into()]);
        assert_eq!(inv.selected_tool().unwrap().tool_type, "spear");
        assert!(inv.select_item("axe"));
        assert_eq!(inv.held_slot, 1);
        assert_eq!(inv.selected_tool().unwrap().gather_bonus, 2.0);
        assert!(!inv.select_item("sickle"));
        assert_eq!(inv.held_slot, 1);
    }

    #[test]
    fn pickup_only_in_reach() {
        let mut inv = Inventory::new();
        inv.create_ground_item("raw_meat", 3, 1.0, 1.0);
        inv.create_ground_item("hide", 1, 20.0, 0.0);
        inv.create_ground_item("bone", 0, 0.0, 0.0);
        assert_eq!(inv.ground_items().len(), 2);

        let picked = inv.pickup_ground_items(0.0, 0.0, 2.0);
        assert_eq!(picked, vec![("raw_meat".to_string(), 3)]);
        assert_eq!(inv.count("raw_meat"), 3);
        assert_eq!(inv.ground_items().len(), 1);
        assert_eq!(inv.ground_items()[0].item_type, "hide");
    }
}
