//! Collaborator traits the core consumes: terrain, inventory/world sink, player.

/// Terrain height queries. Must be a pure function of world position.
pub trait Terrain {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

impl<F> Terrain for F
where
    F: Fn(f32, f32) -> f32,
{
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Terrain with a constant height everywhere.
#[derive(Debug, Clone, Copy)]
pub struct FlatTerrain(pub f32);

impl Terrain for FlatTerrain {
    fn height_at(&self, _x: f32, _z: f32) -> f32 {
        self.0
    }
}

/// Tool currently held by the player.
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    pub tool_type: String,
    /// Gather multiplier granted when the tool suits the node.
    pub gather_bonus: f32,
}

/// Inventory and ground-item sink.
pub trait ItemSink {
    /// Place an item stack on the ground at `(x, z)`.
    fn create_ground_item(&mut self, item_type: &str, amount: u32, x: f32, z: f32);

    /// Add items to the inventory. Returns `false` if they did not fit.
    fn add_item(&mut self, item_type: &str, amount: u32) -> bool;

    /// Remove items. Returns `false` (and removes nothing) if not enough are held.
    fn remove_item(&mut self, item_type: &str, amount: u32) -> bool;

    fn has_item(&self, item_type: &str, amount: u32) -> bool;

    fn selected_tool(&self) -> Option<Tool>;
}

/// The player as seen by creature AI.
pub trait PlayerHandle {
    fn position(&self) -> (f32, f32, f32);

    /// Apply a creature attack.
    fn take_damage(&mut self, amount: f32);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_terrain() {
        let terrain = |x: f32, z: f32| x + z;
        assert_eq!(terrain.height_at(1.0, 2.0), 3.0);
    }

    #[test]
    fn flat_terrain_constant() {
        let terrain = FlatTerrain(4.0);
        assert_eq!(terrain.height_at(-100.0, 250.0), 4.0);
    }
}
