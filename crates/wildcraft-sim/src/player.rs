//! Scripted player for the headless simulation.

use tracing::{debug, info};

use wildcraft_game::{PlayerHandle, Terrain};

use crate::config::PlayerSection;

/// A player walking a fixed circle around the world center.
#[derive(Debug, Clone)]
pub struct SimPlayer {
    pub position: (f32, f32, f32),
    pub health: f32,
    pub max_health: f32,
    pub is_dead: bool,
    pub damage_taken: f32,
    pub hits_taken: u32,
    center: (f32, f32),
    walk_radius: f32,
    walk_speed: f32,
    angle: f32,
}

impl SimPlayer {
    pub fn new(config: &PlayerSection, center: (f32, f32), terrain: &dyn Terrain) -> Self {
        let x = center.0 + config.walk_radius;
        let z = center.1;
        Self {
            position: (x, terrain.height_at(x, z), z),
            health: config.max_health,
            max_health: config.max_health,
            is_dead: false,
            damage_taken: 0.0,
            hits_taken: 0,
            center,
            walk_radius: config.walk_radius,
            walk_speed: config.walk_speed,
            angle: 0.0,
        }
    }

    /// Advance along the circle by `walk_speed * dt` and stand on the terrain.
    pub fn walk(&mut self, dt: f32, terrain: &dyn Terrain) {
        if self.is_dead || self.walk_radius <= 0.0 {
            return;
        }
        self.angle = (self.angle + self.walk_speed * dt.max(0.0) / self.walk_radius)
            % std::f32::consts::TAU;
        let x = self.center.0 + self.angle.cos() * self.walk_radius;
        let z = self.center.1 + self.angle.sin() * self.walk_radius;
        self.position = (x, terrain.height_at(x, z), z);
    }
}

impl PlayerHandle for SimPlayer {
    fn position(&self) -> (f32, f32, f32) {
        self.position
    }

    fn take_damage(&mut self, amount: f32) {
        if self.is_dead {
            return;
        }
        self.health = (self.health - amount).max(0.0);
        self.damage_taken += amount;
        self.hits_taken += 1;
        debug!("Player took {amount} damage ({} left)", self.health);
        if self.health <= 0.0 {
            self.is_dead = true;
            info!("Player died after {} hits", self.hits_taken);
        }
    }
}
