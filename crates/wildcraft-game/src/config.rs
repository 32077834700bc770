//! Tunables for creature population, AI and timing.

use serde::Deserialize;

/// Configuration for the creature world.
///
/// Every field has a default, so a partial `[world]` table is enough.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Number of creatures spawned at startup.
    pub target_population: u32,
    /// Center of the spawn annulus (x, z).
    pub world_center: (f32, f32),
    /// Inner radius of the spawn annulus.
    pub spawn_inner_radius: f32,
    /// Outer radius of the spawn annulus.
    pub spawn_radius: f32,
    /// Lowest terrain height a creature may spawn on.
    pub min_land_height: f32,
    /// Highest terrain height a creature may spawn on.
    pub max_land_height: f32,
    /// Placement attempts before a spawn is abandoned.
    pub spawn_attempts: u32,
    /// Delay between a death and its replacement spawn.
    pub replenish_delay_ms: u64,
    /// Delay between a death and removal of the corpse.
    pub corpse_removal_delay_ms: u64,
    pub flee_duration_ms: u64,
    /// Per-tick chance an idle creature starts wandering.
    pub wander_chance: f32,
    pub wander_radius: f32,
    /// Wander duration range (min, max) in ms.
    pub wander_duration_ms: (u64, u64),
    /// Multiplicative velocity damping applied each tick.
    pub velocity_damping: f32,
    /// Upper bound on a single tick's delta (seconds).
    pub max_delta_seconds: f32,
    /// Chase is abandoned beyond `detection_range * lose_target_factor`.
    pub lose_target_factor: f32,
    /// Attack falls back to chase beyond `attack_range * attack_exit_factor`.
    pub attack_exit_factor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            target_population: 15,
            world_center: (0.0, 0.0),
            spawn_inner_radius: 20.0,
            spawn_radius: 150.0,
            min_land_height: 0.5,
            max_land_height: 40.0,
            spawn_attempts: 20,
            replenish_delay_ms: 10_000,
            corpse_removal_delay_ms: 1_000,
            flee_duration_ms: 5_000,
            wander_chance: 0.01,
            wander_radius: 10.0,
            wander_duration_ms: (3_000, 8_000),
            velocity_damping: 0.9,
            max_delta_seconds: 0.1,
            lose_target_factor: 1.5,
            attack_exit_factor: 1.2,
        }
    }
}

impl GameConfig {
    /// Clamp a frame delta into `[0, max_delta_seconds]`.
    pub fn clamp_delta(&self, delta_seconds: f32) -> f32 {
        clamp_delta(delta_seconds, self.max_delta_seconds)
    }
}

/// Clamp `delta_seconds` into `[0, max]`. Non-finite deltas count as zero.
pub fn clamp_delta(delta_seconds: f32, max: f32) -> f32 {
    if delta_seconds.is_finite() {
        delta_seconds.clamp(0.0, max)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.replenish_delay_ms, 10_000);
        assert_eq!(cfg.spawn_inner_radius, 20.0);
        assert!((cfg.velocity_damping - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn clamp_caps_large_steps() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.clamp_delta(2.5), 0.1);
        assert_eq!(cfg.clamp_delta(0.016), 0.016);
        // Sub-millisecond frames pass through untouched.
        assert_eq!(cfg.clamp_delta(0.000_25), 0.000_25);
    }

    #[test]
    fn clamp_rejects_negative_and_nan() {
        assert_eq!(clamp_delta(-1.0, 0.1), 0.0);
        assert_eq!(clamp_delta(f32::NAN, 0.1), 0.0);
    }
}
