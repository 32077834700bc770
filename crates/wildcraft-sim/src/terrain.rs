//! Procedural heightmap for the headless simulation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wildcraft_game::Terrain;

use crate::config::TerrainSection;

/// Smooth hills built from a few phase-shifted sine layers.
///
/// Heights below 0 are water.
#[derive(Debug, Clone)]
pub struct RollingHills {
    amplitude: f32,
    frequency: f32,
    base_height: f32,
    phases: [f32; 4],
}

impl RollingHills {
    pub fn new(config: &TerrainSection) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let mut phases = [0.0; 4];
        for phase in &mut phases {
            *phase = rng.gen_range(0.0..std::f32::consts::TAU);
        }
        Self {
            amplitude: config.amplitude,
            frequency: config.frequency,
            base_height: config.base_height,
            phases,
        }
    }
}

impl Terrain for RollingHills {
    fn height_at(&self, x: f32, z: f32) -> f32 {
        let f = self.frequency;
        let [p0, p1, p2, p3] = self.phases;
        let broad = (x * f + p0).sin() * (z * f + p1).cos();
        let detail = ((x + z) * f * 2.3 + p2).sin() * 0.35 + ((x - z) * f * 3.7 + p3).cos() * 0.15;
        self.base_height + self.amplitude * (broad * 0.5 + detail)
    }
}
