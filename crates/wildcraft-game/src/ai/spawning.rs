//! Population control: weighted species draw and terrain-validated placement.

use std::sync::Arc;

use bevy_ecs::prelude::*;
use rand::Rng;
use tracing::debug;

use crate::components::*;
use crate::config::GameConfig;
use crate::game_world::{CreatureIdAllocator, CreatureIndex, GameEvent, OutgoingEvents};
use crate::interfaces::Terrain;
use crate::species_registry::{SpeciesDefinition, SpeciesRegistry};

use super::state::Brain;

/// Pick an area-uniform random point in the annulus `[inner, outer]` around `center`.
pub fn random_annulus_point(
    rng: &mut impl Rng,
    center: (f32, f32),
    inner: f32,
    outer: f32,
) -> (f32, f32) {
    let inner = inner.max(0.0);
    let outer = outer.max(inner);
    let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
    let u: f32 = rng.gen();
    let r = (u * (outer * outer - inner * inner) + inner * inner).sqrt();
    (center.0 + angle.cos() * r, center.1 + angle.sin() * r)
}

/// Search for a spawn position on land. `None` after `spawn_attempts` misses.
pub fn find_spawn_position(
    rng: &mut impl Rng,
    terrain: &dyn Terrain,
    config: &GameConfig,
) -> Option<(f32, f32, f32)> {
    for _ in 0..config.spawn_attempts {
        let (x, z) = random_annulus_point(
            rng,
            config.world_center,
            config.spawn_inner_radius,
            config.spawn_radius,
        );
        let y = terrain.height_at(x, z);
        if (config.min_land_height..=config.max_land_height).contains(&y) {
            return Some((x, y, z));
        }
    }
    None
}

/// Spawn a creature of `species` at `position` into the ECS world.
pub fn spawn_creature_internal(
    world: &mut World,
    species: &Arc<SpeciesDefinition>,
    position: (f32, f32, f32),
) -> CreatureId {
    let id = CreatureId(world.resource::<CreatureIdAllocator>().allocate());
    let health = species.starting_health();
    let (x, y, z) = position;

    let entity = world
        .spawn((
            id,
            Species(Arc::clone(species)),
            Position { x, y, z },
            Velocity::default(),
            Facing::default(),
            Health {
                current: health,
                max: species.max_health,
            },
            Creature,
            Brain::new(),
        ))
        .id();

    world.resource_mut::<CreatureIndex>().0.insert(id, entity);

    world
        .resource_mut::<OutgoingEvents>()
        .events
        .push(GameEvent::CreatureSpawned {
            creature_id: id,
            species_id: species.id.clone(),
            position,
            health,
            max_health: species.max_health,
        });

    id
}

/// Spawn one creature of a weighted-random species at a valid land position.
///
/// Returns `None` when no species has weight or placement was abandoned.
pub fn spawn_random_creature(
    world: &mut World,
    registry: &SpeciesRegistry,
    terrain: &dyn Terrain,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<CreatureId> {
    let Some(species) = registry.pick_weighted(rng) else {
        debug!("No spawnable species (all weights are zero)");
        return None;
    };
    let Some(position) = find_spawn_position(rng, terrain, config) else {
        debug!(
            "Abandoned {} spawn after {} attempts",
            species.id, config.spawn_attempts
        );
        return None;
    };
    Some(spawn_creature_internal(world, species, position))
}
