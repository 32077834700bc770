//! Resource field generation: scatter nodes over dry land.

use rand::Rng;
use tracing::{debug, info};

use wildcraft_game::{GameConfig, GameError, ResourceField, Terrain};

use crate::config::ResourcesSection;

/// Placement attempts per node before it is skipped.
const ATTEMPTS_PER_NODE: u32 = 16;

/// Place `resources.counts` nodes of each type on land within `resources.radius`.
///
/// Land is the same height band creatures spawn in. Returns the number of nodes
/// placed. An unknown node type in `counts` is an error.
pub fn scatter_nodes(
    field: &mut ResourceField,
    terrain: &dyn Terrain,
    resources: &ResourcesSection,
    world: &GameConfig,
    rng: &mut impl Rng,
) -> Result<usize, GameError> {
    let (cx, cz) = world.world_center;
    let radius = resources.radius.max(0.0);
    let mut placed = 0;

    for (node_type, &count) in &resources.counts {
        if field.registry().get(node_type).is_none() {
            return Err(GameError::UnknownNodeType(node_type.clone()));
        }

        let mut placed_of_type = 0;
        for _ in 0..count {
            let spot = (0..ATTEMPTS_PER_NODE).find_map(|_| {
                let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
                let r = radius * rng.gen::<f32>().sqrt();
                let (x, z) = (cx + angle.cos() * r, cz + angle.sin() * r);
                let y = terrain.height_at(x, z);
                (world.min_land_height..=world.max_land_height)
                    .contains(&y)
                    .then_some((x, y, z))
            });
            match spot {
                Some(position) => {
                    field.add_node(node_type, position)?;
                    placed_of_type += 1;
                }
                None => debug!("No land found for a {node_type} node"),
            }
        }
        placed += placed_of_type;
        debug!("Placed {placed_of_type}/{count} {node_type} nodes");
    }

    info!("Resource field ready: {placed} nodes");
    Ok(placed)
}
