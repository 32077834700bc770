//! AI tick and movement systems.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::*;
use crate::config::GameConfig;
use crate::game_world::{GameEvent, OutgoingEvents};
use crate::interfaces::Terrain;

use super::brain::{self, BrainContext};
use super::state::Brain;

/// An attack a creature landed on the player this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureAttack {
    pub creature_id: CreatureId,
    pub damage: f32,
}

/// Runs the state machine for every live creature.
///
/// Returns the attacks to apply to the player. State changes and attacks are
/// also queued as [`GameEvent`]s.
pub fn system_ai_tick(
    world: &mut World,
    player_position: (f32, f32, f32),
    now_us: u64,
    dt_us: u64,
    tuning: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<CreatureAttack> {
    let mut attacks = Vec::new();
    let mut events = Vec::new();

    let mut q = world.query_filtered::<(
        &CreatureId,
        &Species,
        &Position,
        &mut Velocity,
        &mut Facing,
        &mut Brain,
    ), (With<Creature>, Without<Dead>)>();

    for (id, species, pos, mut vel, mut facing, mut brain) in q.iter_mut(world) {
        let before = brain.state;
        let ctx = BrainContext {
            position: pos.as_tuple(),
            facing: facing.0,
            species: &species.0,
            player_position,
            now_us,
            dt_us,
            tuning,
        };
        let output = brain::step(&mut brain, &ctx, rng);

        if let Some((vx, vz)) = output.velocity {
            vel.x = vx;
            vel.z = vz;
        }
        if let Some(angle) = output.facing {
            facing.0 = angle;
        }
        if let Some(damage) = output.attack {
            attacks.push(CreatureAttack {
                creature_id: *id,
                damage,
            });
            events.push(GameEvent::CreatureAttackedPlayer {
                creature_id: *id,
                damage,
            });
        }
        if brain.state != before {
            events.push(GameEvent::CreatureStateChanged {
                creature_id: *id,
                from: before,
                to: brain.state,
            });
        }
    }

    world.resource_mut::<OutgoingEvents>().events.extend(events);
    attacks
}

/// Integrate velocity, damp it, and snap creatures onto the terrain.
pub fn system_movement(world: &mut World, dt: f32, damping: f32, terrain: &dyn Terrain) {
    let mut q = world
        .query_filtered::<(&mut Position, &mut Velocity), (With<Creature>, Without<Dead>)>();

    for (mut pos, mut vel) in q.iter_mut(world) {
        pos.x += vel.x * dt;
        pos.z += vel.z * dt;

        vel.x *= damping;
        vel.y *= damping;
        vel.z *= damping;

        pos.y = terrain.height_at(pos.x, pos.z);
    }
}

/// Emit CreatureMoved events for creatures with non-negligible velocity.
pub fn system_collect_moves(world: &mut World) {
    let mut moves = Vec::new();

    let mut q = world.query_filtered::<(&CreatureId, &Position, &Velocity, &Facing), (
        With<Creature>,
        Without<Dead>,
    )>();

    for (id, pos, vel, facing) in q.iter(world) {
        if vel.x.abs() > 0.001 || vel.z.abs() > 0.001 {
            moves.push(GameEvent::CreatureMoved {
                creature_id: *id,
                position: pos.as_tuple(),
                facing: facing.0,
            });
        }
    }

    world.resource_mut::<OutgoingEvents>().events.extend(moves);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::state::{AiState, Target};
    use crate::game_world::GameWorld;
    use crate::interfaces::{FlatTerrain, PlayerHandle};
    use crate::species_registry::SpeciesRegistry;

    struct Dummy {
        pos: (f32, f32, f32),
        damage_taken: f32,
        hits: u32,
    }

    impl PlayerHandle for Dummy {
        fn position(&self) -> (f32, f32, f32) {
            self.pos
        }

        fn take_damage(&mut self, amount: f32) {
            self.damage_taken += amount;
            self.hits += 1;
        }
    }

    fn quiet_world() -> GameWorld {
        let config = GameConfig {
            seed: Some(9),
            wander_chance: 0.0,
            ..Default::default()
        };
        GameWorld::new(SpeciesRegistry::new(), config, Box::new(FlatTerrain(2.0)))
    }

    #[test]
    fn ai_no_crash_without_creatures() {
        let mut gw = quiet_world();
        let mut player = Dummy {
            pos: (0.0, 0.0, 0.0),
            damage_taken: 0.0,
            hits: 0,
        };
        for _ in 0..20 {
            gw.tick(0.05, &mut player);
        }
        assert_eq!(player.hits, 0);
    }

    #[test]
    fn wolf_chases_and_closes_distance() {
        let mut gw = quiet_world();
        let id = gw.spawn_creature("wolf", 10.0, 0.0).unwrap();
        let mut player = Dummy {
            pos: (0.0, 2.0, 0.0),
            damage_taken: 0.0,
            hits: 0,
        };

        gw.tick(0.05, &mut player);
        assert_eq!(gw.creature(id).unwrap().state, AiState::Chase);

        for _ in 0..10 {
            gw.tick(0.05, &mut player);
        }
        let snap = gw.creature(id).unwrap();
        assert!(snap.position.0 < 10.0, "wolf should approach, pos={:?}", snap.position);
        assert!((snap.position.1 - 2.0).abs() < 0.001, "snapped to terrain");
    }

    #[test]
    fn wolf_attacks_player_on_cooldown() {
        let mut gw = quiet_world();
        gw.spawn_creature("wolf", 1.0, 0.0).unwrap();
        let mut player = Dummy {
            pos: (0.0, 2.0, 0.0),
            damage_taken: 0.0,
            hits: 0,
        };

        // 3 seconds of 10 ms ticks with a 1000 ms cooldown.
        for _ in 0..300 {
            gw.tick(0.01, &mut player);
        }
        assert!(player.hits >= 2 && player.hits <= 3, "hits = {}", player.hits);
        assert_eq!(player.damage_taken, player.hits as f32 * 10.0);

        let events = gw.drain_events();
        let attack_events = events
            .iter()
            .filter(|e| matches!(e, GameEvent::CreatureAttackedPlayer { .. }))
            .count();
        assert_eq!(attack_events as u32, player.hits);
    }

    #[test]
    fn state_changes_are_reported() {
        let mut gw = quiet_world();
        let id = gw.spawn_creature("wolf", 10.0, 0.0).unwrap();
        gw.drain_events();
        let mut player = Dummy {
            pos: (0.0, 2.0, 0.0),
            damage_taken: 0.0,
            hits: 0,
        };
        gw.tick(0.05, &mut player);
        let events = gw.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::CreatureStateChanged { creature_id, from: AiState::Idle, to: AiState::Chase }
                if *creature_id == id
        )));
    }

    #[test]
    fn velocity_damps_without_orders() {
        let mut gw = quiet_world();
        let id = gw.spawn_creature("deer", 50.0, 50.0).unwrap();
        let mut player = Dummy {
            pos: (0.0, 2.0, 0.0),
            damage_taken: 0.0,
            hits: 0,
        };
        // Flee briefly, then let the timer run out.
        gw.damage_creature(id, 1.0, Target::Player, None);
        for _ in 0..120 {
            gw.tick(0.1, &mut player);
        }
        assert_eq!(gw.creature(id).unwrap().state, AiState::Idle);
        let x_before = gw.creature(id).unwrap().position.0;
        for _ in 0..100 {
            gw.tick(0.1, &mut player);
        }
        let x_after = gw.creature(id).unwrap().position.0;
        assert!((x_after - x_before).abs() < 0.5, "drift {x_before} -> {x_after}");
    }

    #[test]
    fn moving_creatures_emit_moves() {
        let mut gw = quiet_world();
        gw.spawn_creature("wolf", 10.0, 0.0).unwrap();
        gw.drain_events();
        let mut player = Dummy {
            pos: (0.0, 2.0, 0.0),
            damage_taken: 0.0,
            hits: 0,
        };
        for _ in 0..3 {
            gw.tick(0.05, &mut player);
        }
        let moves = gw
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::CreatureMoved { .. }))
            .count();
        assert!(moves > 0);
    }
}
