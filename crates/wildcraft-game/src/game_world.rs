//! ECS game world: bevy_ecs World, creature lifecycle, tick systems, and event bus.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use crate::ai::movement;
use crate::ai::spawning;
use crate::ai::state::{AiState, Brain, Target};
use crate::ai::system::{system_ai_tick, system_collect_moves, system_movement};
use crate::combat::{self, DamageOutcome};
use crate::components::*;
use crate::config::GameConfig;
use crate::error::GameError;
use crate::interfaces::{ItemSink, PlayerHandle, Terrain};
use crate::schedule::{ms_to_us, SimClock, TimerQueue};
use crate::species_registry::SpeciesRegistry;

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// Outgoing events queued by ECS operations for the presentation layer.
#[derive(Resource, Default)]
pub struct OutgoingEvents {
    pub events: Vec<GameEvent>,
}

/// World clock, advanced by clamped tick deltas.
#[derive(Resource, Default)]
pub struct WorldClock(pub SimClock);

/// Creature ID allocator. IDs are never reused.
#[derive(Resource)]
pub struct CreatureIdAllocator {
    next: AtomicU64,
}

impl CreatureIdAllocator {
    pub fn new(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }

    /// Allocate the next unique creature ID.
    pub fn allocate(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// Lookup from creature ID to its ECS entity. Holds corpses until removal.
#[derive(Resource, Default)]
pub struct CreatureIndex(pub HashMap<CreatureId, Entity>);

// ---------------------------------------------------------------------------
// Game events (ECS → presentation)
// ---------------------------------------------------------------------------

/// Events produced by the game world, consumed by rendering and UI.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    CreatureSpawned {
        creature_id: CreatureId,
        species_id: String,
        position: (f32, f32, f32),
        health: f32,
        max_health: f32,
    },
    CreatureMoved {
        creature_id: CreatureId,
        position: (f32, f32, f32),
        facing: f32,
    },
    CreatureStateChanged {
        creature_id: CreatureId,
        from: AiState,
        to: AiState,
    },
    /// Health bar update. `remaining_health` is never below 0.
    DamageApplied {
        creature_id: CreatureId,
        amount: f32,
        remaining_health: f32,
    },
    /// Death animation can start; the corpse stays until `CreatureRemoved`.
    CreatureDied {
        creature_id: CreatureId,
        position: (f32, f32, f32),
    },
    LootDropped {
        creature_id: CreatureId,
        item_type: String,
        amount: u32,
        position: (f32, f32),
    },
    CreatureRemoved { creature_id: CreatureId },
    CreatureAttackedPlayer { creature_id: CreatureId, damage: f32 },
}

/// Read-only view of one creature.
#[derive(Debug, Clone)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub species_id: String,
    pub position: (f32, f32, f32),
    pub facing: f32,
    pub health: f32,
    pub max_health: f32,
    pub state: AiState,
    pub is_dead: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorldTimer {
    RemoveCorpse(CreatureId),
    Replenish,
}

// ---------------------------------------------------------------------------
// GameWorld
// ---------------------------------------------------------------------------

/// The ECS game world holding every creature.
pub struct GameWorld {
    pub world: World,
    species: SpeciesRegistry,
    config: GameConfig,
    terrain: Box<dyn Terrain>,
    rng: StdRng,
    timers: TimerQueue<WorldTimer>,
}

impl GameWorld {
    pub fn new(species: SpeciesRegistry, config: GameConfig, terrain: Box<dyn Terrain>) -> Self {
        let mut world = World::new();
        world.insert_resource(OutgoingEvents::default());
        world.insert_resource(WorldClock::default());
        world.insert_resource(CreatureIdAllocator::new(1));
        world.insert_resource(CreatureIndex::default());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            world,
            species,
            config,
            terrain,
            rng,
            timers: TimerQueue::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn species(&self) -> &SpeciesRegistry {
        &self.species
    }

    pub fn terrain(&self) -> &dyn Terrain {
        self.terrain.as_ref()
    }

    /// Current world time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.world.resource::<WorldClock>().0.now_ms()
    }

    /// Current world time in microseconds. Timers and cooldowns run on this.
    pub fn now_us(&self) -> u64 {
        self.world.resource::<WorldClock>().0.now_us()
    }

    /// Number of armed corpse-removal and replenish timers.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Spawn `target_population` weighted-random creatures. Returns how many were placed.
    pub fn spawn_initial_population(&mut self) -> usize {
        let target = self.config.target_population;
        let mut spawned = 0;
        for _ in 0..target {
            if spawning::spawn_random_creature(
                &mut self.world,
                &self.species,
                self.terrain.as_ref(),
                &self.config,
                &mut self.rng,
            )
            .is_some()
            {
                spawned += 1;
            }
        }
        info!("Spawned {spawned}/{target} creatures");
        spawned
    }

    /// Spawn a creature of `species_id` at `(x, z)`, standing on the terrain.
    pub fn spawn_creature(&mut self, species_id: &str, x: f32, z: f32) -> Result<CreatureId, GameError> {
        let species = self
            .species
            .get(species_id)
            .cloned()
            .ok_or_else(|| GameError::UnknownSpecies(species_id.to_string()))?;
        let y = self.terrain.height_at(x, z);
        Ok(spawning::spawn_creature_internal(&mut self.world, &species, (x, y, z)))
    }

    /// Run one tick: timers, AI, attacks on the player, movement, move events.
    pub fn tick(&mut self, delta_seconds: f32, player: &mut dyn PlayerHandle) {
        let dt = self.config.clamp_delta(delta_seconds);
        let (now, dt_us) = {
            let mut clock = self.world.resource_mut::<WorldClock>();
            let step = clock.0.advance(dt);
            (clock.0.now_us(), step)
        };

        self.process_timers(now);

        let attacks = system_ai_tick(
            &mut self.world,
            player.position(),
            now,
            dt_us,
            &self.config,
            &mut self.rng,
        );
        for attack in attacks {
            debug!(
                "Creature {} hit the player for {}",
                attack.creature_id.0, attack.damage
            );
            player.take_damage(attack.damage);
        }

        system_movement(
            &mut self.world,
            dt,
            self.config.velocity_damping,
            self.terrain.as_ref(),
        );
        system_collect_moves(&mut self.world);
    }

    /// Deal `amount` damage to a creature on behalf of `attacker`.
    ///
    /// Drops of a kill are placed through `sink`. A dead or unknown creature is
    /// ignored, so a corpse never yields a second set of drops.
    pub fn damage_creature(
        &mut self,
        id: CreatureId,
        amount: f32,
        attacker: Target,
        sink: Option<&mut dyn ItemSink>,
    ) -> DamageOutcome {
        let Some(entity) = self.entity_of(id) else {
            return DamageOutcome::Ignored;
        };
        let Some(hit) = combat::apply_hit(
            &mut self.world,
            entity,
            amount,
            attacker,
            self.config.flee_duration_ms,
        ) else {
            return DamageOutcome::Ignored;
        };

        let mut events = vec![GameEvent::DamageApplied {
            creature_id: id,
            amount: hit.applied,
            remaining_health: hit.health.max(0.0),
        }];
        if hit.from != hit.to {
            events.push(GameEvent::CreatureStateChanged {
                creature_id: id,
                from: hit.from,
                to: hit.to,
            });
        }
        self.push_events(events);

        if hit.health > 0.0 {
            return DamageOutcome::Hurt {
                remaining: hit.health,
            };
        }

        let Some(death) = combat::resolve_death(&mut self.world, entity, &mut self.rng) else {
            return DamageOutcome::Ignored;
        };
        let (x, _, z) = death.position;

        match sink {
            Some(sink) => {
                for drop in &death.drops {
                    sink.create_ground_item(&drop.item_type, drop.amount, x, z);
                }
            }
            None if !death.drops.is_empty() => {
                warn!(
                    "Creature {} dropped {} item stacks with no item sink attached",
                    id.0,
                    death.drops.len()
                );
            }
            None => {}
        }

        let mut events = vec![GameEvent::CreatureDied {
            creature_id: id,
            position: death.position,
        }];
        events.extend(death.drops.iter().map(|drop| GameEvent::LootDropped {
            creature_id: id,
            item_type: drop.item_type.clone(),
            amount: drop.amount,
            position: (x, z),
        }));
        self.push_events(events);

        let now = self.now_us();
        self.timers.schedule(
            now,
            ms_to_us(self.config.corpse_removal_delay_ms),
            WorldTimer::RemoveCorpse(id),
        );
        self.timers.schedule(
            now,
            ms_to_us(self.config.replenish_delay_ms),
            WorldTimer::Replenish,
        );

        debug!("Creature {} died, {} drops", id.0, death.drops.len());
        DamageOutcome::Killed { drops: death.drops }
    }

    /// Nearest live creature within `max_distance` (inclusive, 3D).
    pub fn closest_creature(
        &mut self,
        position: (f32, f32, f32),
        max_distance: f32,
    ) -> Option<CreatureSnapshot> {
        self.creatures()
            .into_iter()
            .map(|c| (movement::distance_3d(position, c.position), c))
            .filter(|(d, _)| *d <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, c)| c)
    }

    /// Snapshot of one creature, including a corpse awaiting removal.
    pub fn creature(&self, id: CreatureId) -> Option<CreatureSnapshot> {
        let entity = self.entity_of(id)?;
        self.snapshot(entity)
    }

    /// Snapshots of every live creature.
    pub fn creatures(&mut self) -> Vec<CreatureSnapshot> {
        let entities: Vec<Entity> = self
            .world
            .query_filtered::<Entity, (With<Creature>, Without<Dead>)>()
            .iter(&self.world)
            .collect();
        entities
            .into_iter()
            .filter_map(|entity| self.snapshot(entity))
            .collect()
    }

    pub fn alive_count(&mut self) -> usize {
        self.world
            .query_filtered::<(), (With<Creature>, Without<Dead>)>()
            .iter(&self.world)
            .count()
    }

    /// Drain all pending outgoing events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.world.resource_mut::<OutgoingEvents>().events)
    }

    fn entity_of(&self, id: CreatureId) -> Option<Entity> {
        self.world.resource::<CreatureIndex>().0.get(&id).copied()
    }

    fn snapshot(&self, entity: Entity) -> Option<CreatureSnapshot> {
        let health = self.world.get::<Health>(entity)?;
        let brain = self.world.get::<Brain>(entity)?;
        Some(CreatureSnapshot {
            id: *self.world.get::<CreatureId>(entity)?,
            species_id: self.world.get::<Species>(entity)?.0.id.clone(),
            position: self.world.get::<Position>(entity)?.as_tuple(),
            facing: self.world.get::<Facing>(entity).map_or(0.0, |f| f.0),
            health: health.current,
            max_health: health.max,
            state: brain.state,
            is_dead: self.world.get::<Dead>(entity).is_some(),
        })
    }

    fn push_events(&mut self, events: Vec<GameEvent>) {
        self.world
            .resource_mut::<OutgoingEvents>()
            .events
            .extend(events);
    }

    fn process_timers(&mut self, now: u64) {
        for timer in self.timers.drain_due(now) {
            match timer {
                WorldTimer::RemoveCorpse(id) => self.remove_corpse(id),
                WorldTimer::Replenish => {
                    let spawned = spawning::spawn_random_creature(
                        &mut self.world,
                        &self.species,
                        self.terrain.as_ref(),
                        &self.config,
                        &mut self.rng,
                    );
                    if let Some(id) = spawned {
                        debug!("Replenished population with creature {}", id.0);
                    }
                }
            }
        }
    }

    fn remove_corpse(&mut self, id: CreatureId) {
        let Some(entity) = self.world.resource_mut::<CreatureIndex>().0.remove(&id) else {
            return;
        };
        self.world.despawn(entity);
        self.push_events(vec![GameEvent::CreatureRemoved { creature_id: id }]);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::{FlatTerrain, Tool};
    use crate::loot::DropEvent;

    struct Idle {
        pos: (f32, f32, f32),
    }

    impl PlayerHandle for Idle {
        fn position(&self) -> (f32, f32, f32) {
            self.pos
        }

        fn take_damage(&mut self, _amount: f32) {}
    }

    #[derive(Default)]
    struct Ground {
        items: Vec<(String, u32, f32, f32)>,
    }

    impl ItemSink for Ground {
        fn create_ground_item(&mut self, item_type: &str, amount: u32, x: f32, z: f32) {
            self.items.push((item_type.to_string(), amount, x, z));
        }

        fn add_item(&mut self, _item_type: &str, _amount: u32) -> bool {
            true
        }

        fn remove_item(&mut self, _item_type: &str, _amount: u32) -> bool {
            false
        }

        fn has_item(&self, _item_type: &str, _amount: u32) -> bool {
            false
        }

        fn selected_tool(&self) -> Option<Tool> {
            None
        }
    }

    fn world() -> GameWorld {
        let config = GameConfig {
            seed: Some(21),
            wander_chance: 0.0,
            ..Default::default()
        };
        GameWorld::new(SpeciesRegistry::new(), config, Box::new(FlatTerrain(1.0)))
    }

    fn far_player() -> Idle {
        Idle {
            pos: (500.0, 0.0, 500.0),
        }
    }

    #[test]
    fn spawn_unknown_species_errors() {
        let mut gw = world();
        assert!(matches!(
            gw.spawn_creature("dragon", 0.0, 0.0),
            Err(GameError::UnknownSpecies(_))
        ));
    }

    #[test]
    fn ids_are_unique() {
        let mut gw = world();
        let a = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        let b = gw.spawn_creature("deer", 1.0, 0.0).unwrap();
        assert_ne!(a, b);
        assert_eq!(gw.alive_count(), 2);
    }

    #[test]
    fn spawn_sits_on_terrain() {
        let mut gw = world();
        let id = gw.spawn_creature("rabbit", 3.0, 4.0).unwrap();
        assert_eq!(gw.creature(id).unwrap().position, (3.0, 1.0, 4.0));
    }

    #[test]
    fn damage_hurts_and_reports() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        gw.drain_events();

        let outcome = gw.damage_creature(id, 10.0, Target::Player, None);
        assert_eq!(outcome, DamageOutcome::Hurt { remaining: 20.0 });

        let events = gw.drain_events();
        assert!(events.contains(&GameEvent::DamageApplied {
            creature_id: id,
            amount: 10.0,
            remaining_health: 20.0,
        }));
        assert!(events.contains(&GameEvent::CreatureStateChanged {
            creature_id: id,
            from: AiState::Idle,
            to: AiState::Flee,
        }));
    }

    #[test]
    fn aggressive_retaliates_against_attacker() {
        let mut gw = world();
        let id = gw.spawn_creature("wolf", 0.0, 0.0).unwrap();
        gw.damage_creature(id, 1.0, Target::Player, None);
        assert_eq!(gw.creature(id).unwrap().state, AiState::Chase);
    }

    #[test]
    fn kill_drops_through_sink() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 4.0, -2.0).unwrap();
        let mut ground = Ground::default();

        let sink: &mut dyn ItemSink = &mut ground;
        let outcome = gw.damage_creature(id, 100.0, Target::Player, Some(sink));
        let DamageOutcome::Killed { drops } = outcome else {
            panic!("expected a kill, got {outcome:?}");
        };
        assert_eq!(ground.items.len(), drops.len());
        for ((item, amount, x, z), drop) in ground.items.iter().zip(&drops) {
            assert_eq!(&DropEvent::new(item.clone(), *amount), drop);
            assert_eq!((*x, *z), (4.0, -2.0));
        }

        let events = gw.drain_events();
        assert!(events.contains(&GameEvent::CreatureDied {
            creature_id: id,
            position: (4.0, 1.0, -2.0),
        }));
        let loot = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LootDropped { .. }))
            .count();
        assert_eq!(loot, drops.len());
    }

    #[test]
    fn dead_has_zero_health_and_is_hidden() {
        let mut gw = world();
        let id = gw.spawn_creature("rabbit", 0.0, 0.0).unwrap();
        gw.damage_creature(id, 1000.0, Target::Player, None);

        let snap = gw.creature(id).unwrap();
        assert!(snap.is_dead);
        assert_eq!(snap.health, 0.0);
        assert!(gw.closest_creature((0.0, 1.0, 0.0), 50.0).is_none());
        assert_eq!(gw.alive_count(), 0);
        assert!(gw.creatures().is_empty());
    }

    #[test]
    fn double_damage_on_corpse_is_ignored() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        let mut ground = Ground::default();

        let first = gw.damage_creature(id, 100.0, Target::Player, Some(&mut ground as &mut dyn ItemSink));
        assert!(matches!(first, DamageOutcome::Killed { .. }));
        let dropped = ground.items.len();
        gw.drain_events();

        let second = gw.damage_creature(id, 100.0, Target::Player, Some(&mut ground as &mut dyn ItemSink));
        assert_eq!(second, DamageOutcome::Ignored);
        assert_eq!(ground.items.len(), dropped);
        assert!(gw.drain_events().is_empty());
        assert_eq!(gw.pending_timers(), 2);
    }

    #[test]
    fn unknown_creature_is_ignored() {
        let mut gw = world();
        assert_eq!(
            gw.damage_creature(CreatureId(999), 5.0, Target::Player, None),
            DamageOutcome::Ignored
        );
    }

    #[test]
    fn missing_sink_still_reports_drops() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        let outcome = gw.damage_creature(id, 100.0, Target::Player, None);
        let DamageOutcome::Killed { drops } = outcome else {
            panic!("expected a kill");
        };
        let loot = gw
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LootDropped { .. }))
            .count();
        assert_eq!(loot, drops.len());
    }

    #[test]
    fn corpse_removed_after_delay() {
        let mut gw = world();
        let id = gw.spawn_creature("rabbit", 0.0, 0.0).unwrap();
        gw.damage_creature(id, 100.0, Target::Player, None);
        gw.drain_events();
        let mut player = far_player();

        // 900 ms: still lying there.
        for _ in 0..9 {
            gw.tick(0.1, &mut player);
        }
        assert!(gw.creature(id).is_some());

        gw.tick(0.1, &mut player);
        assert!(gw.creature(id).is_none());
        assert!(gw
            .drain_events()
            .contains(&GameEvent::CreatureRemoved { creature_id: id }));
    }

    #[test]
    fn replenish_spawns_exactly_one_after_delay() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        gw.damage_creature(id, 100.0, Target::Player, None);
        assert_eq!(gw.alive_count(), 0);
        let mut player = far_player();

        for _ in 0..99 {
            gw.tick(0.1, &mut player);
        }
        assert_eq!(gw.now_ms(), 9_900);
        assert_eq!(gw.alive_count(), 0);

        gw.tick(0.1, &mut player);
        assert_eq!(gw.alive_count(), 1);

        for _ in 0..100 {
            gw.tick(0.1, &mut player);
        }
        assert_eq!(gw.alive_count(), 1);
        assert_eq!(gw.pending_timers(), 0);
    }

    #[test]
    fn replenish_waits_full_delay_at_60_fps() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        gw.damage_creature(id, 100.0, Target::Player, None);
        let mut player = far_player();

        let dt = 1.0f32 / 60.0;
        let mut elapsed = 0.0f64;
        for _ in 0..700 {
            gw.tick(dt, &mut player);
            elapsed += f64::from(dt);
            if gw.alive_count() == 1 {
                break;
            }
        }
        assert_eq!(gw.alive_count(), 1, "replenish never fired");
        assert!(elapsed >= 10.0, "replenished after only {elapsed}s");
        assert!(elapsed < 10.0 + f64::from(dt) * 1.5);
    }

    #[test]
    fn timers_fire_with_sub_millisecond_deltas() {
        let config = GameConfig {
            seed: Some(21),
            wander_chance: 0.0,
            corpse_removal_delay_ms: 5,
            ..Default::default()
        };
        let mut gw = GameWorld::new(SpeciesRegistry::new(), config, Box::new(FlatTerrain(1.0)));
        let id = gw.spawn_creature("rabbit", 0.0, 0.0).unwrap();
        gw.damage_creature(id, 100.0, Target::Player, None);
        let mut player = far_player();

        let dt = 0.000_25f32;
        let mut elapsed = 0.0f64;
        for _ in 0..100 {
            gw.tick(dt, &mut player);
            elapsed += f64::from(dt);
            if gw.creature(id).is_none() {
                break;
            }
        }
        assert!(gw.creature(id).is_none(), "corpse never removed");
        assert!(elapsed >= 0.005, "removed after only {elapsed}s");
        assert!(gw.now_us() >= 5_000);
    }

    #[test]
    fn wolf_attack_cadence_holds_at_60_fps() {
        struct Counter {
            hits: u32,
        }

        impl PlayerHandle for Counter {
            fn position(&self) -> (f32, f32, f32) {
                (0.0, 1.0, 0.0)
            }

            fn take_damage(&mut self, _amount: f32) {
                self.hits += 1;
            }
        }

        let mut gw = world();
        gw.spawn_creature("wolf", 1.0, 0.0).unwrap();
        let mut player = Counter { hits: 0 };

        let dt = 1.0f32 / 60.0;
        let mut elapsed = 0.0f64;
        let mut hit_times = Vec::new();
        for _ in 0..600 {
            let before = player.hits;
            gw.tick(dt, &mut player);
            elapsed += f64::from(dt);
            if player.hits > before {
                hit_times.push(elapsed);
            }
        }

        // Cooldown is 1000 ms, so ten seconds allow at most ten hits.
        assert!((9..=10).contains(&hit_times.len()), "{hit_times:?}");
        for pair in hit_times.windows(2) {
            assert!(pair[1] - pair[0] >= 1.0, "hits too close: {pair:?}");
        }
    }

    #[test]
    fn negative_damage_reports_nothing_applied() {
        let mut gw = world();
        let id = gw.spawn_creature("deer", 0.0, 0.0).unwrap();
        gw.drain_events();

        let outcome = gw.damage_creature(id, -5.0, Target::Player, None);
        assert_eq!(outcome, DamageOutcome::Hurt { remaining: 30.0 });
        assert!(gw.drain_events().contains(&GameEvent::DamageApplied {
            creature_id: id,
            amount: 0.0,
            remaining_health: 30.0,
        }));
    }

    #[test]
    fn closest_creature_picks_nearest_within_range() {
        let mut gw = world();
        let near = gw.spawn_creature("deer", 3.0, 0.0).unwrap();
        gw.spawn_creature("deer", 6.0, 0.0).unwrap();

        let found = gw.closest_creature((0.0, 1.0, 0.0), 10.0).unwrap();
        assert_eq!(found.id, near);
        // Inclusive bound.
        assert!(gw.closest_creature((0.0, 1.0, 0.0), 3.0).is_some());
        assert!(gw.closest_creature((0.0, 1.0, 0.0), 2.9).is_none());
    }

    #[test]
    fn tick_clamps_delta() {
        let mut gw = world();
        let mut player = far_player();
        gw.tick(5.0, &mut player);
        assert_eq!(gw.now_ms(), 100);
        gw.tick(-1.0, &mut player);
        assert_eq!(gw.now_ms(), 100);
    }

    #[test]
    fn wolf_loses_target_beyond_range() {
        let mut gw = world();
        let id = gw.spawn_creature("wolf", 10.0, 0.0).unwrap();
        let mut player = Idle {
            pos: (0.0, 1.0, 0.0),
        };
        gw.tick(0.05, &mut player);
        assert_eq!(gw.creature(id).unwrap().state, AiState::Chase);

        player.pos = (60.0, 1.0, 0.0);
        gw.tick(0.05, &mut player);
        assert_eq!(gw.creature(id).unwrap().state, AiState::Idle);
    }
}
