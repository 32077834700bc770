//! One headless play session: creature world, resource field, player, and inventory.

use std::error::Error;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use wildcraft_game::{
    DamageOutcome, DropEvent, GameEvent, GameWorld, ItemSink, NodeRegistry, ResourceEvent,
    ResourceField, SpeciesRegistry, Target,
};

use crate::config::SimConfig;
use crate::inventory::Inventory;
use crate::player::SimPlayer;
use crate::terrain::RollingHills;
use crate::tools;
use crate::world_gen;

/// Running totals for the session summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub ticks: u64,
    pub attacks: u32,
    pub kills: u32,
    pub damage_dealt: f32,
    pub gathers: u32,
    pub items_gathered: u32,
    pub items_picked_up: u32,
    pub nodes_depleted: u32,
    pub nodes_respawned: u32,
    pub creatures_spawned: u32,
    pub creatures_removed: u32,
    /// Damage creatures dealt to the player.
    pub damage_taken: f32,
}

pub struct Session {
    pub world: GameWorld,
    pub field: ResourceField,
    pub player: SimPlayer,
    pub inventory: Inventory,
    pub stats: SessionStats,
    base_damage: f32,
    attack_reach: f32,
    gather_reach: f32,
    pickup_radius: f32,
    action_interval_ms: u64,
    next_action_ms: u64,
}

impl Session {
    /// Build the world from config: registries, terrain, creatures, and nodes.
    pub fn new(config: &SimConfig) -> Result<Self, Box<dyn Error>> {
        let species = match &config.simulation.species_file {
            Some(path) => SpeciesRegistry::from_json(&std::fs::read_to_string(path)?)?,
            None => SpeciesRegistry::new(),
        };
        let node_types = match &config.resources.node_types_file {
            Some(path) => NodeRegistry::from_json(&std::fs::read_to_string(path)?)?,
            None => NodeRegistry::new(),
        };
        let terrain = RollingHills::new(&config.terrain);

        let player = SimPlayer::new(&config.player, config.world.world_center, &terrain);
        let mut field = ResourceField::new(node_types, config.world.max_delta_seconds);
        let mut rng = match config.world.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        world_gen::scatter_nodes(
            &mut field,
            &terrain,
            &config.resources,
            &config.world,
            &mut rng,
        )?;

        let mut world = GameWorld::new(species, config.world.clone(), Box::new(terrain));
        world.spawn_initial_population();

        Ok(Self {
            world,
            field,
            player,
            inventory: Inventory::with_items(&config.player.starting_items),
            stats: SessionStats::default(),
            base_damage: config.player.base_damage,
            attack_reach: config.player.attack_reach,
            gather_reach: config.player.gather_reach,
            pickup_radius: config.player.pickup_radius,
            action_interval_ms: config.player.action_interval_ms,
            next_action_ms: 0,
        })
    }

    /// Advance the session by one frame.
    ///
    /// The player walks, the world and field tick, then the player picks up
    /// nearby items and, when its action is ready, attacks or gathers.
    pub fn step(&mut self, delta_seconds: f32) {
        self.stats.ticks += 1;
        self.player.walk(delta_seconds, self.world.terrain());
        self.world.tick(delta_seconds, &mut self.player);
        self.stats.damage_taken = self.player.damage_taken;
        self.field.update(delta_seconds);
        self.record_events();

        if self.player.is_dead {
            return;
        }

        let (x, _, z) = self.player.position;
        for (item, amount) in self
            .inventory
            .pickup_ground_items(x, z, self.pickup_radius)
        {
            debug!("Picked up {amount} {item}");
            self.stats.items_picked_up += amount;
        }

        let now = self.world.now_ms();
        if now >= self.next_action_ms {
            let acted = self.attack_nearest().is_some() || self.gather_nearest().is_some();
            if acted {
                self.next_action_ms = now + self.action_interval_ms;
            }
        }
    }

    /// Hit the nearest live creature in reach with the best weapon held.
    pub fn attack_nearest(&mut self) -> Option<DamageOutcome> {
        let target = self
            .world
            .closest_creature(self.player.position, self.attack_reach)?;

        if !self.inventory.select_item("spear") {
            self.inventory.select_item("axe");
        }
        let tool = self.inventory.selected_tool();
        let damage = self.base_damage * tools::attack_multiplier(tool.as_ref());

        let sink: &mut dyn ItemSink = &mut self.inventory;
        let outcome = self
            .world
            .damage_creature(target.id, damage, Target::Player, Some(sink));
        match &outcome {
            DamageOutcome::Ignored => return None,
            DamageOutcome::Hurt { remaining } => {
                debug!(
                    "Hit {} {} for {damage} ({remaining} left)",
                    target.species_id, target.id.0
                );
            }
            DamageOutcome::Killed { drops } => {
                info!(
                    "Killed {} {} ({} drops)",
                    target.species_id,
                    target.id.0,
                    drops.len()
                );
                self.stats.kills += 1;
            }
        }
        self.stats.attacks += 1;
        self.stats.damage_dealt += damage;
        Some(outcome)
    }

    /// Gather once from the nearest gatherable node in reach.
    ///
    /// The yield goes to the inventory, or onto the ground if it does not fit.
    pub fn gather_nearest(&mut self) -> Option<DropEvent> {
        let (node_id, node_type) = {
            let node = self
                .field
                .closest_node(self.player.position, self.gather_reach)?;
            (node.id, node.node_type.id.clone())
        };

        if let Some(tool) = tools::tool_for_node(&node_type) {
            self.inventory.select_item(tool);
        }
        let tool = self.inventory.selected_tool();
        let multiplier = tools::gather_multiplier(tool.as_ref(), &node_type);

        let drop = self.field.gather(node_id, multiplier)?;
        if !self.inventory.add_item(&drop.item_type, drop.amount) {
            let (x, _, z) = self.player.position;
            self.inventory
                .create_ground_item(&drop.item_type, drop.amount, x, z);
        }
        self.stats.gathers += 1;
        self.stats.items_gathered += drop.amount;
        Some(drop)
    }

    fn record_events(&mut self) {
        for event in self.world.drain_events() {
            match event {
                GameEvent::CreatureSpawned { .. } => self.stats.creatures_spawned += 1,
                GameEvent::CreatureRemoved { .. } => self.stats.creatures_removed += 1,
                GameEvent::CreatureStateChanged {
                    creature_id,
                    from,
                    to,
                } => debug!("Creature {} {from} -> {to}", creature_id.0),
                _ => {}
            }
        }
        for event in self.field.drain_events() {
            match event {
                ResourceEvent::NodeDepleted { .. } => self.stats.nodes_depleted += 1,
                ResourceEvent::NodeRespawned { .. } => self.stats.nodes_respawned += 1,
                ResourceEvent::NodeGathered { .. } => {}
            }
        }
    }

    /// Log the running totals.
    pub fn log_summary(&mut self) {
        let s = &self.stats;
        info!(
            "t={:.1}s alive={} kills={} gathered={} depleted={} respawned={} player_hp={:.0}/{:.0} damage_taken={:.0}",
            self.world.now_ms() as f32 / 1000.0,
            self.world.alive_count(),
            s.kills,
            s.items_gathered,
            s.nodes_depleted,
            s.nodes_respawned,
            self.player.health,
            self.player.max_health,
            s.damage_taken,
        );
    }
}
