use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use wildcraft_game::GameConfig;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub simulation: SimulationSection,
    /// Creature world tunables, passed straight to the game crate.
    pub world: GameConfig,
    pub terrain: TerrainSection,
    pub resources: ResourcesSection,
    pub player: PlayerSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Deserialize)]
pub struct SimulationSection {
    /// Number of ticks to run. 0 = until Ctrl+C.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Frame delta fed to every tick, in seconds.
    #[serde(default = "default_delta_seconds")]
    pub delta_seconds: f32,
    /// Pace ticks to wall-clock time instead of running flat out.
    #[serde(default)]
    pub realtime: bool,
    /// Log a summary every N ticks. 0 = only at the end.
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u64,
    /// Optional JSON file replacing the built-in species table.
    #[serde(default)]
    pub species_file: Option<String>,
}

fn default_ticks() -> u64 {
    12_000
}

fn default_delta_seconds() -> f32 {
    0.05
}

fn default_summary_interval() -> u64 {
    1_200
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            delta_seconds: default_delta_seconds(),
            realtime: false,
            summary_interval: default_summary_interval(),
            species_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TerrainSection {
    #[serde(default = "default_terrain_seed")]
    pub seed: u64,
    /// Peak height of the hills above `base_height`.
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,
    /// Spatial frequency of the hills (radians per unit).
    #[serde(default = "default_frequency")]
    pub frequency: f32,
    /// Height offset. Water is everything below 0.
    #[serde(default = "default_base_height")]
    pub base_height: f32,
}

fn default_terrain_seed() -> u64 {
    7
}

fn default_amplitude() -> f32 {
    12.0
}

fn default_frequency() -> f32 {
    0.02
}

fn default_base_height() -> f32 {
    6.0
}

impl Default for TerrainSection {
    fn default() -> Self {
        Self {
            seed: default_terrain_seed(),
            amplitude: default_amplitude(),
            frequency: default_frequency(),
            base_height: default_base_height(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ResourcesSection {
    /// Nodes are scattered within this radius of the world center.
    #[serde(default = "default_resource_radius")]
    pub radius: f32,
    /// Node count per node type id.
    #[serde(default = "default_node_counts")]
    pub counts: BTreeMap<String, u32>,
    /// Optional JSON file replacing the built-in node types.
    #[serde(default)]
    pub node_types_file: Option<String>,
}

fn default_resource_radius() -> f32 {
    80.0
}

fn default_node_counts() -> BTreeMap<String, u32> {
    [("plant", 40), ("rock", 20), ("tree", 30)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

impl Default for ResourcesSection {
    fn default() -> Self {
        Self {
            radius: default_resource_radius(),
            counts: default_node_counts(),
            node_types_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PlayerSection {
    #[serde(default = "default_max_health")]
    pub max_health: f32,
    /// Unarmed damage before the tool multiplier.
    #[serde(default = "default_base_damage")]
    pub base_damage: f32,
    #[serde(default = "default_attack_reach")]
    pub attack_reach: f32,
    #[serde(default = "default_gather_reach")]
    pub gather_reach: f32,
    /// Ground items within this radius are picked up every tick.
    #[serde(default = "default_pickup_radius")]
    pub pickup_radius: f32,
    /// Radius of the scripted circular walk around the world center.
    #[serde(default = "default_walk_radius")]
    pub walk_radius: f32,
    /// Walking speed in units/second.
    #[serde(default = "default_walk_speed")]
    pub walk_speed: f32,
    /// Minimum time between two player actions.
    #[serde(default = "default_action_interval_ms")]
    pub action_interval_ms: u64,
    /// Items in the hotbar at start.
    #[serde(default = "default_starting_items")]
    pub starting_items: Vec<String>,
}

fn default_max_health() -> f32 {
    100.0
}

fn default_base_damage() -> f32 {
    5.0
}

fn default_attack_reach() -> f32 {
    3.0
}

fn default_gather_reach() -> f32 {
    3.0
}

fn default_pickup_radius() -> f32 {
    2.5
}

fn default_walk_radius() -> f32 {
    40.0
}

fn default_walk_speed() -> f32 {
    3.0
}

fn default_action_interval_ms() -> u64 {
    500
}

fn default_starting_items() -> Vec<String> {
    vec!["spear".into(), "axe".into(), "pickaxe".into()]
}

impl Default for PlayerSection {
    fn default() -> Self {
        Self {
            max_health: default_max_health(),
            base_damage: default_base_damage(),
            attack_reach: default_attack_reach(),
            gather_reach: default_gather_reach(),
            pickup_radius: default_pickup_radius(),
            walk_radius: default_walk_radius(),
            walk_speed: default_walk_speed(),
            action_interval_ms: default_action_interval_ms(),
            starting_items: default_starting_items(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoggingSection {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".into()
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl SimConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
