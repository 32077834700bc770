//! Game logic: creature ECS, AI, combat, and resource-node lifecycle.

pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod error;
pub mod game_world;
pub mod interfaces;
pub mod loot;
pub mod node_registry;
pub mod resources;
pub mod schedule;
pub mod species_registry;

pub use ai::state::{AiState, Target};
pub use combat::DamageOutcome;
pub use components::CreatureId;
pub use config::GameConfig;
pub use error::GameError;
pub use game_world::{CreatureSnapshot, GameEvent, GameWorld};
pub use interfaces::{FlatTerrain, ItemSink, PlayerHandle, Terrain, Tool};
pub use loot::DropEvent;
pub use node_registry::{NodeRegistry, NodeTypeDefinition};
pub use resources::{NodeId, NodeState, ResourceEvent, ResourceField, ResourceNode};
pub use species_registry::{BehaviorClass, SpeciesDefinition, SpeciesRegistry};
