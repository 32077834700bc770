//! Resource node type definitions.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::GameError;

/// Definition of a harvestable node type.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeTypeDefinition {
    /// Registry identifier, e.g. `"tree"`.
    pub id: String,
    pub max_health: u32,
    /// Item produced by each gather.
    pub drop_item: String,
    /// Items per gather before the multiplier is applied.
    pub base_amount: u32,
    #[serde(default = "default_respawn_delay_ms")]
    pub respawn_delay_ms: u64,
    /// Distance within which the gather prompt is shown.
    #[serde(default = "default_gather_range")]
    pub gather_range: f32,
}

fn default_respawn_delay_ms() -> u64 {
    60_000
}

fn default_gather_range() -> f32 {
    3.0
}

#[derive(Deserialize)]
struct NodeTypeFile {
    node_types: Vec<NodeTypeDefinition>,
}

/// Registry of resource node types.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    types: Vec<Arc<NodeTypeDefinition>>,
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRegistry {
    /// Build the registry with trees, rocks and plants.
    pub fn new() -> Self {
        let types = vec![
            NodeTypeDefinition {
                id: "tree".into(),
                max_health: 5,
                drop_item: "wood".into(),
                base_amount: 1,
                respawn_delay_ms: default_respawn_delay_ms(),
                gather_range: default_gather_range(),
            },
            NodeTypeDefinition {
                id: "rock".into(),
                max_health: 5,
                drop_item: "stone".into(),
                base_amount: 1,
                respawn_delay_ms: default_respawn_delay_ms(),
                gather_range: default_gather_range(),
            },
            NodeTypeDefinition {
                id: "plant".into(),
                max_health: 2,
                drop_item: "fiber".into(),
                base_amount: 2,
                respawn_delay_ms: default_respawn_delay_ms(),
                gather_range: 2.0,
            },
        ];
        Self {
            types: types.into_iter().map(Arc::new).collect(),
        }
    }

    /// Parse node types from JSON: `{"node_types": [ {...}, ... ]}`.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let file: NodeTypeFile = serde_json::from_str(json)?;
        let mut reg = Self { types: Vec::new() };
        for def in file.node_types {
            reg.register_type(def)?;
        }
        Ok(reg)
    }

    pub fn get(&self, id: &str) -> Option<&Arc<NodeTypeDefinition>> {
        self.types.iter().find(|t| t.id == id)
    }

    pub fn all(&self) -> &[Arc<NodeTypeDefinition>] {
        &self.types
    }

    /// Register an extra node type (e.g. ore veins or berry bushes).
    pub fn register_type(&mut self, def: NodeTypeDefinition) -> Result<(), GameError> {
        if def.max_health == 0 {
            return Err(GameError::InvalidStat {
                owner: def.id,
                field: "max_health",
                value: 0.0,
            });
        }
        if self.get(&def.id).is_some() {
            return Err(GameError::DuplicateId(def.id));
        }
        self.types.push(Arc::new(def));
        Ok(())
    }
}
