//! Resource nodes: gathering, depletion, and timed respawn.
//!
//! Nodes are never removed. A depleted node keeps its position and comes back
//! to full health once its respawn deadline passes on the field's clock.

use std::sync::Arc;

use tracing::debug;

use crate::ai::movement;
use crate::config::clamp_delta;
use crate::error::GameError;
use crate::loot::DropEvent;
use crate::node_registry::{NodeRegistry, NodeTypeDefinition};
use crate::schedule::{ms_to_us, SimClock};

/// Identifier of a node within one [`ResourceField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Coarse lifecycle state, derived from health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Available,
    Depleting,
    Depleted,
}

#[derive(Debug, Clone)]
pub struct ResourceNode {
    pub id: NodeId,
    pub node_type: Arc<NodeTypeDefinition>,
    pub position: (f32, f32, f32),
    pub health: u32,
    pub max_health: u32,
    /// False exactly when `health == 0`.
    pub can_gather: bool,
    pub respawn_delay_ms: u64,
    /// Field clock (microseconds) at which a depleted node respawns.
    pub respawn_at_us: Option<u64>,
}

impl ResourceNode {
    pub fn state(&self) -> NodeState {
        if self.health == 0 {
            NodeState::Depleted
        } else if self.health < self.max_health {
            NodeState::Depleting
        } else {
            NodeState::Available
        }
    }

    fn distance_to(&self, position: (f32, f32, f32)) -> f32 {
        movement::distance_3d(self.position, position)
    }
}

/// Node lifecycle notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent {
    NodeGathered { node_id: NodeId, drop: DropEvent },
    NodeDepleted { node_id: NodeId },
    NodeRespawned { node_id: NodeId },
}

/// Owns every resource node and its respawn clock.
pub struct ResourceField {
    registry: NodeRegistry,
    nodes: Vec<ResourceNode>,
    clock: SimClock,
    max_delta_seconds: f32,
    events: Vec<ResourceEvent>,
}

impl ResourceField {
    pub fn new(registry: NodeRegistry, max_delta_seconds: f32) -> Self {
        Self {
            registry,
            nodes: Vec::new(),
            clock: SimClock::new(),
            max_delta_seconds,
            events: Vec::new(),
        }
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn now_us(&self) -> u64 {
        self.clock.now_us()
    }

    /// Place a full-health node of `node_type` at `position`.
    pub fn add_node(&mut self, node_type: &str, position: (f32, f32, f32)) -> Result<NodeId, GameError> {
        let def = self
            .registry
            .get(node_type)
            .cloned()
            .ok_or_else(|| GameError::UnknownNodeType(node_type.to_string()))?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(ResourceNode {
            id,
            max_health: def.max_health,
            health: def.max_health,
            can_gather: true,
            respawn_delay_ms: def.respawn_delay_ms,
            respawn_at_us: None,
            position,
            node_type: def,
        });
        Ok(id)
    }

    /// Gather once from a node.
    ///
    /// A multiplier of 2 or more takes two health per gather. The yield is
    /// `floor(base_amount * multiplier)` and is granted even by the gather
    /// that depletes the node. Returns `None` for an unknown or depleted node.
    pub fn gather(&mut self, id: NodeId, amount_multiplier: f32) -> Option<DropEvent> {
        let now = self.clock.now_us();
        let node = self.nodes.get_mut(id.0 as usize)?;
        if !node.can_gather {
            return None;
        }

        let damage = if amount_multiplier >= 2.0 { 2 } else { 1 };
        node.health = node.health.saturating_sub(damage);

        let multiplier = amount_multiplier.max(0.0);
        let amount = (node.node_type.base_amount as f32 * multiplier).floor() as u32;
        let drop = DropEvent::new(node.node_type.drop_item.clone(), amount);
        self.events.push(ResourceEvent::NodeGathered {
            node_id: id,
            drop: drop.clone(),
        });

        if node.health == 0 {
            node.can_gather = false;
            node.respawn_at_us = Some(now.saturating_add(ms_to_us(node.respawn_delay_ms)));
            debug!(
                "Node {} ({}) depleted, respawn in {} ms",
                id.0, node.node_type.id, node.respawn_delay_ms
            );
            self.events.push(ResourceEvent::NodeDepleted { node_id: id });
        }

        Some(drop)
    }

    /// Advance the field clock and respawn every node whose deadline has passed.
    pub fn update(&mut self, delta_seconds: f32) {
        self.clock
            .advance(clamp_delta(delta_seconds, self.max_delta_seconds));
        let now = self.clock.now_us();

        for node in &mut self.nodes {
            match node.respawn_at_us {
                Some(deadline) if deadline <= now => {
                    node.health = node.max_health;
                    node.can_gather = true;
                    node.respawn_at_us = None;
                    self.events.push(ResourceEvent::NodeRespawned { node_id: node.id });
                }
                _ => {}
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&ResourceNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn nodes(&self) -> &[ResourceNode] {
        &self.nodes
    }

    /// Nearest gatherable node within `max_distance` (inclusive, 3D).
    pub fn closest_node(&self, position: (f32, f32, f32), max_distance: f32) -> Option<&ResourceNode> {
        self.nodes
            .iter()
            .filter(|n| n.can_gather)
            .map(|n| (n.distance_to(position), n))
            .filter(|(d, _)| *d <= max_distance)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, n)| n)
    }

    /// Whether the gather prompt for a node shows to a player at `position`.
    pub fn indicator_visible(&self, id: NodeId, position: (f32, f32, f32)) -> bool {
        self.node(id).is_some_and(|n| {
            n.can_gather && n.distance_to(position) <= n.node_type.gather_range
        })
    }

    /// IDs of every node whose gather prompt shows at `position`.
    pub fn visible_indicators(&self, position: (f32, f32, f32)) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|n| self.indicator_visible(n.id, position))
            .map(|n| n.id)
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<ResourceEvent> {
        std::mem::take(&mut self.events)
    }
}
