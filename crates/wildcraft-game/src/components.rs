//! ECS components for creature agents.

use std::sync::Arc;

use bevy_ecs::prelude::*;

use crate::species_registry::SpeciesDefinition;

/// Stable identity for a creature, independent of the ECS entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CreatureId(pub u64);

/// Shared, read-only species definition.
#[derive(Component, Debug, Clone)]
pub struct Species(pub Arc<SpeciesDefinition>);

/// Position in the world.
#[derive(Component, Debug, Clone, Copy)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub fn as_tuple(&self) -> (f32, f32, f32) {
        (self.x, self.y, self.z)
    }
}

/// Velocity in units/second.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Velocity {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Facing angle around the vertical axis, in radians (`atan2(dx, dz)`).
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Facing(pub f32);

/// Health points.
#[derive(Component, Debug, Clone, Copy)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Marker: this creature is a wild creature.
#[derive(Component, Debug)]
pub struct Creature;

/// Marker: this creature is dead (corpse pending removal).
#[derive(Component, Debug)]
pub struct Dead;
