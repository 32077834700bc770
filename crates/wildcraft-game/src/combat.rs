//! Damage application, hit reactions, and death resolution for creatures.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::ai::state::{AiState, Brain, Target};
use crate::components::*;
use crate::loot::{self, DropEvent};
use crate::species_registry::{BehaviorClass, SpeciesDefinition};

/// Result of `damage_creature`.
#[derive(Debug, Clone, PartialEq)]
pub enum DamageOutcome {
    /// Unknown or already dead creature; nothing changed.
    Ignored,
    Hurt { remaining: f32 },
    Killed { drops: Vec<DropEvent> },
}

/// How a creature responds to being hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageReaction {
    Flee,
    Retaliate,
}

/// Reaction for a species.
///
/// Passive creatures flee. Neutral creatures retaliate only when
/// `aggro_on_hit` is set and flee otherwise. Aggressive creatures always retaliate.
pub fn reaction_for(species: &SpeciesDefinition) -> DamageReaction {
    match species.behavior {
        BehaviorClass::Passive => DamageReaction::Flee,
        BehaviorClass::Neutral if species.aggro_on_hit => DamageReaction::Retaliate,
        BehaviorClass::Neutral => DamageReaction::Flee,
        BehaviorClass::Aggressive => DamageReaction::Retaliate,
    }
}

/// Switch the brain into the reaction state.
pub fn apply_reaction(
    brain: &mut Brain,
    reaction: DamageReaction,
    attacker: Target,
    flee_duration_ms: u64,
) {
    match reaction {
        DamageReaction::Flee => brain.enter_flee(flee_duration_ms),
        DamageReaction::Retaliate => brain.enter_chase(attacker),
    }
}

/// Health change and state transition caused by one hit.
#[derive(Debug, Clone, Copy)]
pub struct HitReport {
    /// Damage actually subtracted. Negative amounts apply as zero.
    pub applied: f32,
    /// Health after the hit. May be negative until death is resolved.
    pub health: f32,
    pub from: AiState,
    pub to: AiState,
}

/// Subtract `amount` from a live creature and trigger its reaction.
///
/// Returns `None` if the entity is missing or already dead.
pub fn apply_hit(
    world: &mut World,
    entity: Entity,
    amount: f32,
    attacker: Target,
    flee_duration_ms: u64,
) -> Option<HitReport> {
    if world.get::<Dead>(entity).is_some() {
        return None;
    }

    let reaction = reaction_for(&world.get::<Species>(entity)?.0);

    let applied = amount.max(0.0);
    let health = {
        let mut health = world.get_mut::<Health>(entity)?;
        health.current -= applied;
        health.current
    };

    let mut brain = world.get_mut::<Brain>(entity)?;
    let from = brain.state;
    apply_reaction(&mut brain, reaction, attacker, flee_duration_ms);

    Some(HitReport {
        applied,
        health,
        from,
        to: brain.state,
    })
}

/// A creature's death: where it fell and what it dropped.
#[derive(Debug, Clone)]
pub struct DeathReport {
    pub position: (f32, f32, f32),
    pub drops: Vec<DropEvent>,
}

/// Mark a creature dead, zero its health and velocity, and roll its drops.
///
/// Returns `None` if it was already dead, so a creature is resolved at most once.
pub fn resolve_death(world: &mut World, entity: Entity, rng: &mut impl Rng) -> Option<DeathReport> {
    if world.get::<Dead>(entity).is_some() {
        return None;
    }

    let position = world.get::<Position>(entity)?.as_tuple();
    let drops = loot::roll_drops(&world.get::<Species>(entity)?.0.drops, rng);

    if let Some(mut health) = world.get_mut::<Health>(entity) {
        health.current = 0.0;
    }
    if let Some(mut vel) = world.get_mut::<Velocity>(entity) {
        *vel = Velocity::default();
    }
    world.entity_mut(entity).insert(Dead);

    Some(DeathReport {
        position,
        drops,
    })
}
