//! Per-creature state machine: idle, wander, chase, attack, flee.

use rand::Rng;

use crate::config::GameConfig;
use crate::species_registry::{BehaviorClass, SpeciesDefinition};

use super::movement;
use super::state::{AiState, Brain, Target};

/// Read-only snapshot of the world as seen by one creature this tick.
pub struct BrainContext<'a> {
    pub position: (f32, f32, f32),
    pub facing: f32,
    pub species: &'a SpeciesDefinition,
    pub player_position: (f32, f32, f32),
    /// Current world clock in microseconds.
    pub now_us: u64,
    /// Clock microseconds covered by this tick.
    pub dt_us: u64,
    pub tuning: &'a GameConfig,
}

/// Output of one brain step.
#[derive(Debug, Default, PartialEq)]
pub struct BrainOutput {
    /// Horizontal velocity `(vx, vz)` to apply. `None` leaves the damped velocity.
    pub velocity: Option<(f32, f32)>,
    /// New facing angle.
    pub facing: Option<f32>,
    /// Damage dealt to the player this tick.
    pub attack: Option<f32>,
}

impl BrainOutput {
    fn moving(vx: f32, vz: f32) -> Self {
        Self {
            velocity: Some((vx, vz)),
            facing: movement::facing_of(vx, vz),
            attack: None,
        }
    }

    fn holding(facing: f32) -> Self {
        Self {
            velocity: Some((0.0, 0.0)),
            facing: Some(facing),
            attack: None,
        }
    }
}

/// Advance the state machine by one tick.
pub fn step(brain: &mut Brain, ctx: &BrainContext<'_>, rng: &mut impl Rng) -> BrainOutput {
    let expired = brain.tick_timer(ctx.dt_us);
    let (x, _, z) = ctx.position;
    let (px, _, pz) = ctx.player_position;
    let player_distance = movement::distance_xz(x, z, px, pz);
    let hunting = ctx.species.behavior == BehaviorClass::Aggressive
        && player_distance < ctx.species.detection_range;

    match brain.state {
        AiState::Idle => idle(brain, ctx, hunting, rng),
        AiState::Wander => wander(brain, ctx, hunting, expired, rng),
        AiState::Chase => chase(brain, ctx),
        AiState::Attack => attack(brain, ctx),
        AiState::Flee => flee(brain, ctx, expired),
    }
}

fn idle(brain: &mut Brain, ctx: &BrainContext<'_>, hunting: bool, rng: &mut impl Rng) -> BrainOutput {
    if hunting {
        brain.enter_chase(Target::Player);
    } else if rng.gen::<f32>() < ctx.tuning.wander_chance {
        brain.enter_wander(wander_duration(ctx.tuning, rng));
    }
    BrainOutput::default()
}

fn wander(
    brain: &mut Brain,
    ctx: &BrainContext<'_>,
    hunting: bool,
    expired: bool,
    rng: &mut impl Rng,
) -> BrainOutput {
    if hunting {
        brain.enter_chase(Target::Player);
        return BrainOutput::default();
    }
    if expired {
        brain.enter_idle();
        return BrainOutput::default();
    }

    let (x, _, z) = ctx.position;
    let (gx, gz) = match brain.wander_target {
        Some((gx, gz)) if movement::distance_xz(x, z, gx, gz) >= 0.5 => (gx, gz),
        _ => {
            let r = ctx.tuning.wander_radius.max(0.5);
            (x + rng.gen_range(-r..r), z + rng.gen_range(-r..r))
        }
    };
    brain.wander_target = Some((gx, gz));

    let (vx, vz) = movement::move_toward(x, z, gx, gz, ctx.species.wander_speed);
    BrainOutput::moving(vx, vz)
}

fn chase(brain: &mut Brain, ctx: &BrainContext<'_>) -> BrainOutput {
    let Some(target) = brain.target else {
        brain.enter_idle();
        return BrainOutput::default();
    };

    let (x, _, z) = ctx.position;
    let (tx, _, tz) = target.resolve(ctx.player_position);
    let distance = movement::distance_xz(x, z, tx, tz);

    if distance > ctx.species.detection_range * ctx.tuning.lose_target_factor {
        brain.enter_idle();
        return BrainOutput::default();
    }

    if distance < ctx.species.attack_range {
        return match target {
            Target::Player => {
                brain.enter_attack();
                BrainOutput::holding(movement::facing_toward(x, z, tx, tz))
            }
            // Reached the point; nothing to attack there.
            Target::Point(_) => {
                brain.enter_idle();
                BrainOutput::default()
            }
        };
    }

    let (vx, vz) = movement::move_toward(x, z, tx, tz, ctx.species.speed);
    BrainOutput::moving(vx, vz)
}

fn attack(brain: &mut Brain, ctx: &BrainContext<'_>) -> BrainOutput {
    let Some(target) = brain.target else {
        brain.enter_idle();
        return BrainOutput::default();
    };

    let (x, _, z) = ctx.position;
    let (tx, _, tz) = target.resolve(ctx.player_position);
    let distance = movement::distance_xz(x, z, tx, tz);
    let mut output = BrainOutput::holding(movement::facing_toward(x, z, tx, tz));

    if distance > ctx.species.attack_range * ctx.tuning.attack_exit_factor {
        brain.enter_chase(target);
        return output;
    }

    if brain.attack_ready(ctx.now_us, ctx.species.attack_cooldown_ms) {
        brain.last_attack_us = Some(ctx.now_us);
        output.attack = Some(ctx.species.attack_damage);
    }
    output
}

fn flee(brain: &mut Brain, ctx: &BrainContext<'_>, expired: bool) -> BrainOutput {
    if expired {
        brain.enter_idle();
        return BrainOutput::default();
    }

    let (x, _, z) = ctx.position;
    let (px, _, pz) = ctx.player_position;
    let (vx, vz) = movement::move_away(x, z, px, pz, ctx.species.flee_speed, ctx.facing);
    BrainOutput::moving(vx, vz)
}

fn wander_duration(tuning: &GameConfig, rng: &mut impl Rng) -> u64 {
    let (min, max) = tuning.wander_duration_ms;
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min.max(1)
    }
}
