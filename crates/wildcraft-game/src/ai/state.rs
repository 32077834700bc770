//! Brain ECS component: behavior state, timers and target of one creature.

use std::fmt;

use bevy_ecs::prelude::*;

use crate::schedule::ms_to_us;

/// Behavior state of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Idle,
    Wander,
    Chase,
    Attack,
    Flee,
}

impl fmt::Display for AiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AiState::Idle => "idle",
            AiState::Wander => "wander",
            AiState::Chase => "chase",
            AiState::Attack => "attack",
            AiState::Flee => "flee",
        };
        f.write_str(name)
    }
}

/// What a creature is moving toward or attacking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    /// A fixed world point.
    Point((f32, f32, f32)),
    /// The player, resolved to the live position every tick.
    Player,
}

impl Target {
    /// Resolve the target to a position given the current player position.
    pub fn resolve(&self, player_position: (f32, f32, f32)) -> (f32, f32, f32) {
        match self {
            Target::Point(p) => *p,
            Target::Player => player_position,
        }
    }
}

/// Mutable AI state attached to every creature.
#[derive(Component, Debug, Clone, Default)]
pub struct Brain {
    pub state: AiState,
    /// Clock microseconds left in the current state. 0 means untimed.
    pub state_timer_us: u64,
    pub target: Option<Target>,
    /// World clock (microseconds) of the last attack on the player.
    pub last_attack_us: Option<u64>,
    pub wander_target: Option<(f32, f32)>,
}

impl Brain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the state timer down by `dt_us`. Returns `true` on the tick it expires.
    pub fn tick_timer(&mut self, dt_us: u64) -> bool {
        if self.state_timer_us == 0 {
            return false;
        }
        self.state_timer_us = self.state_timer_us.saturating_sub(dt_us);
        self.state_timer_us == 0
    }

    pub fn enter_idle(&mut self) {
        self.state = AiState::Idle;
        self.state_timer_us = 0;
        self.target = None;
        self.wander_target = None;
    }

    pub fn enter_wander(&mut self, duration_ms: u64) {
        self.state = AiState::Wander;
        self.state_timer_us = ms_to_us(duration_ms);
        self.target = None;
        self.wander_target = None;
    }

    pub fn enter_chase(&mut self, target: Target) {
        self.state = AiState::Chase;
        self.state_timer_us = 0;
        self.target = Some(target);
        self.wander_target = None;
    }

    pub fn enter_attack(&mut self) {
        self.state = AiState::Attack;
        self.state_timer_us = 0;
    }

    pub fn enter_flee(&mut self, duration_ms: u64) {
        self.state = AiState::Flee;
        self.state_timer_us = ms_to_us(duration_ms);
        self.target = None;
        self.wander_target = None;
    }

    /// Whether an attack is allowed at clock time `now_us` given `cooldown_ms`.
    pub fn attack_ready(&self, now_us: u64, cooldown_ms: u64) -> bool {
        match self.last_attack_us {
            Some(last) => now_us.saturating_sub(last) >= ms_to_us(cooldown_ms),
            None => true,
        }
    }
}
