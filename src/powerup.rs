use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::config::PowerUpConfig;
use crate::error::MatchError;
use crate::timer::PhaseTimer;

/// Power-ups float slightly above the arena floor.
pub const SPAWN_HEIGHT: f32 = 1.09;

pub trait PowerUpSink {
    /// Places a power-up of the given kind (index into the configured kinds).
    fn spawn_power_up(&mut self, kind: usize, position: [f32; 3]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpawnerState {
    Waiting,
    OnField,
}

/// Delay-then-spawn loop for one power-up pad.
#[derive(Debug, Clone)]
pub struct PowerUpSpawner {
    kind_count: usize,
    position: [f32; 3],
    respawn_cooldown: Duration,
    timer: PhaseTimer,
    state: SpawnerState,
    rng: StdRng,
}

impl PowerUpSpawner {
    pub fn new(config: &PowerUpConfig) -> Result<Self, MatchError> {
        let [x, _, z] = config.position;
        Ok(Self {
            kind_count: config.kinds.len(),
            position: [x, SPAWN_HEIGHT, z],
            respawn_cooldown: config.respawn_cooldown()?,
            timer: PhaseTimer::new(config.initial_delay()?),
            state: SpawnerState::Waiting,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// True while a spawned power-up is waiting to be collected.
    pub fn is_on_field(&self) -> bool {
        self.state == SpawnerState::OnField
    }

    /// Advances the wait; returns the kind spawned during this tick, if any.
    pub fn tick(&mut self, delta: Duration, sink: &mut dyn PowerUpSink) -> Option<usize> {
        if self.state != SpawnerState::Waiting || !self.timer.advance(delta) {
            return None;
        }
        if self.kind_count == 0 {
            return None;
        }

        let kind = self.rng.gen_range(0..self.kind_count);
        sink.spawn_power_up(kind, self.position);
        self.state = SpawnerState::OnField;
        debug!("power-up kind {kind} spawned at {:?}", self.position);
        Some(kind)
    }

    /// Starts the respawn cooldown. Ignored when nothing is on the field.
    pub fn collect(&mut self) {
        if self.state != SpawnerState::OnField {
            return;
        }
        self.timer = PhaseTimer::new(self.respawn_cooldown);
        self.state = SpawnerState::Waiting;
    }
}
