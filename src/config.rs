use std::time::Duration;

use serde::Deserialize;

use crate::error::MatchError;
use crate::types::{PlayerData, SpawnPoint};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 4;
pub const DEFAULT_ROUNDS_TO_WIN: u32 = 5;
pub const DEFAULT_PHASE_DELAY_SECS: f32 = 3.0;
pub const DEFAULT_POWER_UP_DELAY_SECS: f32 = 10.0;

const DEFAULT_SPAWN_POINTS: [SpawnPoint; MAX_PLAYERS] = [
    SpawnPoint {
        position: [-3.0, 0.0, 30.0],
        yaw_degrees: 180.0,
    },
    SpawnPoint {
        position: [13.0, 0.0, -5.0],
        yaw_degrees: 0.0,
    },
    SpawnPoint {
        position: [-40.0, 0.0, -20.0],
        yaw_degrees: 90.0,
    },
    SpawnPoint {
        position: [30.0, 0.0, 20.0],
        yaw_degrees: 270.0,
    },
];

/// Match settings, captured once when the match starts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub rounds_to_win: u32,
    pub start_delay_secs: f32,
    pub end_delay_secs: f32,
    /// One point per supported slot; the roster may not outgrow it.
    pub spawn_points: Vec<SpawnPoint>,
    pub roster: Vec<PlayerData>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            rounds_to_win: DEFAULT_ROUNDS_TO_WIN,
            start_delay_secs: DEFAULT_PHASE_DELAY_SECS,
            end_delay_secs: DEFAULT_PHASE_DELAY_SECS,
            spawn_points: DEFAULT_SPAWN_POINTS.to_vec(),
            roster: Vec::new(),
        }
    }
}

impl MatchConfig {
    pub fn with_roster(roster: Vec<PlayerData>) -> Self {
        Self {
            roster,
            ..Self::default()
        }
    }

    /// Largest roster this configuration can seat.
    pub fn max_players(&self) -> usize {
        self.spawn_points.len().min(MAX_PLAYERS)
    }

    pub fn start_delay(&self) -> Result<Duration, MatchError> {
        delay("start", self.start_delay_secs)
    }

    pub fn end_delay(&self) -> Result<Duration, MatchError> {
        delay("end", self.end_delay_secs)
    }

    /// Checks everything `start_match` relies on, before anything is spawned.
    pub fn validate(&self) -> Result<(), MatchError> {
        let count = self.roster.len();
        let max = self.max_players();
        if !(MIN_PLAYERS..=max).contains(&count) {
            return Err(MatchError::RosterSize {
                count,
                min: MIN_PLAYERS,
                max,
            });
        }

        if let Some(index) = self
            .roster
            .iter()
            .position(|player| player.template.trim().is_empty())
        {
            return Err(MatchError::MissingTemplate {
                player_number: index as u8 + 1,
            });
        }

        if self.rounds_to_win == 0 {
            return Err(MatchError::InvalidRoundsToWin);
        }

        self.start_delay()?;
        self.end_delay()?;
        Ok(())
    }
}

fn delay(phase: &'static str, seconds: f32) -> Result<Duration, MatchError> {
    Duration::try_from_secs_f32(seconds).map_err(|_| MatchError::InvalidDelay { phase, seconds })
}

/// Settings for a single power-up spawner.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Names of the power-up kinds to choose from.
    pub kinds: Vec<String>,
    pub position: [f32; 3],
    pub initial_delay_secs: f32,
    pub respawn_cooldown_secs: f32,
    pub seed: u64,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            kinds: Vec::new(),
            position: [0.0; 3],
            initial_delay_secs: DEFAULT_POWER_UP_DELAY_SECS,
            respawn_cooldown_secs: DEFAULT_POWER_UP_DELAY_SECS,
            seed: 0,
        }
    }
}

impl PowerUpConfig {
    pub fn initial_delay(&self) -> Result<Duration, MatchError> {
        delay("power-up initial", self.initial_delay_secs)
    }

    pub fn respawn_cooldown(&self) -> Result<Duration, MatchError> {
        delay("power-up respawn", self.respawn_cooldown_secs)
    }
}
