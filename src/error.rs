use thiserror::Error;

/// Setup failures reported by `MatchController::start_match`.
///
/// Runtime anomalies (an avatar that failed to spawn, an avatar that vanished
/// mid-round) are not errors: the match degrades and keeps running.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("roster must have between {min} and {max} players, got {count}")]
    RosterSize { count: usize, min: usize, max: usize },

    #[error("player {player_number} has no avatar template assigned")]
    MissingTemplate { player_number: u8 },

    #[error("rounds to win must be at least 1")]
    InvalidRoundsToWin,

    #[error("invalid {phase} delay: {seconds} seconds")]
    InvalidDelay { phase: &'static str, seconds: f32 },

    #[error("no status text sink is attached")]
    MissingPresentationSink,

    #[error("match has already been started")]
    AlreadyStarted,
}
