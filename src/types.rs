use serde::{Deserialize, Serialize};

/// Player tint, as sent by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PlayerColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB`, without the leading `#`.
    pub fn to_html_rgb(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Where a slot's avatar is placed on spawn and on every round reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: [f32; 3],
    pub yaw_degrees: f32,
}

/// One roster entry handed over by the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    #[serde(default)]
    pub is_computer: bool,
    pub color: PlayerColor,
    /// Name of the avatar template the host instantiates. Empty means unassigned.
    pub template: String,
    #[serde(default)]
    pub control_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    RoundStarting,
    RoundPlaying,
    RoundEnding,
    /// A game winner was found and the front-end transition was signalled.
    Finished,
    Aborted,
}

impl Phase {
    /// True while a round cycle is running and `abort` can interrupt it.
    pub fn is_running(self) -> bool {
        matches!(
            self,
            Self::RoundStarting | Self::RoundPlaying | Self::RoundEnding
        )
    }
}

/// Notifications raised by the controller and drained by `tick`.
///
/// Player numbers are 1-based, matching `PlayerSlot::player_number`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    SpawnFailed { player_number: u8 },
    RoundStarted { round: u32 },
    RoundPlaying { round: u32 },
    RoundEnded { round: u32, winner: Option<u8> },
    /// Terminal: the host should return to its front-end.
    GameOver { winner: u8 },
    Aborted,
}

/// Per-slot view returned from the query surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotSnapshot {
    pub player_number: u8,
    pub color: String,
    pub is_computer: bool,
    pub spawned: bool,
    pub wins: u32,
}

/// Read-only match state for UI and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    pub phase: Phase,
    pub round_number: u32,
    pub round_winner: Option<u8>,
    pub game_winner: Option<u8>,
    pub slots: Vec<SlotSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_rgb_is_upper_case_and_zero_padded() {
        assert_eq!(PlayerColor::new(0x2a, 0x64, 0xb2).to_html_rgb(), "2A64B2");
        assert_eq!(PlayerColor::new(0, 5, 255).to_html_rgb(), "0005FF");
    }

    #[test]
    fn only_round_phases_are_running() {
        assert!(!Phase::NotStarted.is_running());
        assert!(Phase::RoundStarting.is_running());
        assert!(Phase::RoundPlaying.is_running());
        assert!(Phase::RoundEnding.is_running());
        assert!(!Phase::Finished.is_running());
        assert!(!Phase::Aborted.is_running());
    }
}
