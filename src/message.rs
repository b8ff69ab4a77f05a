use crate::slot::PlayerSlot;

const STANDINGS_SEPARATOR: &str = "\n\n\n\n";

/// Who took the round and, possibly, the game. Indices are roster positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    pub round_winner: Option<usize>,
    pub game_winner: Option<usize>,
}

pub fn round_banner(round: u32) -> String {
    format!("ROUND {round}")
}

/// Status text shown during RoundEnding.
pub fn end_of_round_message(slots: &[PlayerSlot], outcome: RoundOutcome) -> String {
    if let Some(winner) = outcome.game_winner.and_then(|idx| slots.get(idx)) {
        return format!("{} WINS THE GAME!", winner.colored_label());
    }

    let mut message = match outcome.round_winner.and_then(|idx| slots.get(idx)) {
        Some(winner) => format!("{} WINS THE ROUND!", winner.colored_label()),
        None => "DRAW!".to_string(),
    };
    message.push_str(STANDINGS_SEPARATOR);

    for slot in slots {
        message.push_str(&format!("{}: {} WINS\n", slot.colored_label(), slot.wins()));
    }

    message
}
