use wasm_bindgen::prelude::*;

pub mod api;
pub mod bridge;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod message;
pub mod powerup;
pub mod slot;
pub mod timer;
pub mod types;

#[cfg(test)]
mod testing;

pub use api::ArenaMatch;
pub use config::{MatchConfig, PowerUpConfig};
pub use controller::MatchController;
pub use error::MatchError;
pub use host::{ArenaWorld, AvatarHandle, SpawnRequest, StatusSink};
pub use types::{MatchEvent, MatchSnapshot, Phase, PlayerColor, PlayerData, SpawnPoint};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
