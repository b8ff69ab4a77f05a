//! Collaborator contracts the host engine implements.
//!
//! The controller never touches rendering, physics or UI directly; it drives
//! them through these traits and reads avatar liveness back once per tick.

use crate::types::{PlayerColor, SpawnPoint};

/// Opaque id of an avatar instantiated by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AvatarHandle(pub u32);

/// Everything the host needs to instantiate one slot's avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest<'a> {
    pub player_number: u8,
    pub template: &'a str,
    pub point: &'a SpawnPoint,
    pub color: PlayerColor,
    pub is_computer: bool,
    pub control_index: u8,
}

pub trait ArenaWorld {
    /// Instantiates an avatar. `None` means the spawn failed.
    fn spawn(&mut self, request: &SpawnRequest<'_>) -> Option<AvatarHandle>;

    /// Destroys an avatar the match no longer needs.
    fn release(&mut self, avatar: AvatarHandle);

    /// Points the camera rig at these avatars, in roster order.
    fn bind_camera(&mut self, targets: &[AvatarHandle]);

    fn frame_start_view(&mut self);

    /// Puts the avatar back on its spawn point at full health and active.
    fn reset_avatar(&mut self, avatar: AvatarHandle, point: &SpawnPoint);

    fn set_control_enabled(&mut self, avatar: AvatarHandle, enabled: bool);

    fn is_active(&self, avatar: AvatarHandle) -> bool;
}

/// Receives the status line shown over the arena.
pub trait StatusSink {
    fn publish(&mut self, text: &str);
}
