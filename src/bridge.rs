//! Host adapter for script-driven engines.
//!
//! Instead of calling into the engine, every collaborator call is recorded as a
//! `HostCommand` the host drains once per frame. The host reports eliminations
//! back through `set_active`, and avatars that never materialised through
//! `mark_failed`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

use crate::host::{ArenaWorld, AvatarHandle, SpawnRequest, StatusSink};
use crate::powerup::PowerUpSink;
use crate::types::{PlayerColor, SpawnPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostCommand {
    Spawn {
        handle: u32,
        player_number: u8,
        template: String,
        position: [f32; 3],
        yaw_degrees: f32,
        color: PlayerColor,
        is_computer: bool,
        control_index: u8,
    },
    Release {
        handle: u32,
    },
    BindCamera {
        handles: Vec<u32>,
    },
    FrameStartView,
    ResetAvatar {
        handle: u32,
        position: [f32; 3],
        yaw_degrees: f32,
    },
    SetControl {
        handle: u32,
        enabled: bool,
    },
    Status {
        text: String,
    },
    SpawnPowerUp {
        spawner: u32,
        kind: u32,
        position: [f32; 3],
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AvatarState {
    Active,
    Inactive,
    /// Reported by the host as never spawned. Terminal for the match.
    Failed,
}

#[derive(Debug, Default)]
pub struct BridgeState {
    /// Indexed by handle id.
    avatars: Vec<AvatarState>,
    commands: Vec<HostCommand>,
}

impl BridgeState {
    /// Records a liveness change reported by the host. Unknown and failed
    /// handles are ignored.
    pub fn set_active(&mut self, handle: u32, active: bool) {
        if let Some(state) = self.avatars.get_mut(handle as usize)
            && *state != AvatarState::Failed
        {
            *state = if active {
                AvatarState::Active
            } else {
                AvatarState::Inactive
            };
        }
    }

    /// Marks an avatar the host could not instantiate. Returns `false` for
    /// unknown handles.
    pub fn mark_failed(&mut self, handle: u32) -> bool {
        match self.avatars.get_mut(handle as usize) {
            Some(state) => {
                *state = AvatarState::Failed;
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, handle: u32) -> bool {
        self.avatars.get(handle as usize) == Some(&AvatarState::Active)
    }

    pub fn is_failed(&self, handle: u32) -> bool {
        self.avatars.get(handle as usize) == Some(&AvatarState::Failed)
    }

    pub fn drain_commands(&mut self) -> Vec<HostCommand> {
        std::mem::take(&mut self.commands)
    }
}

pub type SharedBridge = Rc<RefCell<BridgeState>>;

/// `ArenaWorld` half of the bridge.
pub struct BridgeWorld(pub SharedBridge);

impl ArenaWorld for BridgeWorld {
    fn spawn(&mut self, request: &SpawnRequest<'_>) -> Option<AvatarHandle> {
        let mut state = self.0.borrow_mut();
        let handle = u32::try_from(state.avatars.len()).ok()?;
        state.avatars.push(AvatarState::Active);
        state.commands.push(HostCommand::Spawn {
            handle,
            player_number: request.player_number,
            template: request.template.to_string(),
            position: request.point.position,
            yaw_degrees: request.point.yaw_degrees,
            color: request.color,
            is_computer: request.is_computer,
            control_index: request.control_index,
        });
        Some(AvatarHandle(handle))
    }

    fn release(&mut self, avatar: AvatarHandle) {
        let mut state = self.0.borrow_mut();
        state.set_active(avatar.0, false);
        state
            .commands
            .push(HostCommand::Release { handle: avatar.0 });
    }

    fn bind_camera(&mut self, targets: &[AvatarHandle]) {
        self.0.borrow_mut().commands.push(HostCommand::BindCamera {
            handles: targets.iter().map(|avatar| avatar.0).collect(),
        });
    }

    fn frame_start_view(&mut self) {
        self.0
            .borrow_mut()
            .commands
            .push(HostCommand::FrameStartView);
    }

    fn reset_avatar(&mut self, avatar: AvatarHandle, point: &SpawnPoint) {
        let mut state = self.0.borrow_mut();
        // Revives eliminated avatars only; failed ones stay out.
        state.set_active(avatar.0, true);
        state.commands.push(HostCommand::ResetAvatar {
            handle: avatar.0,
            position: point.position,
            yaw_degrees: point.yaw_degrees,
        });
    }

    fn set_control_enabled(&mut self, avatar: AvatarHandle, enabled: bool) {
        self.0.borrow_mut().commands.push(HostCommand::SetControl {
            handle: avatar.0,
            enabled,
        });
    }

    fn is_active(&self, avatar: AvatarHandle) -> bool {
        self.0.borrow().is_active(avatar.0)
    }
}

/// Records power-up spawns of one spawner against an already borrowed bridge.
pub struct PowerUpPad<'a> {
    pub state: &'a mut BridgeState,
    pub spawner: u32,
}

impl PowerUpSink for PowerUpPad<'_> {
    fn spawn_power_up(&mut self, kind: usize, position: [f32; 3]) {
        self.state.commands.push(HostCommand::SpawnPowerUp {
            spawner: self.spawner,
            kind: kind as u32,
            position,
        });
    }
}

/// `StatusSink` half of the bridge.
pub struct BridgeStatus(pub SharedBridge);

impl StatusSink for BridgeStatus {
    fn publish(&mut self, text: &str) {
        self.0.borrow_mut().commands.push(HostCommand::Status {
            text: text.to_string(),
        });
    }
}
