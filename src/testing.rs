//! In-memory collaborators shared by the unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::host::{ArenaWorld, AvatarHandle, SpawnRequest, StatusSink};
use crate::types::SpawnPoint;

#[derive(Debug, Clone, PartialEq)]
pub enum WorldCall {
    Spawn(u8),
    Release(AvatarHandle),
    BindCamera(Vec<AvatarHandle>),
    FrameStartView,
    Reset(AvatarHandle),
    Control(AvatarHandle, bool),
}

#[derive(Debug, Default)]
struct WorldState {
    next_handle: u32,
    active: HashMap<AvatarHandle, bool>,
    failing_players: HashSet<u8>,
    calls: Vec<WorldCall>,
}

/// Cloneable fake world; clones share state so a test can keep one after
/// boxing another into a controller.
#[derive(Debug, Clone, Default)]
pub struct FakeWorld {
    state: Rc<RefCell<WorldState>>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_avatar(&self, avatar: AvatarHandle, active: bool) {
        self.state.borrow_mut().active.insert(avatar, active);
    }

    pub fn fail_spawn_for(&self, player_number: u8) {
        self.state
            .borrow_mut()
            .failing_players
            .insert(player_number);
    }

    pub fn set_active(&self, avatar: AvatarHandle, active: bool) {
        self.add_avatar(avatar, active);
    }

    pub fn calls(&self) -> Vec<WorldCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

impl ArenaWorld for FakeWorld {
    fn spawn(&mut self, request: &SpawnRequest<'_>) -> Option<AvatarHandle> {
        let mut state = self.state.borrow_mut();
        state.calls.push(WorldCall::Spawn(request.player_number));
        if state.failing_players.contains(&request.player_number) {
            return None;
        }
        state.next_handle += 1;
        let avatar = AvatarHandle(state.next_handle);
        state.active.insert(avatar, true);
        Some(avatar)
    }

    fn release(&mut self, avatar: AvatarHandle) {
        let mut state = self.state.borrow_mut();
        state.active.remove(&avatar);
        state.calls.push(WorldCall::Release(avatar));
    }

    fn bind_camera(&mut self, targets: &[AvatarHandle]) {
        self.state
            .borrow_mut()
            .calls
            .push(WorldCall::BindCamera(targets.to_vec()));
    }

    fn frame_start_view(&mut self) {
        self.state.borrow_mut().calls.push(WorldCall::FrameStartView);
    }

    fn reset_avatar(&mut self, avatar: AvatarHandle, _point: &SpawnPoint) {
        let mut state = self.state.borrow_mut();
        state.active.insert(avatar, true);
        state.calls.push(WorldCall::Reset(avatar));
    }

    fn set_control_enabled(&mut self, avatar: AvatarHandle, enabled: bool) {
        self.state
            .borrow_mut()
            .calls
            .push(WorldCall::Control(avatar, enabled));
    }

    fn is_active(&self, avatar: AvatarHandle) -> bool {
        self.state
            .borrow()
            .active
            .get(&avatar)
            .copied()
            .unwrap_or(false)
    }
}

/// Status sink that keeps every published line.
#[derive(Debug, Clone, Default)]
pub struct RecordingStatus {
    lines: Rc<RefCell<Vec<String>>>,
}

impl RecordingStatus {
    pub fn last(&self) -> Option<String> {
        self.lines.borrow().last().cloned()
    }
}

impl StatusSink for RecordingStatus {
    fn publish(&mut self, text: &str) {
        self.lines.borrow_mut().push(text.to_string());
    }
}
