use std::time::Duration;

use wasm_bindgen::prelude::*;
use web_time::Instant;

use crate::bridge::{BridgeStatus, BridgeWorld, PowerUpPad, SharedBridge};
use crate::config::{MatchConfig, PowerUpConfig};
use crate::controller::MatchController;
use crate::error::MatchError;
use crate::host::AvatarHandle;
use crate::powerup::PowerUpSpawner;
use crate::types::MatchEvent;

/// Match controller wired to the command bridge, exported to JS.
#[wasm_bindgen]
pub struct ArenaMatch {
    controller: MatchController,
    bridge: SharedBridge,
    power_ups: Vec<PowerUpSpawner>,
    last_frame: Option<Instant>,
}

#[wasm_bindgen]
impl ArenaMatch {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ArenaMatch {
        let bridge = SharedBridge::default();
        let controller = MatchController::new(
            Box::new(BridgeWorld(bridge.clone())),
            Some(Box::new(BridgeStatus(bridge.clone()))),
        );
        ArenaMatch {
            controller,
            bridge,
            power_ups: Vec::new(),
            last_frame: None,
        }
    }

    pub fn start_match(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: MatchConfig =
            serde_wasm_bindgen::from_value(config).map_err(|err| to_js_error(&err))?;
        self.controller
            .start_match(config)
            .map_err(|err| to_js_error(&err))?;
        self.last_frame = Some(Instant::now());
        Ok(())
    }

    /// Advances by an explicit delta and returns the raised events.
    pub fn tick(&mut self, delta_ms: f64) -> Result<JsValue, JsValue> {
        let delta = Duration::try_from_secs_f64(delta_ms / 1000.0).unwrap_or_default();
        let events = self.advance(delta);
        serde_wasm_bindgen::to_value(&events).map_err(|err| to_js_error(&err))
    }

    /// Advances by the wall time elapsed since the previous frame.
    pub fn tick_frame(&mut self) -> Result<JsValue, JsValue> {
        let now = Instant::now();
        let delta = self
            .last_frame
            .map(|last| now.duration_since(last))
            .unwrap_or_default();
        self.last_frame = Some(now);
        let events = self.advance(delta);
        serde_wasm_bindgen::to_value(&events).map_err(|err| to_js_error(&err))
    }

    pub fn abort(&mut self) -> bool {
        self.controller.abort()
    }

    pub fn set_avatar_active(&mut self, handle: u32, active: bool) {
        self.bridge.borrow_mut().set_active(handle, active);
    }

    /// Reports that the avatar behind `handle` could not be instantiated.
    /// Its slot stays out of play for the rest of the match.
    pub fn fail_spawn(&mut self, handle: u32) -> bool {
        if !self.bridge.borrow_mut().mark_failed(handle) {
            return false;
        }
        self.controller.report_spawn_failure(AvatarHandle(handle))
    }

    /// Registers a power-up spawner and returns its id.
    pub fn add_power_up_spawner(&mut self, config: JsValue) -> Result<u32, JsValue> {
        let config: PowerUpConfig =
            serde_wasm_bindgen::from_value(config).map_err(|err| to_js_error(&err))?;
        self.push_power_up_spawner(&config)
            .map_err(|err| to_js_error(&err))
    }

    /// Starts the respawn cooldown of a collected power-up.
    pub fn collect_power_up(&mut self, spawner: u32) -> bool {
        match self.power_ups.get_mut(spawner as usize) {
            Some(power_up) if power_up.is_on_field() => {
                power_up.collect();
                true
            }
            _ => false,
        }
    }

    pub fn drain_commands(&mut self) -> Result<JsValue, JsValue> {
        let commands = self.bridge.borrow_mut().drain_commands();
        serde_wasm_bindgen::to_value(&commands).map_err(|err| to_js_error(&err))
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.controller.snapshot()).map_err(|err| to_js_error(&err))
    }
}

impl ArenaMatch {
    fn push_power_up_spawner(&mut self, config: &PowerUpConfig) -> Result<u32, MatchError> {
        let spawner = PowerUpSpawner::new(config)?;
        self.power_ups.push(spawner);
        Ok(self.power_ups.len() as u32 - 1)
    }

    /// Ticks the match, then the power-up spawners while a round cycle runs.
    fn advance(&mut self, delta: Duration) -> Vec<MatchEvent> {
        let events = self.controller.tick(delta);
        if self.controller.phase().is_running() {
            let mut state = self.bridge.borrow_mut();
            for (id, power_up) in self.power_ups.iter_mut().enumerate() {
                let mut pad = PowerUpPad {
                    state: &mut *state,
                    spawner: id as u32,
                };
                power_up.tick(delta, &mut pad);
            }
        }
        events
    }
}

impl Default for ArenaMatch {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: &dyn std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
