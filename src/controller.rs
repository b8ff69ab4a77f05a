use std::time::Duration;

use log::{debug, info, warn};
use once_cell::unsync::OnceCell;

use crate::config::{DEFAULT_ROUNDS_TO_WIN, MatchConfig};
use crate::error::MatchError;
use crate::host::{ArenaWorld, AvatarHandle, SpawnRequest, StatusSink};
use crate::message::{RoundOutcome, end_of_round_message, round_banner};
use crate::slot::{PlayerSlot, count_active, first_active, first_at_threshold, is_eligible};
use crate::timer::PhaseTimer;
use crate::types::{MatchEvent, MatchSnapshot, Phase};

/// Runs the round cycle of one match.
///
/// The host calls `start_match` once, then `tick` every frame until a
/// `MatchEvent::GameOver` comes back or it calls `abort`. All mutation happens
/// inside those calls; avatar liveness is polled from the world during `tick`.
pub struct MatchController {
    world: Box<dyn ArenaWorld>,
    status: Option<Box<dyn StatusSink>>,
    config: OnceCell<MatchConfig>,
    slots: Vec<PlayerSlot>,
    phase: Phase,
    round_number: u32,
    outcome: RoundOutcome,
    start_wait: PhaseTimer,
    end_wait: PhaseTimer,
    events: Vec<MatchEvent>,
}

impl MatchController {
    pub fn new(world: Box<dyn ArenaWorld>, status: Option<Box<dyn StatusSink>>) -> Self {
        Self {
            world,
            status,
            config: OnceCell::new(),
            slots: Vec::new(),
            phase: Phase::NotStarted,
            round_number: 0,
            outcome: RoundOutcome::default(),
            start_wait: PhaseTimer::new(Duration::ZERO),
            end_wait: PhaseTimer::new(Duration::ZERO),
            events: Vec::new(),
        }
    }

    /// Validates `config`, spawns every slot and enters the first RoundStarting.
    ///
    /// Nothing is spawned when an error is returned.
    pub fn start_match(&mut self, config: MatchConfig) -> Result<(), MatchError> {
        if self.config.get().is_some() {
            return Err(MatchError::AlreadyStarted);
        }
        if self.status.is_none() {
            return Err(MatchError::MissingPresentationSink);
        }
        config.validate()?;

        self.start_wait = PhaseTimer::new(config.start_delay()?);
        self.end_wait = PhaseTimer::new(config.end_delay()?);
        self.config
            .set(config)
            .map_err(|_| MatchError::AlreadyStarted)?;

        self.spawn_all();
        self.bind_camera();
        self.enter_round_starting();
        Ok(())
    }

    /// Advances the current phase by `delta` and returns the events raised
    /// since the previous call.
    pub fn tick(&mut self, delta: Duration) -> Vec<MatchEvent> {
        match self.phase {
            Phase::RoundStarting => {
                if self.start_wait.advance(delta) {
                    self.enter_round_playing();
                }
            }
            Phase::RoundPlaying => self.poll_round_playing(),
            Phase::RoundEnding => {
                if self.end_wait.advance(delta) {
                    self.finish_round();
                }
            }
            Phase::NotStarted | Phase::Finished | Phase::Aborted => {}
        }

        std::mem::take(&mut self.events)
    }

    /// Interrupts the round cycle and releases every avatar.
    ///
    /// Returns `false` when no round cycle is running.
    pub fn abort(&mut self) -> bool {
        if !self.phase.is_running() {
            return false;
        }

        for slot in &mut self.slots {
            if let Some(avatar) = slot.avatar.take() {
                self.world.release(avatar);
            }
        }

        debug!(
            "match aborted during {:?} of round {}",
            self.phase, self.round_number
        );
        self.phase = Phase::Aborted;
        self.events.push(MatchEvent::Aborted);
        true
    }

    /// Takes a slot out of play when the host reports, after the fact, that
    /// its avatar never materialised. The slot can no longer count as active
    /// or win for the rest of the match.
    ///
    /// Returns `false` when no running slot holds `avatar`.
    pub fn report_spawn_failure(&mut self, avatar: AvatarHandle) -> bool {
        if !self.phase.is_running() {
            return false;
        }
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.avatar == Some(avatar))
        else {
            return false;
        };

        slot.avatar = None;
        let player_number = slot.player_number;
        warn!("host reported avatar {avatar:?} of player {player_number} as failed; slot stays out of play");
        self.events.push(MatchEvent::SpawnFailed { player_number });
        self.bind_camera();
        true
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn slots(&self) -> &[PlayerSlot] {
        &self.slots
    }

    pub fn wins(&self) -> Vec<u32> {
        self.slots.iter().map(PlayerSlot::wins).collect()
    }

    pub fn round_winner(&self) -> Option<&PlayerSlot> {
        self.outcome.round_winner.and_then(|idx| self.slots.get(idx))
    }

    pub fn game_winner(&self) -> Option<&PlayerSlot> {
        self.outcome.game_winner.and_then(|idx| self.slots.get(idx))
    }

    pub fn config(&self) -> Option<&MatchConfig> {
        self.config.get()
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            round_number: self.round_number,
            round_winner: self.round_winner().map(|slot| slot.player_number),
            game_winner: self.game_winner().map(|slot| slot.player_number),
            slots: self.slots.iter().map(PlayerSlot::to_snapshot).collect(),
        }
    }

    fn spawn_all(&mut self) {
        let Some(config) = self.config.get() else {
            return;
        };

        self.slots.clear();
        for (idx, (data, point)) in config.roster.iter().zip(&config.spawn_points).enumerate() {
            let player_number = idx as u8 + 1;
            let mut slot = PlayerSlot::new(player_number, data);
            slot.avatar = self.world.spawn(&SpawnRequest {
                player_number,
                template: &data.template,
                point,
                color: data.color,
                is_computer: data.is_computer,
                control_index: data.control_index,
            });

            if slot.avatar.is_none() {
                warn!(
                    "avatar for player {player_number} failed to spawn from template {:?}; slot stays out of play",
                    data.template
                );
                self.events.push(MatchEvent::SpawnFailed { player_number });
            }
            self.slots.push(slot);
        }
    }

    fn bind_camera(&mut self) {
        let targets: Vec<AvatarHandle> = self.slots.iter().filter_map(|slot| slot.avatar).collect();
        self.world.bind_camera(&targets);
    }

    fn enter_round_starting(&mut self) {
        if let Some(config) = self.config.get() {
            for (slot, point) in self.slots.iter().zip(&config.spawn_points) {
                if let Some(avatar) = slot.avatar {
                    self.world.reset_avatar(avatar, point);
                }
            }
        }
        self.set_control(false);
        self.world.frame_start_view();

        self.round_number += 1;
        self.outcome = RoundOutcome::default();
        self.publish(&round_banner(self.round_number));

        self.start_wait.restart();
        self.phase = Phase::RoundStarting;
        info!("round {} starting", self.round_number);
        self.events.push(MatchEvent::RoundStarted {
            round: self.round_number,
        });
    }

    fn enter_round_playing(&mut self) {
        self.set_control(true);
        self.publish("");

        self.phase = Phase::RoundPlaying;
        self.events.push(MatchEvent::RoundPlaying {
            round: self.round_number,
        });
        self.poll_round_playing();
    }

    fn poll_round_playing(&mut self) {
        if count_active(&self.slots, self.world.as_ref()) <= 1 {
            self.enter_round_ending();
        }
    }

    fn enter_round_ending(&mut self) {
        self.set_control(false);

        let round_winner = first_active(&self.slots, self.world.as_ref());
        if let Some(idx) = round_winner {
            self.slots[idx].record_win();
        }
        let rounds_to_win = self
            .config
            .get()
            .map_or(DEFAULT_ROUNDS_TO_WIN, |config| config.rounds_to_win);
        let game_winner = first_at_threshold(&self.slots, rounds_to_win);

        self.outcome = RoundOutcome {
            round_winner,
            game_winner,
        };
        let message = end_of_round_message(&self.slots, self.outcome);
        self.publish(&message);

        self.end_wait.restart();
        self.phase = Phase::RoundEnding;

        let winner = self.round_winner().map(|slot| slot.player_number);
        match winner {
            Some(player_number) => info!("round {} won by player {player_number}", self.round_number),
            None => info!("round {} ended in a draw", self.round_number),
        }
        self.events.push(MatchEvent::RoundEnded {
            round: self.round_number,
            winner,
        });
    }

    fn finish_round(&mut self) {
        match self.game_winner().map(|slot| slot.player_number) {
            Some(winner) => {
                info!("player {winner} wins the game after {} rounds", self.round_number);
                self.phase = Phase::Finished;
                self.events.push(MatchEvent::GameOver { winner });
            }
            None => self.enter_round_starting(),
        }
    }

    fn set_control(&mut self, enabled: bool) {
        let targets: Vec<AvatarHandle> = self
            .slots
            .iter()
            .filter(|slot| is_eligible(slot, self.world.as_ref()))
            .filter_map(|slot| slot.avatar)
            .collect();

        for avatar in targets {
            self.world.set_control_enabled(avatar, enabled);
        }
    }

    fn publish(&mut self, text: &str) {
        if let Some(status) = self.status.as_mut() {
            status.publish(text);
        }
    }
}
