//! Session state and the death/reset state machine

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::field::Field;
use super::player::{JumpHandle, Player};
use crate::settings::Settings;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Active gameplay
    Playing,
    /// State was reset after a death; waiting out the pacing pause
    Resetting,
}

/// Inputs to [`Phase::transition`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// The player hit an obstacle or left the playfield
    Died,
    /// The post-death pause is over
    PauseElapsed,
}

impl Phase {
    pub fn transition(self, event: PhaseEvent) -> Phase {
        match (self, event) {
            (Phase::Playing, PhaseEvent::Died) => Phase::Resetting,
            (Phase::Resetting, PhaseEvent::PauseElapsed) => Phase::Playing,
            (phase, _) => phase,
        }
    }
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Another gap pair scrolled past the player
    Scored { score: u32 },
    /// The run ended after `ticks` ticks; state has already been reset
    Died { final_score: u32, ticks: u64 },
}

/// One player, one obstacle field, and the bookkeeping around them
#[derive(Debug)]
pub struct Session {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: Phase,
    pub player: Player,
    pub field: Field,
    /// Background scroll offset
    pub scroll: i32,
    /// Simulation tick counter (whole session)
    pub time_ticks: u64,
    /// Ticks since the current run began
    pub run_ticks: u64,
    /// Pairs passed in the current run
    pub(super) passed: u32,
    pub(super) playfield: IVec2,
    pub(super) background_wrap: i32,
}

impl Session {
    /// Create a session with the given seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let rng = Pcg32::seed_from_u64(seed);
        log::info!(
            "New session: seed {}, {} gap pairs",
            seed,
            settings.pair_count
        );

        Self {
            seed,
            phase: Phase::Playing,
            player: Player::new(settings.player_config()),
            field: Field::new(settings.field_layout(), rng),
            scroll: 0,
            time_ticks: 0,
            run_ticks: 0,
            passed: 0,
            playfield: settings.playfield(),
            background_wrap: settings.background_wrap,
        }
    }

    /// Displayed score: one point per gap pair passed
    pub fn score(&self) -> u32 {
        (self.field.score() / 2) as u32
    }

    pub fn playfield(&self) -> IVec2 {
        self.playfield
    }

    pub fn jump_handle(&self) -> JumpHandle {
        self.player.jump_handle()
    }

    /// Put the player, scroll and field back to the start of a run
    pub(super) fn reset_run(&mut self) {
        self.player.reset();
        self.scroll = 0;
        self.field.reset();
        self.passed = 0;
        self.run_ticks = 0;
    }

    /// Leave the Resetting phase once the pause is over
    pub fn finish_reset(&mut self) {
        self.phase = self.phase.transition(PhaseEvent::PauseElapsed);
    }
}
