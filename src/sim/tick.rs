//! Per-frame simulation step
//!
//! Order within a frame: player input, deferred auto-upgrade, bow, arrows,
//! then the target queue. Renderers read the state after `tick` returns.

use super::bow::BowPhase;
use super::clock::FrameClock;
use super::combat::{release_arrows, update_projectiles};
use super::state::GameState;
use super::targets::update_targets;
use super::upgrades::{advance_auto_upgrade, select_upgrade};

/// A manual pick for a specific upgrade offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeChoice {
    pub event_id: u32,
    pub index: usize,
}

/// Input commands collected since the previous frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flip the auto-upgrade flag
    pub toggle_auto_upgrade: bool,
    /// Upgrade button pressed
    pub select_upgrade: Option<UpgradeChoice>,
}

/// Advance the game state by one frame of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    state.events.clear();

    if input.toggle_auto_upgrade {
        state.toggle_auto_upgrade();
    }
    if let Some(choice) = input.select_upgrade {
        select_upgrade(state, choice.event_id, choice.index);
    }
    advance_auto_upgrade(state, dt_ms);

    state.counters.frames += 1;
    state.counters.elapsed_ms += f64::from(dt_ms);

    let blocked = state.paused_for_upgrade() || state.slide.active;
    let (draw_ms, release_ms) = (state.params.draw_ms, state.params.release_ms);
    if state.bow.advance(dt_ms, draw_ms, release_ms, blocked) {
        release_arrows(state);
    }

    update_projectiles(state);
    update_targets(state, dt_ms);
}

/// A running game: state plus the clock that feeds it
#[derive(Debug, Clone)]
pub struct Session {
    pub state: GameState,
    clock: FrameClock,
}

impl Session {
    pub fn new(seed: u64, now_ms: f64) -> Self {
        Self {
            state: GameState::new(seed),
            clock: FrameClock::new(now_ms),
        }
    }

    /// Frame callback: compute the delta for `now_ms` and tick.
    /// Returns the delta used.
    pub fn frame(&mut self, now_ms: f64, input: &TickInput) -> f32 {
        let dt_ms = self.clock.delta(now_ms);
        tick(&mut self.state, input, dt_ms);
        dt_ms
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The bow is mid-cycle
    pub fn is_shooting(&self) -> bool {
        self.state.bow.phase != BowPhase::Idle
    }
}
