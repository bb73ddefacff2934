//! Target queue lifecycle
//!
//! Targets form a FIFO: the front one is under fire, kills pop the front and
//! a fresh target is pushed at the back. After each kill the row slides left
//! by one slot before combat resumes.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::{GameEvent, GameState, Target};
use super::upgrades;
use crate::consts::*;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetQueue {
    targets: VecDeque<Target>,
    /// Targets ever created
    created: u32,
}

impl TargetQueue {
    /// Opening row, nearest the bow first
    pub fn with_opening_row() -> Self {
        let mut queue = Self::default();
        for i in 0..INITIAL_TARGETS {
            queue.spawn_at(FIRST_TARGET_X + i as f32 * TARGET_SPACING);
        }
        queue
    }

    /// Create the next target and push it at the back
    pub fn spawn_at(&mut self, x: f32) -> &Target {
        self.created += 1;
        let target = Target::new(self.created, x);
        if target.is_boss {
            log::info!("Boss target #{} spawned", target.serial);
        }
        self.targets.push_back(target);
        &self.targets[self.targets.len() - 1]
    }

    /// Append one target a slot behind the current last one
    pub fn refill(&mut self) -> &Target {
        let x = self
            .targets
            .back()
            .map(|t| t.x + TARGET_SPACING)
            .unwrap_or(FIRST_TARGET_X);
        self.spawn_at(x)
    }

    /// Pop the front target if it has no hitpoints left
    pub fn pop_dead_front(&mut self) -> Option<Target> {
        if self.targets.front().is_some_and(Target::is_dead) {
            self.targets.pop_front()
        } else {
            None
        }
    }

    pub fn created(&self) -> u32 {
        self.created
    }

    pub fn front(&self) -> Option<&Target> {
        self.targets.front()
    }

    pub fn front_mut(&mut self) -> Option<&mut Target> {
        self.targets.front_mut()
    }

    pub fn get(&self, index: usize) -> Option<&Target> {
        self.targets.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Target> {
        self.targets.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Target> {
        self.targets.iter_mut()
    }

    /// Drop every target (used by tests and scripted scenarios)
    pub fn clear(&mut self) {
        self.targets.clear();
    }
}

/// Slide-in animation after a kill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    pub active: bool,
    /// Pixels moved so far
    pub progress: f32,
}

impl Slide {
    pub fn start(&mut self) {
        self.active = true;
        self.progress = 0.0;
    }

    /// Shift every target left; returns true when the slide completes.
    /// The final step is clipped so the row moves exactly one slot.
    pub fn advance(&mut self, targets: &mut TargetQueue, dt_ms: f32) -> bool {
        if !self.active {
            return false;
        }
        let remaining = SLIDE_DISTANCE - self.progress;
        let step = (dt_ms * SLIDE_RATE_PER_MS).min(remaining);
        self.progress += step;
        for target in targets.iter_mut() {
            target.x -= step;
        }
        if step >= remaining {
            self.active = false;
            self.progress = 0.0;
            return true;
        }
        false
    }
}

/// Per-frame target update: slide, burn, then the front death check.
/// Returns true if the front target died this frame.
pub fn update_targets(state: &mut GameState, dt_ms: f32) -> bool {
    if state.paused_for_upgrade() {
        return false;
    }

    if state.slide.active {
        state.slide.advance(&mut state.targets, dt_ms);
        return false;
    }

    let secs = dt_ms / 1000.0;
    let flame_dps = state.params.flame_dps;
    for target in state.targets.iter_mut() {
        target.burn(flame_dps, secs);
    }

    let Some(dead) = state.targets.pop_dead_front() else {
        return false;
    };
    state.counters.kills += 1;
    log::debug!(
        "Target #{} down (kills: {})",
        dead.serial,
        state.counters.kills
    );
    state.events.push(GameEvent::TargetKilled {
        serial: dead.serial,
        boss: dead.is_boss,
    });

    let spawned = state.targets.refill();
    state.events.push(GameEvent::TargetSpawned {
        serial: spawned.serial,
        boss: spawned.is_boss,
    });

    upgrades::check_upgrade(state);
    state.slide.start();
    true
}
