//! Arrow Rush - an arcade archery loop
//!
//! Core modules:
//! - `sim`: Simulation (bow, arrows, target queue, upgrades, frame clock)
//! - `hud`: Read-only view of the simulation for renderers
//! - `settings`: Runner configuration

pub mod hud;
pub mod settings;
pub mod sim;

pub use hud::Snapshot;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 1000.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Bow anchor, where arrows are nocked and released
    pub const BOW_X: f32 = 120.0;
    pub const BOW_Y: f32 = ARENA_HEIGHT / 2.0;

    /// Arrow travel per frame (not scaled by frame delta)
    pub const ARROW_SPEED: f32 = 10.0;

    /// Bow timings (milliseconds)
    pub const BASE_DRAW_MS: f32 = 1000.0;
    pub const RELEASE_MS: f32 = 200.0;
    pub const MIN_DRAW_MS: f32 = 200.0;

    /// Target queue layout
    pub const INITIAL_TARGETS: usize = 5;
    pub const FIRST_TARGET_X: f32 = 500.0;
    pub const TARGET_SPACING: f32 = 100.0;

    /// Every Nth created target is a boss
    pub const BOSS_EVERY: u32 = 5;
    pub const TARGET_HP: f32 = 50.0;
    pub const TARGET_WIDTH: f32 = 40.0;
    pub const TARGET_HEIGHT: f32 = 80.0;
    pub const BOSS_HP_MULT: f32 = 3.0;
    pub const BOSS_SIZE_MULT: f32 = 1.5;

    /// Slide-in after a kill: 100px over ~300ms
    pub const SLIDE_DISTANCE: f32 = TARGET_SPACING;
    pub const SLIDE_RATE_PER_MS: f32 = 100.0 / 300.0;

    /// Burn status (seconds)
    pub const BURN_SECS: f32 = 3.0;
    /// Electric splash as a fraction of base damage
    pub const SPLASH_FRACTION: f32 = 0.25;
    pub const BULLSEYE_MULT: f32 = 2.0;

    /// Starting combat parameters
    pub const BASE_DAMAGE: f32 = 10.0;
    pub const BASE_FLAME_DPS: f32 = 1.0;
    pub const BASE_BULLSEYE_CHANCE: f32 = 0.2;
    pub const BASE_DOUBLE_SHOT_CHANCE: f32 = 0.0;

    /// Upgrade cadence and presentation
    pub const KILLS_PER_UPGRADE: u32 = 5;
    pub const UPGRADE_CHOICES: usize = 2;
    pub const AUTO_UPGRADE_DELAY_MS: f32 = 1000.0;

    /// Upgrade step sizes
    pub const DRAW_SPEED_STEP_MS: f32 = 150.0;
    pub const FLAME_DPS_STEP: f32 = 0.5;
    pub const BULLSEYE_STEP: f32 = 0.05;
    pub const DAMAGE_STEP: f32 = 2.0;
    pub const DOUBLE_SHOT_STEP: f32 = 0.05;
}

/// Bow anchor as a vector
#[inline]
pub fn bow_position() -> Vec2 {
    Vec2::new(consts::BOW_X, consts::BOW_Y)
}

/// Whether a point lies inside the visible arena (arrows outside are culled)
#[inline]
pub fn in_arena(pos: Vec2) -> bool {
    pos.x < consts::ARENA_WIDTH && pos.y > 0.0 && pos.y < consts::ARENA_HEIGHT
}
