//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in [`GameState`], which is passed
//! by reference to every component. Renderers only read it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bow::Bow;
use super::targets::{Slide, TargetQueue};
use super::upgrades::{Resolution, UpgradeGate, UpgradeKind};
use crate::consts::*;

/// A target sitting in the queue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// 1-based creation order (decides boss spawns)
    pub serial: u32,
    /// Left edge
    pub x: f32,
    /// Vertical centre (fixed)
    pub y: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub width: f32,
    pub height: f32,
    pub is_boss: bool,
    pub burning: bool,
    /// Seconds of burn left
    pub burn_remaining: f32,
}

impl Target {
    /// Create the `serial`-th target at horizontal position `x`
    pub fn new(serial: u32, x: f32) -> Self {
        let is_boss = serial.is_multiple_of(BOSS_EVERY);
        let (hp, scale) = if is_boss {
            (TARGET_HP * BOSS_HP_MULT, BOSS_SIZE_MULT)
        } else {
            (TARGET_HP, 1.0)
        };
        Self {
            serial,
            x,
            y: ARENA_HEIGHT / 2.0,
            hp,
            max_hp: hp,
            width: TARGET_WIDTH * scale,
            height: TARGET_HEIGHT * scale,
            is_boss,
            burning: false,
            burn_remaining: 0.0,
        }
    }

    /// Aim point for arrows
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0.0
    }

    /// Set on fire, refreshing the timer rather than stacking
    pub fn ignite(&mut self) {
        self.burning = true;
        self.burn_remaining = BURN_SECS;
    }

    /// Apply `secs` of burn at `dps`; clears the flag once the timer runs out
    pub fn burn(&mut self, dps: f32, secs: f32) {
        if !self.burning {
            return;
        }
        self.hp -= dps * secs;
        self.burn_remaining -= secs;
        if self.burn_remaining <= 0.0 {
            self.burning = false;
        }
    }
}

/// An arrow in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Consumed by a hit this frame
    pub hit: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            hit: false,
        }
    }

    /// One fixed per-frame step
    pub fn step(&mut self) {
        self.pos += self.vel;
    }
}

/// Combat tuning, changed only by upgrades
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatParams {
    pub damage: f32,
    /// Burn damage per second
    pub flame_dps: f32,
    pub bullseye_chance: f32,
    pub double_shot_chance: f32,
    pub flaming_arrows: bool,
    pub electric_arrows: bool,
    pub draw_ms: f32,
    pub release_ms: f32,
}

impl Default for CombatParams {
    fn default() -> Self {
        Self {
            damage: BASE_DAMAGE,
            flame_dps: BASE_FLAME_DPS,
            bullseye_chance: BASE_BULLSEYE_CHANCE,
            double_shot_chance: BASE_DOUBLE_SHOT_CHANCE,
            flaming_arrows: false,
            electric_arrows: false,
            draw_ms: BASE_DRAW_MS,
            release_ms: RELEASE_MS,
        }
    }
}

/// Monotonic session counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Counters {
    pub kills: u32,
    pub elapsed_ms: f64,
    pub frames: u64,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ArrowsReleased { count: usize },
    TargetHit { serial: u32, damage: f32, bullseye: bool },
    Splash { serial: u32, damage: f32 },
    TargetKilled { serial: u32, boss: bool },
    TargetSpawned { serial: u32, boss: bool },
    UpgradeOffered { event_id: u32, choices: Vec<UpgradeKind> },
    UpgradeApplied { kind: UpgradeKind, via: Resolution },
}

/// The whole simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub params: CombatParams,
    pub bow: Bow,
    pub projectiles: Vec<Projectile>,
    pub targets: TargetQueue,
    pub slide: Slide,
    pub upgrades: UpgradeGate,
    pub counters: Counters,
    /// Pick upgrades automatically when an offer is made
    pub auto_upgrade: bool,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh session: default parameters and the opening row of targets
    pub fn new(seed: u64) -> Self {
        log::info!("New session with seed {seed}");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            params: CombatParams::default(),
            bow: Bow::default(),
            projectiles: Vec::new(),
            targets: TargetQueue::with_opening_row(),
            slide: Slide::default(),
            upgrades: UpgradeGate::default(),
            counters: Counters::default(),
            auto_upgrade: false,
            events: Vec::new(),
        }
    }

    pub fn paused_for_upgrade(&self) -> bool {
        self.upgrades.is_pending()
    }

    /// Targets created so far, including dead ones
    pub fn total_targets(&self) -> u32 {
        self.targets.created()
    }

    pub fn toggle_auto_upgrade(&mut self) -> bool {
        self.auto_upgrade = !self.auto_upgrade;
        log::info!("Auto upgrade {}", if self.auto_upgrade { "on" } else { "off" });
        self.auto_upgrade
    }
}
