//! Simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only, owned by the game state
//! - One explicit state struct, no globals
//! - No rendering or platform dependencies

pub mod bow;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod state;
pub mod targets;
pub mod tick;
pub mod upgrades;

pub use bow::{Bow, BowPhase};
pub use clock::FrameClock;
pub use collision::{aim_direction, point_hits_target};
pub use combat::{Hit, release_arrows, resolve_projectiles, spawn_arrows, strike, update_projectiles};
pub use state::{CombatParams, Counters, GameEvent, GameState, Projectile, Target};
pub use targets::{Slide, TargetQueue, update_targets};
pub use tick::{Session, TickInput, UpgradeChoice, tick};
pub use upgrades::{
    CATALOG, Resolution, UpgradeGate, UpgradeKind, UpgradeOffer, check_upgrade, draw_upgrades,
    select_upgrade, should_offer,
};
