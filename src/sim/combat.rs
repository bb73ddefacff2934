//! Arrow spawning and hit resolution
//!
//! Arrows move a fixed distance per frame regardless of frame delta, while
//! burn damage is scaled by elapsed seconds. The two rules are kept separate.

use glam::Vec2;
use rand::Rng;

use super::collision::{aim_direction, point_hits_target};
use super::state::{CombatParams, GameEvent, GameState, Projectile};
use super::targets::TargetQueue;
use crate::consts::*;
use crate::{bow_position, in_arena};

/// Outcome of one arrow striking a target
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Queue index of the struck target
    pub index: usize,
    pub serial: u32,
    pub damage: f32,
    pub bullseye: bool,
    /// Electric damage dealt to the target behind, if any
    pub splash: Option<(u32, f32)>,
}

/// Arrows for one release, aimed at the current front target.
/// Empty when there is nothing to shoot at.
pub fn spawn_arrows<R: Rng>(
    rng: &mut R,
    targets: &TargetQueue,
    params: &CombatParams,
    origin: Vec2,
) -> Vec<Projectile> {
    let Some(front) = targets.front() else {
        return Vec::new();
    };
    let Some(dir) = aim_direction(origin, front.anchor()) else {
        log::debug!("Target #{} sits on the bow, skipping shot", front.serial);
        return Vec::new();
    };

    let arrow = Projectile::new(origin, dir * ARROW_SPEED);
    let mut arrows = vec![arrow.clone()];
    if rng.random_bool(f64::from(params.double_shot_chance.clamp(0.0, 1.0))) {
        arrows.push(arrow);
    }
    arrows
}

/// Release the bow: spawn arrows into the world
pub fn release_arrows(state: &mut GameState) -> usize {
    let arrows = spawn_arrows(&mut state.rng, &state.targets, &state.params, bow_position());
    let count = arrows.len();
    if count > 0 {
        log::debug!("Released {count} arrow(s)");
        state.projectiles.extend(arrows);
        state.events.push(GameEvent::ArrowsReleased { count });
    }
    count
}

/// Damage the target at `index`, with bullseye, burn and electric splash
pub fn strike<R: Rng>(
    rng: &mut R,
    targets: &mut TargetQueue,
    params: &CombatParams,
    index: usize,
) -> Option<Hit> {
    let bullseye = rng.random_bool(f64::from(params.bullseye_chance.clamp(0.0, 1.0)));
    let damage = if bullseye {
        params.damage * BULLSEYE_MULT
    } else {
        params.damage
    };

    let target = targets.get_mut(index)?;
    target.hp -= damage;
    if params.flaming_arrows {
        target.ignite();
    }
    let serial = target.serial;

    let splash = if params.electric_arrows {
        targets.get_mut(index + 1).map(|next| {
            let amount = params.damage * SPLASH_FRACTION;
            next.hp -= amount;
            (next.serial, amount)
        })
    } else {
        None
    };

    Some(Hit {
        index,
        serial,
        damage,
        bullseye,
        splash,
    })
}

/// Step every arrow, resolve at most one hit per arrow, then cull consumed
/// and out-of-bounds arrows
pub fn resolve_projectiles<R: Rng>(
    rng: &mut R,
    projectiles: &mut Vec<Projectile>,
    targets: &mut TargetQueue,
    params: &CombatParams,
) -> Vec<Hit> {
    for arrow in projectiles.iter_mut() {
        arrow.step();
    }

    let mut hits = Vec::new();
    for arrow in projectiles.iter_mut() {
        let struck = targets.iter().position(|t| point_hits_target(arrow.pos, t));
        if let Some(index) = struck
            && let Some(hit) = strike(rng, targets, params, index)
        {
            arrow.hit = true;
            hits.push(hit);
        }
    }

    projectiles.retain(|a| !a.hit && in_arena(a.pos));
    hits
}

/// Per-frame projectile update
pub fn update_projectiles(state: &mut GameState) -> Vec<Hit> {
    if state.paused_for_upgrade() || state.slide.active {
        return Vec::new();
    }

    let hits = resolve_projectiles(
        &mut state.rng,
        &mut state.projectiles,
        &mut state.targets,
        &state.params,
    );
    for hit in &hits {
        state.events.push(GameEvent::TargetHit {
            serial: hit.serial,
            damage: hit.damage,
            bullseye: hit.bullseye,
        });
        if let Some((serial, damage)) = hit.splash {
            state.events.push(GameEvent::Splash { serial, damage });
        }
    }
    hits
}
