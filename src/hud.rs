//! Read-only view of the simulation for renderers
//!
//! A renderer pulls a [`Snapshot`] each frame, draws it, and feeds upgrade
//! clicks back through [`crate::sim::TickInput`].

use glam::Vec2;
use serde::Serialize;

use crate::sim::{BowPhase, CombatParams, GameState};

/// How arrows look, decided by the active elemental upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrowVariant {
    Plain,
    Flaming,
    Electric,
}

impl ArrowVariant {
    pub fn for_params(params: &CombatParams) -> Self {
        if params.flaming_arrows {
            ArrowVariant::Flaming
        } else if params.electric_arrows {
            ArrowVariant::Electric
        } else {
            ArrowVariant::Plain
        }
    }
}

/// Target render tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetTint {
    Normal,
    Burning,
    Boss,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub serial: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub hp: f32,
    pub max_hp: f32,
    pub is_boss: bool,
    pub burning: bool,
    pub tint: TargetTint,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpgradeView {
    pub event_id: u32,
    pub choices: Vec<&'static str>,
    pub auto: bool,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub bow_phase: BowPhase,
    pub draw_progress: f32,
    /// An arrow sits on the string
    pub nocked: bool,
    pub arrow_variant: ArrowVariant,
    pub arrows: Vec<Vec2>,
    pub targets: Vec<TargetView>,
    pub elapsed_ms: f64,
    pub kills: u32,
    pub params: CombatParams,
    pub upgrade: Option<UpgradeView>,
    pub auto_upgrade: bool,
    pub status: Option<String>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let params = &state.params;
        Self {
            bow_phase: state.bow.phase,
            draw_progress: state.bow.draw_progress(params.draw_ms, params.release_ms),
            nocked: state.bow.is_nocked(),
            arrow_variant: ArrowVariant::for_params(params),
            arrows: state.projectiles.iter().map(|p| p.pos).collect(),
            targets: state
                .targets
                .iter()
                .map(|t| TargetView {
                    serial: t.serial,
                    pos: t.anchor(),
                    size: Vec2::new(t.width, t.height),
                    hp: t.hp,
                    max_hp: t.max_hp,
                    is_boss: t.is_boss,
                    burning: t.burning,
                    tint: if t.is_boss {
                        TargetTint::Boss
                    } else if t.burning {
                        TargetTint::Burning
                    } else {
                        TargetTint::Normal
                    },
                })
                .collect(),
            elapsed_ms: state.counters.elapsed_ms,
            kills: state.counters.kills,
            params: params.clone(),
            upgrade: state.upgrades.pending().map(|offer| UpgradeView {
                event_id: offer.event_id,
                choices: offer.choices.iter().map(|c| c.name()).collect(),
                auto: offer.auto_pick.is_some(),
            }),
            auto_upgrade: state.auto_upgrade,
            status: state.upgrades.status.clone(),
        }
    }
}

/// `MM:SS` from milliseconds
pub fn format_clock(elapsed_ms: f64) -> String {
    let total_secs = (elapsed_ms / 1000.0).floor().max(0.0) as u64;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

/// Label for the auto-upgrade toggle button
pub fn auto_toggle_label(enabled: bool) -> &'static str {
    if enabled {
        "Auto Upgrade: ON"
    } else {
        "Auto Upgrade: OFF"
    }
}

/// One-line HUD text
pub fn info_line(state: &GameState) -> String {
    let params = &state.params;
    let hp_text = state
        .targets
        .front()
        .map(|t| format!("Target HP: {:.0} / {:.0}", t.hp.max(0.0), t.max_hp))
        .unwrap_or_default();
    format!(
        "Time: {} | Kills: {} | Draw Speed: {:.2}s | Damage: {} | Bullseye: {:.0}% | Flame: {:.1}/s | Electric: {} | {}",
        format_clock(state.counters.elapsed_ms),
        state.counters.kills,
        params.draw_ms / 1000.0,
        params.damage,
        params.bullseye_chance * 100.0,
        params.flame_dps,
        if params.electric_arrows { "ON" } else { "OFF" },
        hp_text
    )
}
