//! Upgrade catalog and the pause-for-upgrade gate
//!
//! Every fifth kill pauses combat and offers two distinct upgrades. The offer
//! is resolved exactly once, either by the player or by the auto-upgrade
//! timer; whichever arrives second finds nothing pending and does nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{CombatParams, GameEvent, GameState};
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    DrawSpeed,
    FlamingArrows,
    ElectricArrows,
    FlameDamage,
    BullseyeChance,
    ArrowDamage,
    DoubleShot,
}

/// Every upgrade that can be offered
pub const CATALOG: [UpgradeKind; 7] = [
    UpgradeKind::DrawSpeed,
    UpgradeKind::FlamingArrows,
    UpgradeKind::ElectricArrows,
    UpgradeKind::FlameDamage,
    UpgradeKind::BullseyeChance,
    UpgradeKind::ArrowDamage,
    UpgradeKind::DoubleShot,
];

impl UpgradeKind {
    pub fn name(self) -> &'static str {
        match self {
            UpgradeKind::DrawSpeed => "Draw Speed",
            UpgradeKind::FlamingArrows => "Flaming Arrows",
            UpgradeKind::ElectricArrows => "Electric Arrows",
            UpgradeKind::FlameDamage => "Flame Damage",
            UpgradeKind::BullseyeChance => "Bullseye Chance",
            UpgradeKind::ArrowDamage => "Arrow Damage",
            UpgradeKind::DoubleShot => "Double Shot",
        }
    }

    /// Mutate combat parameters, respecting floors and caps
    pub fn apply(self, params: &mut CombatParams) {
        match self {
            UpgradeKind::DrawSpeed => {
                params.draw_ms = (params.draw_ms - DRAW_SPEED_STEP_MS).max(MIN_DRAW_MS);
            }
            UpgradeKind::FlamingArrows => params.flaming_arrows = true,
            UpgradeKind::ElectricArrows => params.electric_arrows = true,
            UpgradeKind::FlameDamage => params.flame_dps += FLAME_DPS_STEP,
            UpgradeKind::BullseyeChance => {
                params.bullseye_chance = (params.bullseye_chance + BULLSEYE_STEP).min(1.0);
            }
            UpgradeKind::ArrowDamage => params.damage += DAMAGE_STEP,
            UpgradeKind::DoubleShot => {
                params.double_shot_chance =
                    (params.double_shot_chance + DOUBLE_SHOT_STEP).min(1.0);
            }
        }
    }
}

/// Draw up to `n` distinct upgrades by sampling from a shrinking pool.
/// Returns fewer than `n` when the catalog runs out.
pub fn draw_upgrades<R: Rng>(
    rng: &mut R,
    catalog: &[UpgradeKind],
    n: usize,
) -> Vec<UpgradeKind> {
    let mut pool = catalog.to_vec();
    let mut chosen = Vec::with_capacity(n.min(pool.len()));
    while chosen.len() < n && !pool.is_empty() {
        let index = rng.random_range(0..pool.len());
        chosen.push(pool.remove(index));
    }
    chosen
}

/// Upgrades are offered at every positive multiple of the kill cadence
pub fn should_offer(kills: u32) -> bool {
    kills > 0 && kills.is_multiple_of(KILLS_PER_UPGRADE)
}

/// Who settled an offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Manual,
    Auto,
}

/// Deferred automatic pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoPick {
    pub index: usize,
    pub remaining_ms: f32,
}

/// An unresolved upgrade choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpgradeOffer {
    pub event_id: u32,
    pub choices: Vec<UpgradeKind>,
    pub auto_pick: Option<AutoPick>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpgradeGate {
    pending: Option<UpgradeOffer>,
    next_event_id: u32,
    /// Upgrades applied so far, oldest first
    pub applied: Vec<UpgradeKind>,
    /// Last message for the player ("Arrow Damage upgraded!")
    pub status: Option<String>,
}

impl UpgradeGate {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<&UpgradeOffer> {
        self.pending.as_ref()
    }

    /// Names of the options on offer (empty when nothing is pending)
    pub fn choice_names(&self) -> Vec<&'static str> {
        self.pending
            .iter()
            .flat_map(|offer| offer.choices.iter().map(|kind| kind.name()))
            .collect()
    }

    /// Open a new offer drawn from `catalog`. With `auto`, one option is
    /// picked now and applied once the delay has elapsed.
    pub fn open<R: Rng>(
        &mut self,
        rng: &mut R,
        catalog: &[UpgradeKind],
        auto: bool,
    ) -> Option<&UpgradeOffer> {
        if self.pending.is_some() {
            log::warn!("Upgrade offer already pending, not opening another");
            return self.pending.as_ref();
        }
        let choices = draw_upgrades(rng, catalog, UPGRADE_CHOICES);
        if choices.is_empty() {
            return None;
        }
        let auto_pick = auto.then(|| AutoPick {
            index: rng.random_range(0..choices.len()),
            remaining_ms: AUTO_UPGRADE_DELAY_MS,
        });

        self.next_event_id += 1;
        let event_id = self.next_event_id;
        log::info!(
            "Upgrade #{event_id} offered: {:?}{}",
            choices.iter().map(|c| c.name()).collect::<Vec<_>>(),
            if auto { " (auto)" } else { "" }
        );
        self.pending = Some(UpgradeOffer {
            event_id,
            choices,
            auto_pick,
        });
        self.pending.as_ref()
    }

    /// Settle the pending offer. Only the first resolution of an event
    /// takes effect; stale ids and bad indices are ignored.
    pub fn resolve(
        &mut self,
        event_id: u32,
        index: usize,
        via: Resolution,
        params: &mut CombatParams,
    ) -> Option<UpgradeKind> {
        let Some(offer) = self.pending.as_ref() else {
            log::warn!("Upgrade #{event_id} already resolved, ignoring {via:?} pick");
            return None;
        };
        if offer.event_id != event_id {
            log::warn!(
                "Stale upgrade pick for #{event_id} (pending is #{}), ignoring",
                offer.event_id
            );
            return None;
        }
        let Some(&kind) = offer.choices.get(index) else {
            log::warn!("Upgrade #{event_id} has no option {index}");
            return None;
        };

        self.pending = None;
        kind.apply(params);
        self.applied.push(kind);
        self.status = Some(match via {
            Resolution::Manual => format!("{} upgraded!", kind.name()),
            Resolution::Auto => format!("Auto: {} upgraded!", kind.name()),
        });
        log::info!("Upgrade #{event_id}: {} applied ({via:?})", kind.name());
        Some(kind)
    }

    /// Count down the auto pick; applies it when the delay runs out
    pub fn advance_auto(&mut self, dt_ms: f32, params: &mut CombatParams) -> Option<UpgradeKind> {
        let offer = self.pending.as_mut()?;
        let auto = offer.auto_pick.as_mut()?;
        auto.remaining_ms -= dt_ms;
        if auto.remaining_ms > 0.0 {
            return None;
        }
        let (event_id, index) = (offer.event_id, auto.index);
        self.resolve(event_id, index, Resolution::Auto, params)
    }
}

/// Called right after a kill: opens an offer when the kill count is due
pub fn check_upgrade(state: &mut GameState) {
    if !should_offer(state.counters.kills) {
        return;
    }
    let auto = state.auto_upgrade;
    if let Some(offer) = state.upgrades.open(&mut state.rng, &CATALOG, auto) {
        state.events.push(GameEvent::UpgradeOffered {
            event_id: offer.event_id,
            choices: offer.choices.clone(),
        });
    }
}

/// Player picked option `index` of offer `event_id`
pub fn select_upgrade(state: &mut GameState, event_id: u32, index: usize) -> Option<UpgradeKind> {
    let kind = state
        .upgrades
        .resolve(event_id, index, Resolution::Manual, &mut state.params)?;
    state.events.push(GameEvent::UpgradeApplied {
        kind,
        via: Resolution::Manual,
    });
    Some(kind)
}

/// Let the auto-upgrade timer run for `dt_ms`
pub fn advance_auto_upgrade(state: &mut GameState, dt_ms: f32) -> Option<UpgradeKind> {
    let kind = state.upgrades.advance_auto(dt_ms, &mut state.params)?;
    state.events.push(GameEvent::UpgradeApplied {
        kind,
        via: Resolution::Auto,
    });
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_draw_is_distinct() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let picks = draw_upgrades(&mut rng, &CATALOG, 2);
            assert_eq!(picks.len(), 2);
            assert_ne!(picks[0], picks[1]);
        }
    }

    #[test]
    fn test_draw_from_tiny_catalog() {
        let mut rng = Pcg32::seed_from_u64(3);
        let picks = draw_upgrades(&mut rng, &[UpgradeKind::ArrowDamage], 2);
        assert_eq!(picks, vec![UpgradeKind::ArrowDamage]);
        assert!(draw_upgrades(&mut rng, &[], 2).is_empty());
    }

    #[test]
    fn test_should_offer() {
        assert!(!should_offer(0));
        assert!(!should_offer(4));
        assert!(should_offer(5));
        assert!(!should_offer(6));
        assert!(should_offer(10));
    }

    #[test]
    fn test_apply_clamps() {
        let mut params = CombatParams {
            draw_ms: 250.0,
            bullseye_chance: 0.98,
            double_shot_chance: 0.97,
            ..Default::default()
        };
        UpgradeKind::DrawSpeed.apply(&mut params);
        UpgradeKind::BullseyeChance.apply(&mut params);
        UpgradeKind::DoubleShot.apply(&mut params);
        assert_eq!(params.draw_ms, MIN_DRAW_MS);
        assert_eq!(params.bullseye_chance, 1.0);
        assert_eq!(params.double_shot_chance, 1.0);
    }

    #[test]
    fn test_apply_steps() {
        let mut params = CombatParams::default();
        UpgradeKind::DrawSpeed.apply(&mut params);
        UpgradeKind::FlameDamage.apply(&mut params);
        UpgradeKind::ArrowDamage.apply(&mut params);
        UpgradeKind::FlamingArrows.apply(&mut params);
        UpgradeKind::ElectricArrows.apply(&mut params);
        assert_eq!(params.draw_ms, 850.0);
        assert_eq!(params.flame_dps, 1.5);
        assert_eq!(params.damage, 12.0);
        assert!(params.flaming_arrows);
        assert!(params.electric_arrows);
    }

    #[test]
    fn test_resolve_applies_once() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut params = CombatParams::default();
        let mut gate = UpgradeGate::default();
        let event_id = gate.open(&mut rng, &[UpgradeKind::ArrowDamage], false).unwrap().event_id;

        assert_eq!(
            gate.resolve(event_id, 0, Resolution::Manual, &mut params),
            Some(UpgradeKind::ArrowDamage)
        );
        assert!(gate.resolve(event_id, 0, Resolution::Manual, &mut params).is_none());
        assert_eq!(params.damage, 12.0);
        assert_eq!(gate.status.as_deref(), Some("Arrow Damage upgraded!"));
    }

    #[test]
    fn test_manual_beats_auto_timer() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut params = CombatParams::default();
        let mut gate = UpgradeGate::default();
        let event_id = gate.open(&mut rng, &[UpgradeKind::ArrowDamage], true).unwrap().event_id;

        gate.advance_auto(400.0, &mut params);
        assert!(gate.is_pending());
        gate.resolve(event_id, 0, Resolution::Manual, &mut params);
        assert!(gate.advance_auto(1000.0, &mut params).is_none());
        assert_eq!(params.damage, 12.0);
        assert_eq!(gate.applied.len(), 1);
    }

    #[test]
    fn test_auto_fires_after_delay() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut params = CombatParams::default();
        let mut gate = UpgradeGate::default();
        gate.open(&mut rng, &CATALOG, true);

        assert!(gate.advance_auto(999.0, &mut params).is_none());
        let kind = gate.advance_auto(1.0, &mut params).unwrap();
        assert!(!gate.is_pending());
        assert_eq!(gate.status, Some(format!("Auto: {} upgraded!", kind.name())));

        // Late manual click is a no-op
        assert!(gate.resolve(1, 0, Resolution::Manual, &mut params).is_none());
    }

    #[test]
    fn test_stale_or_bad_selection_ignored() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut params = CombatParams::default();
        let mut gate = UpgradeGate::default();
        let event_id = gate.open(&mut rng, &CATALOG, false).unwrap().event_id;

        assert!(gate.resolve(event_id + 1, 0, Resolution::Manual, &mut params).is_none());
        assert!(gate.resolve(event_id, 2, Resolution::Manual, &mut params).is_none());
        assert!(gate.is_pending());
        assert_eq!(params, CombatParams::default());
    }
}
