use arrow_rush::sim::{
    CATALOG, GameState, Target, TargetQueue, TickInput, UpgradeKind, draw_upgrades, tick,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

proptest! {
    #[test]
    fn boss_iff_serial_multiple_of_five(serial in 1u32..10_000, x in 0.0f32..2000.0) {
        let target = Target::new(serial, x);
        prop_assert_eq!(target.is_boss, serial % 5 == 0);
        prop_assert!(target.hp <= target.max_hp);
    }

    #[test]
    fn queue_serials_are_sequential(spawns in 0usize..60) {
        let mut queue = TargetQueue::with_opening_row();
        for _ in 0..spawns {
            queue.refill();
        }
        for (i, target) in queue.iter().enumerate() {
            prop_assert_eq!(target.serial, i as u32 + 1);
            prop_assert_eq!(target.is_boss, target.serial % 5 == 0);
        }
    }

    #[test]
    fn upgrade_draws_are_distinct(seed in any::<u64>(), n in 0usize..10) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let picks = draw_upgrades(&mut rng, &CATALOG, n);
        prop_assert_eq!(picks.len(), n.min(CATALOG.len()));
        for (i, a) in picks.iter().enumerate() {
            for b in &picks[i + 1..] {
                prop_assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn single_entry_catalog_yields_one(seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let picks = draw_upgrades(&mut rng, &[UpgradeKind::DoubleShot], 2);
        prop_assert_eq!(picks, vec![UpgradeKind::DoubleShot]);
    }

    #[test]
    fn hitpoints_never_exceed_max(
        seed in any::<u64>(),
        frames in 1usize..600,
        dt in 1.0f32..50.0,
        upgrades in proptest::collection::vec(0usize..7, 0..10),
    ) {
        let mut state = GameState::new(seed);
        for i in upgrades {
            CATALOG[i].apply(&mut state.params);
        }
        state.auto_upgrade = true;
        for _ in 0..frames {
            tick(&mut state, &TickInput::default(), dt);
            for target in state.targets.iter() {
                prop_assert!(target.hp <= target.max_hp);
            }
            prop_assert!(state.params.bullseye_chance <= 1.0);
            prop_assert!(state.params.double_shot_chance <= 1.0);
            prop_assert!(state.params.draw_ms >= 200.0);
        }
    }

    #[test]
    fn paused_frames_change_nothing(seed in any::<u64>(), frames in 1usize..120, dt in 1.0f32..50.0) {
        let mut state = GameState::new(seed);
        for _ in 0..80 {
            tick(&mut state, &TickInput::default(), 16.0);
        }
        state.counters.kills = 4;
        state.targets.front_mut().unwrap().hp = 0.0;
        tick(&mut state, &TickInput::default(), 16.0);
        prop_assume!(state.paused_for_upgrade());

        let arrows: Vec<_> = state.projectiles.iter().map(|p| p.pos).collect();
        let hps: Vec<_> = state.targets.iter().map(|t| t.hp).collect();
        let slide = state.slide.clone();
        for _ in 0..frames {
            tick(&mut state, &TickInput::default(), dt);
            let now: Vec<_> = state.projectiles.iter().map(|p| p.pos).collect();
            prop_assert_eq!(&now[..arrows.len()], &arrows[..]);
            let now_hps: Vec<_> = state.targets.iter().map(|t| t.hp).collect();
            prop_assert_eq!(&now_hps, &hps);
            prop_assert_eq!(&state.slide, &slide);
        }
    }
}
