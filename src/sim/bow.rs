//! Bow state machine
//!
//! Idle -> Drawing -> Releasing -> Idle, driven purely by elapsed time.
//! The draw duration is the attack-speed knob.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BowPhase {
    #[default]
    Idle,
    Drawing,
    Releasing,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bow {
    pub phase: BowPhase,
    /// Milliseconds spent in the current phase
    pub timer_ms: f32,
}

impl Bow {
    /// Advance by `dt_ms`. Returns true on the frame the string is released.
    ///
    /// `blocked` only stops a new draw from starting; a draw already in
    /// progress still runs to release.
    pub fn advance(&mut self, dt_ms: f32, draw_ms: f32, release_ms: f32, blocked: bool) -> bool {
        let mut released = false;
        match self.phase {
            BowPhase::Drawing => {
                self.timer_ms += dt_ms;
                if self.timer_ms >= draw_ms {
                    self.enter(BowPhase::Releasing);
                    released = true;
                }
            }
            BowPhase::Releasing => {
                self.timer_ms += dt_ms;
                if self.timer_ms >= release_ms {
                    self.enter(BowPhase::Idle);
                }
            }
            BowPhase::Idle => {}
        }

        if !blocked && self.phase == BowPhase::Idle {
            self.enter(BowPhase::Drawing);
        }
        released
    }

    fn enter(&mut self, phase: BowPhase) {
        self.phase = phase;
        self.timer_ms = 0.0;
    }

    /// String pull in [0, 1] for rendering
    pub fn draw_progress(&self, draw_ms: f32, release_ms: f32) -> f32 {
        match self.phase {
            BowPhase::Drawing => (self.timer_ms / draw_ms).min(1.0),
            BowPhase::Releasing => 1.0 - (self.timer_ms / release_ms).min(1.0),
            BowPhase::Idle => 0.0,
        }
    }

    /// An arrow is shown on the string
    pub fn is_nocked(&self) -> bool {
        self.phase != BowPhase::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_starts_drawing_unless_blocked() {
        let mut bow = Bow::default();
        assert!(!bow.advance(16.0, 1000.0, 200.0, true));
        assert_eq!(bow.phase, BowPhase::Idle);

        assert!(!bow.advance(16.0, 1000.0, 200.0, false));
        assert_eq!(bow.phase, BowPhase::Drawing);
        assert_eq!(bow.timer_ms, 0.0);
    }

    #[test]
    fn test_full_cycle() {
        let mut bow = Bow::default();
        bow.advance(0.0, 1000.0, 200.0, false);

        assert!(!bow.advance(999.0, 1000.0, 200.0, false));
        assert!(bow.advance(1.0, 1000.0, 200.0, false));
        assert_eq!(bow.phase, BowPhase::Releasing);

        assert!(!bow.advance(200.0, 1000.0, 200.0, false));
        // Release finished and a new draw started in the same frame
        assert_eq!(bow.phase, BowPhase::Drawing);
    }

    #[test]
    fn test_blocked_draw_still_releases() {
        let mut bow = Bow::default();
        bow.advance(0.0, 1000.0, 200.0, false);
        assert!(bow.advance(1000.0, 1000.0, 200.0, true));
        bow.advance(200.0, 1000.0, 200.0, true);
        assert_eq!(bow.phase, BowPhase::Idle);
    }

    #[test]
    fn test_draw_progress() {
        let mut bow = Bow::default();
        assert_eq!(bow.draw_progress(1000.0, 200.0), 0.0);
        bow.advance(0.0, 1000.0, 200.0, false);
        bow.advance(250.0, 1000.0, 200.0, false);
        assert!((bow.draw_progress(1000.0, 200.0) - 0.25).abs() < 1e-6);
        bow.advance(750.0, 1000.0, 200.0, false);
        assert_eq!(bow.draw_progress(1000.0, 200.0), 1.0);
        bow.advance(50.0, 1000.0, 200.0, false);
        assert!((bow.draw_progress(1000.0, 200.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_faster_draw_cycles_faster() {
        let count_releases = |draw_ms: f32| {
            let mut bow = Bow::default();
            (0..600)
                .filter(|_| bow.advance(16.0, draw_ms, 200.0, false))
                .count()
        };
        assert!(count_releases(200.0) > count_releases(1000.0));
    }
}
