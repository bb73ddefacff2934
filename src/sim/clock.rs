//! Frame clock
//!
//! Turns the timestamps handed to each frame callback into per-frame deltas.
//! There is no fixed timestep; the simulation advances once per frame by
//! whatever time actually passed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    start_ms: f64,
    last_ms: f64,
}

impl FrameClock {
    /// Start the clock at timestamp `now_ms`
    pub fn new(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            last_ms: now_ms,
        }
    }

    /// Milliseconds since the previous frame. Timestamps that go backwards
    /// yield zero.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = (now_ms - self.last_ms).max(0.0);
        self.last_ms = self.last_ms.max(now_ms);
        dt as f32
    }

    /// Wall-clock milliseconds since the clock started
    pub fn elapsed_ms(&self) -> f64 {
        self.last_ms - self.start_ms
    }
}
