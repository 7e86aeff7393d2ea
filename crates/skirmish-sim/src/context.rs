//! Per-frame timing context passed into systems.

/// Wall-clock timing for the current tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    /// Host timestamp for this frame (ms).
    pub now_ms: u64,
    /// Time since the previous frame (ms).
    pub delta_ms: u64,
}

impl FrameClock {
    pub fn new(now_ms: u64, delta_ms: u64) -> Self {
        Self { now_ms, delta_ms }
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta_ms as f32 / 1000.0
    }
}
