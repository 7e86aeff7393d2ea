//! Round countdown.

use crate::context::FrameClock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining_ms: u64,
}

impl Countdown {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            remaining_ms: duration_ms,
        }
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Subtract `delta_ms`. Returns true on the call that reaches zero.
    pub fn advance(&mut self, delta_ms: u64) -> bool {
        if self.remaining_ms == 0 {
            return false;
        }
        self.remaining_ms = self.remaining_ms.saturating_sub(delta_ms);
        self.remaining_ms == 0
    }
}

/// Count the round down by this frame's elapsed time.
pub fn run(countdown: &mut Countdown, clock: &FrameClock) -> bool {
    countdown.advance(clock.delta_ms)
}
