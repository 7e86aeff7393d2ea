//! Running score for a scene.

/// Score accumulator. Never negative: a delta that would push it below zero
/// floors it at zero and marks the score depleted, which ends the scene.
/// Once depleted the score is frozen.
#[derive(Debug, Clone, Default)]
pub struct ScoreState {
    value: i32,
    depleted: bool,
}

impl ScoreState {
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    /// Apply a score delta. Returns true if this delta depleted the score.
    pub fn apply(&mut self, delta: i32) -> bool {
        if self.depleted {
            return false;
        }

        let next = self.value.saturating_add(delta);
        if next < 0 {
            self.value = 0;
            self.depleted = true;
            return true;
        }

        self.value = next;
        false
    }

    #[cfg(test)]
    pub(crate) fn set(&mut self, value: i32) {
        self.value = value;
    }
}
