use std::time::Duration;

/// Suspend-for-duration gate between phases.
///
/// Time only advances through `advance`, so a wait always spans at least one
/// tick after `restart`, even when the duration is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTimer {
    duration: Duration,
    elapsed: Duration,
}

impl PhaseTimer {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn restart(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Adds `delta` and reports whether the wait is over.
    pub fn advance(&mut self, delta: Duration) -> bool {
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        self.elapsed >= self.duration
    }

    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }
}
