use std::time::Duration;

/// Linear opacity animation evaluated against absolute time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpacityTransition {
    from: f64,
    to: f64,
    started_at: Duration,
    duration: Duration,
}

impl OpacityTransition {
    #[must_use]
    pub fn new(from: f64, to: f64, started_at: Duration, duration: Duration) -> Self {
        Self {
            from: from.clamp(0.0, 1.0),
            to: to.clamp(0.0, 1.0),
            started_at,
            duration,
        }
    }

    #[must_use]
    pub fn target(self) -> f64 {
        self.to
    }

    #[must_use]
    pub fn ends_at(self) -> Duration {
        self.started_at + self.duration
    }

    #[must_use]
    pub fn is_finished_at(self, now: Duration) -> bool {
        now >= self.ends_at()
    }

    #[must_use]
    pub fn value_at(self, now: Duration) -> f64 {
        if self.duration.is_zero() || self.is_finished_at(now) {
            return self.to;
        }
        let elapsed = now.saturating_sub(self.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * t
    }
}
