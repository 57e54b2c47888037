use std::time::Duration;

/// Identifies one scheduled deferred action.
///
/// Handles are generation-stamped: once the slot is cancelled or
/// rescheduled, older handles never match again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle {
    generation: u64,
    due_at: Duration,
}

impl TimerHandle {
    #[must_use]
    pub fn due_at(self) -> Duration {
        self.due_at
    }
}

/// Holder for at most one pending deferred action.
#[derive(Debug, Default)]
pub struct TimerSlot {
    generation: u64,
    pending: Option<TimerHandle>,
}

impl TimerSlot {
    /// Schedules a new action at `due_at`, replacing any pending one.
    pub fn schedule(&mut self, due_at: Duration) -> TimerHandle {
        self.generation = self.generation.wrapping_add(1);
        let handle = TimerHandle {
            generation: self.generation,
            due_at,
        };
        self.pending = Some(handle);
        handle
    }

    /// Cancels the pending action. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().is_some()
    }

    #[must_use]
    pub fn pending(&self) -> Option<TimerHandle> {
        self.pending
    }

    #[must_use]
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.pending == Some(handle)
    }

    /// Takes the pending action if it is due at `now`.
    pub fn fire_due(&mut self, now: Duration) -> Option<TimerHandle> {
        match self.pending {
            Some(handle) if handle.due_at <= now => self.pending.take(),
            _ => None,
        }
    }
}
