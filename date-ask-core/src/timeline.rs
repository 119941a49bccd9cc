//! Named, independently scheduled timeouts.
//!
//! The celebration runs on two deadlines: the effect is torn down first and
//! the stage advances a little later. Each is its own entry so either can be
//! moved or cancelled without touching the other.

use chrono::{DateTime, Duration, Utc};

/// Seconds from acceptance until the celebratory effect stops.
pub const EFFECT_TEARDOWN_SECS: i64 = 4;
/// Seconds from acceptance until the calendar opens.
pub const ADVANCE_SECS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    EffectTeardown,
    AdvanceToScheduling,
}

impl Timeout {
    /// Offset of this timeout from the moment it is armed.
    pub fn delay(&self) -> Duration {
        match self {
            Timeout::EffectTeardown => Duration::seconds(EFFECT_TEARDOWN_SECS),
            Timeout::AdvanceToScheduling => Duration::seconds(ADVANCE_SECS),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Timeline {
    pending: Vec<(Timeout, DateTime<Utc>)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `timeout` at its usual delay after `now`.
    pub fn arm(&mut self, timeout: Timeout, now: DateTime<Utc>) {
        self.schedule(timeout, now + timeout.delay());
    }

    /// Schedule `timeout` at `deadline`, replacing any earlier schedule of it.
    pub fn schedule(&mut self, timeout: Timeout, deadline: DateTime<Utc>) {
        self.cancel(timeout);
        self.pending.push((timeout, deadline));
    }

    /// Returns true if the timeout was pending.
    pub fn cancel(&mut self, timeout: Timeout) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(t, _)| *t != timeout);
        self.pending.len() != before
    }

    pub fn is_pending(&self, timeout: Timeout) -> bool {
        self.pending.iter().any(|(t, _)| *t == timeout)
    }

    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        self.pending.iter().map(|(_, d)| *d).min()
    }

    /// Remove and return every timeout due at `now`, earliest first.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<Timeout> {
        let mut due: Vec<_> = self
            .pending
            .iter()
            .copied()
            .filter(|(_, deadline)| *deadline <= now)
            .collect();
        due.sort_by_key(|(_, deadline)| *deadline);

        self.pending.retain(|(_, deadline)| *deadline > now);
        due.into_iter().map(|(t, _)| t).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
