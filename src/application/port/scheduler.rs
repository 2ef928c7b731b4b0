// SPDX-License-Identifier: MPL-2.0
//! Timer scheduling port.
//!
//! The player never sleeps. It asks a [`Scheduler`] to arm single-shot
//! timers and receives [`TimerFired`] messages back through the host.

use std::time::Duration;

/// The two independent timers of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Hides the control bar after pointer inactivity.
    ControlsAutoHide,
    /// Flags buffering when no time update arrives in time.
    BufferingDetect,
}

/// Identifies one arming of a timer; fires carrying an older token are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken(u64);

impl TimerToken {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A timer elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub token: TimerToken,
}

/// Port for arming and cancelling single-shot timers.
pub trait Scheduler {
    /// Arms `kind` to fire once after `delay`, replacing any pending arming.
    fn arm(&mut self, kind: TimerKind, token: TimerToken, delay: Duration);

    /// Cancels the pending arming of `kind`, if any.
    fn cancel(&mut self, kind: TimerKind);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn Scheduler) {}

    #[test]
    fn token_next_increments() {
        assert_eq!(TimerToken::new(4).next(), TimerToken::new(5));
        assert_eq!(TimerToken::new(u64::MAX).next(), TimerToken::new(0));
    }
}
