// SPDX-License-Identifier: MPL-2.0
//! Single-shot timer state machine.
//!
//! Each timer owns one [`TimerKind`] slot on the injected [`Scheduler`]:
//!
//! - `Idle`: nothing armed
//! - `Armed(token)`: a fire carrying `token` is expected
//! - `Fired`: the armed fire arrived and was accepted
//!
//! Arming always cancels the previous slot first and hands out a fresh
//! token, so a fire that was already in flight when the timer was re-armed
//! is recognized as stale and dropped.

use crate::application::port::{Scheduler, TimerKind, TimerToken};
use std::time::Duration;

/// Lifecycle of a [`SingleShotTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Armed(TimerToken),
    Fired,
}

/// One-shot timer driven through a [`Scheduler`].
#[derive(Debug, Clone)]
pub struct SingleShotTimer {
    kind: TimerKind,
    delay: Duration,
    state: TimerState,
    next_token: TimerToken,
}

impl SingleShotTimer {
    #[must_use]
    pub fn new(kind: TimerKind, delay: Duration) -> Self {
        Self {
            kind,
            delay,
            state: TimerState::Idle,
            next_token: TimerToken::new(1),
        }
    }

    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Changes the delay used by the next [`arm`](Self::arm).
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        self.state
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed(_))
    }

    /// Cancels any pending fire, then arms with a fresh token.
    pub fn arm(&mut self, scheduler: &mut dyn Scheduler) -> TimerToken {
        scheduler.cancel(self.kind);
        let token = self.next_token;
        self.next_token = token.next();
        scheduler.arm(self.kind, token, self.delay);
        self.state = TimerState::Armed(token);
        token
    }

    /// Cancels a pending fire. Idle and fired timers are left untouched.
    pub fn cancel(&mut self, scheduler: &mut dyn Scheduler) {
        if self.is_armed() {
            scheduler.cancel(self.kind);
            self.state = TimerState::Idle;
        }
    }

    /// Accepts a fire if it carries the armed token.
    ///
    /// Returns false for stale or duplicate fires.
    pub fn on_fired(&mut self, token: TimerToken) -> bool {
        match self.state {
            TimerState::Armed(armed) if armed == token => {
                self.state = TimerState::Fired;
                true
            }
            _ => false,
        }
    }
}
