// SPDX-License-Identifier: MPL-2.0
//! Virtual-time scheduler.
//!
//! [`ManualClock`] holds the virtual "now" and the armed deadlines;
//! [`ManualScheduler`] is the port handed to the player. Time only moves
//! when the owner calls [`ManualClock::advance`], which returns the timers
//! that came due so the caller can dispatch them.

use crate::application::port::{Scheduler, TimerFired, TimerKind, TimerToken};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
struct ClockInner {
    now: Duration,
    armed: HashMap<TimerKind, (TimerToken, Duration)>,
}

/// Shared virtual clock.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler port arming timers on this clock.
    #[must_use]
    pub fn scheduler(&self) -> ManualScheduler {
        ManualScheduler {
            clock: self.clone(),
        }
    }

    /// Virtual time elapsed since creation.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    #[must_use]
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.inner.borrow().armed.contains_key(&kind)
    }

    #[must_use]
    pub fn armed_count(&self) -> usize {
        self.inner.borrow().armed.len()
    }

    /// Moves time forward and returns the timers that came due, earliest
    /// deadline first.
    pub fn advance(&self, elapsed: Duration) -> Vec<TimerFired> {
        let mut inner = self.inner.borrow_mut();
        inner.now += elapsed;
        let now = inner.now;

        let mut due: Vec<(Duration, TimerFired)> = inner
            .armed
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(kind, (token, deadline))| {
                (
                    *deadline,
                    TimerFired {
                        kind: *kind,
                        token: *token,
                    },
                )
            })
            .collect();
        due.sort_by_key(|(deadline, _)| *deadline);
        for (_, fired) in &due {
            inner.armed.remove(&fired.kind);
        }
        due.into_iter().map(|(_, fired)| fired).collect()
    }
}

/// [`Scheduler`] port over a [`ManualClock`].
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    clock: ManualClock,
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, kind: TimerKind, token: TimerToken, delay: Duration) {
        let mut inner = self.clock.inner.borrow_mut();
        let deadline = inner.now + delay;
        inner.armed.insert(kind, (token, deadline));
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.clock.inner.borrow_mut().armed.remove(&kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_when_due() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        scheduler.arm(
            TimerKind::ControlsAutoHide,
            TimerToken::new(7),
            Duration::from_secs(3),
        );

        assert!(clock.advance(Duration::from_millis(2999)).is_empty());
        let fired = clock.advance(Duration::from_millis(1));

        assert_eq!(
            fired,
            vec![TimerFired {
                kind: TimerKind::ControlsAutoHide,
                token: TimerToken::new(7)
            }]
        );
        assert_eq!(clock.now(), Duration::from_secs(3));
        assert!(!clock.is_armed(TimerKind::ControlsAutoHide));
    }

    #[test]
    fn due_timers_come_out_in_deadline_order() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        scheduler.arm(
            TimerKind::ControlsAutoHide,
            TimerToken::new(1),
            Duration::from_secs(3),
        );
        scheduler.arm(
            TimerKind::BufferingDetect,
            TimerToken::new(1),
            Duration::from_secs(1),
        );

        let kinds: Vec<_> = clock
            .advance(Duration::from_secs(5))
            .into_iter()
            .map(|fired| fired.kind)
            .collect();

        assert_eq!(
            kinds,
            vec![TimerKind::BufferingDetect, TimerKind::ControlsAutoHide]
        );
    }

    #[test]
    fn cancel_and_rearm_replace_deadline() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        scheduler.arm(
            TimerKind::BufferingDetect,
            TimerToken::new(1),
            Duration::from_secs(1),
        );
        scheduler.cancel(TimerKind::BufferingDetect);
        assert_eq!(clock.armed_count(), 0);

        scheduler.arm(
            TimerKind::BufferingDetect,
            TimerToken::new(2),
            Duration::from_secs(2),
        );
        assert!(clock.advance(Duration::from_secs(1)).is_empty());
        assert_eq!(clock.advance(Duration::from_secs(1))[0].token, TimerToken::new(2));
    }
}
