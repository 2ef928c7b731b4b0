// SPDX-License-Identifier: MPL-2.0
//! Transient visibility of the control bar, the standby card and popovers.

use super::timer::SingleShotTimer;
use crate::application::port::{Scheduler, TimerKind, TimerToken};
use crate::domain::{AutoHideDelay, Popover};

/// Which transient overlays are up.
///
/// The open popover is a single slot, so opening one replaces any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityState {
    pub controls_visible: bool,
    pub standby_visible: bool,
    pub popover: Option<Popover>,
}

#[derive(Debug, Clone)]
pub struct VisibilityController {
    state: VisibilityState,
    auto_close: bool,
    timer: SingleShotTimer,
}

impl VisibilityController {
    /// `auto_close` false keeps the controls up when the timer fires.
    #[must_use]
    pub fn new(delay: AutoHideDelay, auto_close: bool) -> Self {
        Self {
            state: VisibilityState::default(),
            auto_close,
            timer: SingleShotTimer::new(TimerKind::ControlsAutoHide, delay.as_duration()),
        }
    }

    #[must_use]
    pub fn state(&self) -> VisibilityState {
        self.state
    }

    pub fn set_auto_close(&mut self, auto_close: bool) {
        self.auto_close = auto_close;
    }

    pub fn set_delay(&mut self, delay: AutoHideDelay) {
        self.timer.set_delay(delay.as_duration());
    }

    /// Pointer moved or a key was pressed: show controls and restart the
    /// hide countdown.
    pub fn on_pointer_activity(&mut self, scheduler: &mut dyn Scheduler) {
        self.state.controls_visible = true;
        self.state.standby_visible = false;
        self.timer.arm(scheduler);
    }

    /// The auto-hide timer fired. Returns true if anything changed.
    pub fn on_auto_hide(&mut self, token: TimerToken, playing: bool) -> bool {
        if !self.timer.on_fired(token) {
            return false;
        }
        let before = self.state;
        if self.auto_close {
            self.state.controls_visible = false;
        }
        if !playing {
            self.state.standby_visible = true;
        }
        before != self.state
    }

    /// Playback advanced: the standby card goes away.
    pub fn on_time_update(&mut self) {
        self.state.standby_visible = false;
    }

    pub fn on_fullscreen_entered(&mut self) {
        self.state.standby_visible = true;
    }

    /// Opens `popover`, closing whichever one was open.
    pub fn open_popover(&mut self, popover: Popover) {
        self.state.popover = Some(popover);
    }

    /// Closes `popover` if it is the open one.
    pub fn close_popover(&mut self, popover: Popover) {
        if self.state.popover == Some(popover) {
            self.state.popover = None;
        }
    }

    pub fn close_all_popovers(&mut self) {
        self.state.popover = None;
    }

    #[must_use]
    pub fn is_open(&self, popover: Popover) -> bool {
        self.state.popover == Some(popover)
    }

    /// A new source loaded: popovers tied to the old entry close.
    pub fn reset_for_source(&mut self) {
        for popover in [Popover::Playlist, Popover::NextUp] {
            self.close_popover(popover);
        }
        self.state.standby_visible = false;
    }

    pub fn teardown(&mut self, scheduler: &mut dyn Scheduler) {
        self.timer.cancel(scheduler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ManualClock;
    use std::time::Duration;

    fn controller(auto_close: bool) -> VisibilityController {
        VisibilityController::new(AutoHideDelay::default(), auto_close)
    }

    #[test]
    fn pointer_activity_shows_controls_and_arms_timer() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        let mut visibility = controller(true);

        visibility.on_pointer_activity(&mut scheduler);

        assert!(visibility.state().controls_visible);
        assert!(!visibility.state().standby_visible);
        assert!(clock.is_armed(TimerKind::ControlsAutoHide));
    }

    #[test]
    fn auto_hide_while_paused_shows_standby() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        let mut visibility = controller(true);
        visibility.on_pointer_activity(&mut scheduler);

        let fired = clock.advance(Duration::from_secs(3));
        assert_eq!(fired.len(), 1);
        assert!(visibility.on_auto_hide(fired[0].token, false));

        assert!(!visibility.state().controls_visible);
        assert!(visibility.state().standby_visible);
    }

    #[test]
    fn auto_hide_while_playing_never_shows_standby() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        let mut visibility = controller(true);
        visibility.on_pointer_activity(&mut scheduler);

        let fired = clock.advance(Duration::from_secs(3));
        visibility.on_auto_hide(fired[0].token, true);

        assert!(!visibility.state().controls_visible);
        assert!(!visibility.state().standby_visible);
    }

    #[test]
    fn activity_restarts_countdown() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        let mut visibility = controller(true);

        visibility.on_pointer_activity(&mut scheduler);
        assert!(clock.advance(Duration::from_secs(2)).is_empty());
        visibility.on_pointer_activity(&mut scheduler);
        assert!(clock.advance(Duration::from_secs(2)).is_empty());
        assert_eq!(clock.advance(Duration::from_secs(1)).len(), 1);
    }

    #[test]
    fn stale_token_is_ignored() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        let mut visibility = controller(true);
        visibility.on_pointer_activity(&mut scheduler);

        assert!(!visibility.on_auto_hide(TimerToken::new(999), false));
        assert!(visibility.state().controls_visible);
    }

    #[test]
    fn disabled_auto_close_keeps_controls() {
        let clock = ManualClock::new();
        let mut scheduler = clock.scheduler();
        let mut visibility = controller(false);
        visibility.on_pointer_activity(&mut scheduler);

        let fired = clock.advance(Duration::from_secs(3));
        visibility.on_auto_hide(fired[0].token, false);

        assert!(visibility.state().controls_visible);
        assert!(visibility.state().standby_visible);
    }

    #[test]
    fn opening_a_popover_closes_the_other() {
        let mut visibility = controller(true);

        visibility.open_popover(Popover::Volume);
        visibility.open_popover(Popover::Speed);

        for popover in Popover::ALL {
            assert_eq!(visibility.is_open(popover), popover == Popover::Speed);
        }
    }

    #[test]
    fn leaving_another_popover_keeps_the_open_one() {
        let mut visibility = controller(true);
        visibility.open_popover(Popover::Quality);

        visibility.close_popover(Popover::Volume);
        assert!(visibility.is_open(Popover::Quality));

        visibility.close_popover(Popover::Quality);
        assert_eq!(visibility.state().popover, None);
    }

    #[test]
    fn source_reset_closes_playlist_but_not_volume() {
        let mut visibility = controller(true);
        visibility.open_popover(Popover::Playlist);
        visibility.reset_for_source();
        assert_eq!(visibility.state().popover, None);

        visibility.open_popover(Popover::Volume);
        visibility.reset_for_source();
        assert!(visibility.is_open(Popover::Volume));
    }

    #[test]
    fn time_update_clears_standby() {
        let mut visibility = controller(true);
        visibility.on_fullscreen_entered();
        assert!(visibility.state().standby_visible);
        visibility.on_time_update();
        assert!(!visibility.state().standby_visible);
    }
}
