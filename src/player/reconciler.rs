// SPDX-License-Identifier: MPL-2.0
//! Media event reconciler.
//!
//! Folds the asynchronous notifications of the primary media element into a
//! consistent [`PlaybackState`]. It is the single writer of that state; the
//! transport intents borrow it mutably through the player root only.
//!
//! Per-source policy lives here as well:
//!
//! - autoplay is applied on the first `ready` of a source only
//! - the soft loop-back on `ended` is applied at most once per source
//! - a stalled stream is detected by a buffering timer re-armed on every
//!   time update

use super::timer::SingleShotTimer;
use crate::application::port::{MediaPort, Scheduler, TimerKind, TimerToken};
use crate::config::{LOOP_BACK_REWIND_SECS, START_AT_END_TOLERANCE_SECS};
use crate::domain::{BufferingGrace, PlaybackState};
use crate::error::MediaError;

/// Host notification produced by a reconciled event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostNotice {
    CanPlay,
    TimeUpdate(f64),
    Error,
    Ended,
}

#[derive(Debug, Clone)]
pub struct Reconciler {
    state: PlaybackState,
    autoplay: bool,
    start_position: f64,
    autoplay_applied: bool,
    loop_back_applied: bool,
    buffering_timer: SingleShotTimer,
}

fn sanitize_secs(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

impl Reconciler {
    #[must_use]
    pub fn new(autoplay: bool, start_position: f64, grace: BufferingGrace) -> Self {
        let mut state = PlaybackState::default();
        state.reset_for_source(autoplay);
        Self {
            state,
            autoplay,
            start_position: sanitize_secs(start_position),
            autoplay_applied: false,
            loop_back_applied: false,
            buffering_timer: SingleShotTimer::new(TimerKind::BufferingDetect, grace.as_duration()),
        }
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut PlaybackState {
        &mut self.state
    }

    /// Takes effect on the next re-arm.
    pub fn set_buffering_grace(&mut self, grace: BufferingGrace) {
        self.buffering_timer.set_delay(grace.as_duration());
    }

    #[must_use]
    pub fn loop_back_applied(&self) -> bool {
        self.loop_back_applied
    }

    /// Starts a new load cycle.
    ///
    /// Clears per-source state and re-arms the once-per-source policies.
    /// Volume, mute, rate and fullscreen survive.
    pub fn reset_for_source(
        &mut self,
        autoplay: bool,
        start_position: f64,
        scheduler: &mut dyn Scheduler,
    ) {
        self.autoplay = autoplay;
        self.start_position = sanitize_secs(start_position);
        self.autoplay_applied = false;
        self.loop_back_applied = false;
        self.buffering_timer.cancel(scheduler);
        self.state.reset_for_source(autoplay);
        log::debug!(
            "source reset (autoplay: {}, start: {:.2}s)",
            autoplay,
            self.start_position
        );
    }

    /// The element knows its duration and can play.
    pub fn on_ready(&mut self, media: &mut dyn MediaPort) -> HostNotice {
        self.state.duration_secs = sanitize_secs(media.duration());
        self.state.ready = true;
        self.state.progress_secs = self.state.clamp_position(self.state.progress_secs);

        if !self.autoplay_applied {
            self.autoplay_applied = true;
            self.state.playing = false;
            if self.autoplay && !self.state.has_error() {
                match media.play() {
                    Ok(()) => self.state.playing = !media.paused(),
                    Err(err) => log::warn!("autoplay rejected: {}", err),
                }
            }
        }

        log::debug!(
            "media ready (duration: {:.2}s, playing: {})",
            self.state.duration_secs,
            self.state.playing
        );
        HostNotice::CanPlay
    }

    /// The playback position advanced (or moved backwards; last write wins).
    pub fn on_time_update(
        &mut self,
        current_time: f64,
        scheduler: &mut dyn Scheduler,
    ) -> Option<HostNotice> {
        if !current_time.is_finite() {
            return None;
        }
        self.state.ended = false;
        self.state.buffering = false;
        self.buffering_timer.arm(scheduler);
        self.state.progress_secs = self.state.clamp_position(current_time);
        Some(HostNotice::TimeUpdate(current_time))
    }

    /// The element settled a seek; its clock is authoritative.
    pub fn on_seek_completed(&mut self, media: &dyn MediaPort) {
        let position = media.current_time();
        if position.is_finite() {
            self.state.progress_secs = self.state.clamp_position(position);
        }
    }

    /// The element failed. Terminal until the source changes.
    pub fn on_error(
        &mut self,
        error: &MediaError,
        message: String,
        scheduler: &mut dyn Scheduler,
    ) -> HostNotice {
        log::warn!("media error: {}", error);
        self.state.error = Some(message);
        self.state.playing = false;
        self.state.buffering = false;
        self.buffering_timer.cancel(scheduler);
        HostNotice::Error
    }

    /// Playback reached the end.
    ///
    /// A source configured to start at its very end rewinds
    /// [`LOOP_BACK_REWIND_SECS`] instead, once per load. Otherwise the
    /// ended notice is produced on the transition into `ended` only.
    pub fn on_ended(
        &mut self,
        media: &mut dyn MediaPort,
        scheduler: &mut dyn Scheduler,
    ) -> Option<HostNotice> {
        let duration = self.state.duration_secs;
        let starts_at_end =
            duration > 0.0 && (self.start_position - duration).abs() <= START_AT_END_TOLERANCE_SECS;

        if starts_at_end && !self.loop_back_applied {
            self.loop_back_applied = true;
            let target = (duration - LOOP_BACK_REWIND_SECS).max(0.0);
            media.seek(target);
            self.state.progress_secs = target;
            self.state.ended = false;
            self.state.playing = false;
            if self.autoplay && !self.state.has_error() {
                match media.play() {
                    Ok(()) => self.state.playing = !media.paused(),
                    Err(err) => log::warn!("resume after loop-back rejected: {}", err),
                }
            }
            log::debug!("loop-back to {:.2}s", target);
            return None;
        }

        let was_ended = self.state.ended;
        self.state.ended = true;
        self.state.playing = false;
        self.state.buffering = false;
        self.buffering_timer.cancel(scheduler);
        if was_ended {
            None
        } else {
            log::debug!("playback ended");
            Some(HostNotice::Ended)
        }
    }

    /// The buffering-detect timer fired.
    ///
    /// Returns true if the player is now considered stalled.
    pub fn on_buffering_timer(&mut self, token: TimerToken) -> bool {
        if !self.buffering_timer.on_fired(token) {
            return false;
        }
        if self.state.playing && !self.state.has_error() && !self.state.ended {
            self.state.buffering = true;
            log::debug!("no time update within grace window, buffering");
            true
        } else {
            false
        }
    }

    /// Releases the buffering timer.
    pub fn teardown(&mut self, scheduler: &mut dyn Scheduler) {
        self.buffering_timer.cancel(scheduler);
    }
}
