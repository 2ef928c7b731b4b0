// SPDX-License-Identifier: MPL-2.0
//! Playback state snapshot.
//!
//! The reconciler is the only writer; everything else reads it and asks for
//! changes through intents.

use super::newtypes::{PlaybackRate, Volume};

/// Derived playback state of the primary media element.
///
/// Invariants (maintained by the reconciler):
/// - once `ready`, `0 <= progress_secs <= duration_secs`
/// - `error.is_some()` implies `!playing`
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub ready: bool,
    pub playing: bool,
    pub progress_secs: f64,
    pub duration_secs: f64,
    pub volume: Volume,
    pub muted: bool,
    pub playback_rate: PlaybackRate,
    pub ended: bool,
    /// Localized message shown over the player.
    pub error: Option<String>,
    pub buffering: bool,
    pub fullscreen: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            ready: false,
            playing: false,
            progress_secs: 0.0,
            duration_secs: 0.0,
            volume: Volume::default(),
            muted: false,
            playback_rate: PlaybackRate::default(),
            ended: false,
            error: None,
            buffering: false,
            fullscreen: false,
        }
    }
}

impl PlaybackState {
    /// Resets the per-source fields, keeping user preferences
    /// (volume, mute, rate) and the fullscreen flag.
    pub fn reset_for_source(&mut self, autoplay: bool) {
        self.ready = false;
        self.playing = autoplay;
        self.progress_secs = 0.0;
        self.duration_secs = 0.0;
        self.ended = false;
        self.error = None;
        self.buffering = false;
    }

    /// Returns true if the source failed.
    #[must_use]
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Remaining time in seconds, never negative.
    #[must_use]
    pub fn remaining_secs(&self) -> f64 {
        (self.duration_secs - self.progress_secs).max(0.0)
    }

    /// Progress as a percentage of duration (0 when unknown).
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.duration_secs > 0.0 {
            (self.progress_secs * 100.0 / self.duration_secs).clamp(0.0, 100.0)
        } else {
            0.0
        }
    }

    /// Clamps a position to the known timeline.
    ///
    /// Before `ready` the duration is unknown, so only the lower bound applies.
    #[must_use]
    pub fn clamp_position(&self, position_secs: f64) -> f64 {
        let lower = position_secs.max(0.0);
        if self.ready && self.duration_secs > 0.0 {
            lower.min(self.duration_secs)
        } else {
            lower
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;

    #[test]
    fn default_is_not_ready_and_paused() {
        let state = PlaybackState::default();
        assert!(!state.ready);
        assert!(!state.playing);
        assert_eq!(state.volume.value(), 100);
    }

    #[test]
    fn reset_keeps_preferences() {
        let mut state = PlaybackState {
            ready: true,
            progress_secs: 40.0,
            duration_secs: 100.0,
            volume: Volume::new(30),
            muted: true,
            error: Some("boom".into()),
            ..PlaybackState::default()
        };
        state.reset_for_source(true);
        assert!(!state.ready);
        assert!(state.playing);
        assert!(state.error.is_none());
        assert_abs_diff_eq!(state.progress_secs, 0.0);
        assert_eq!(state.volume.value(), 30);
        assert!(state.muted);
    }

    #[test]
    fn clamp_position_respects_duration_once_ready() {
        let mut state = PlaybackState::default();
        assert_abs_diff_eq!(state.clamp_position(500.0), 500.0);
        assert_abs_diff_eq!(state.clamp_position(-2.0), 0.0);
        state.ready = true;
        state.duration_secs = 120.0;
        assert_abs_diff_eq!(state.clamp_position(500.0), 120.0);
    }

    #[test]
    fn remaining_and_percent() {
        let state = PlaybackState {
            ready: true,
            progress_secs: 30.0,
            duration_secs: 120.0,
            ..PlaybackState::default()
        };
        assert_abs_diff_eq!(state.remaining_secs(), 90.0);
        assert_abs_diff_eq!(state.progress_percent(), 25.0);
        assert_abs_diff_eq!(PlaybackState::default().progress_percent(), 0.0);
    }
}
