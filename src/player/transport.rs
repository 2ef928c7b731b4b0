// SPDX-License-Identifier: MPL-2.0
//! Seek and transport intents.
//!
//! Each intent drives the media element and updates [`PlaybackState`]
//! optimistically; the next time update or seek completion from the element
//! settles the real position.

use crate::application::port::MediaPort;
use crate::config::{FORWARD_SKIP_CLAMP_SECS, FORWARD_SKIP_GUARD_SECS};
use crate::domain::{PlaybackState, RateOption, Volume};
use crate::error::MediaError;

/// Direction of a relative skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDirection {
    Forward,
    Backward,
}

/// Seeks to `position_secs`, clamped to `[0, duration]`.
///
/// Unlike [`seek_relative`], an absolute seek may land on the very end: the
/// one-second forward guard applies to skips only.
pub fn seek_absolute(state: &mut PlaybackState, media: &mut dyn MediaPort, position_secs: f64) {
    if !position_secs.is_finite() {
        return;
    }
    let target = state.clamp_position(position_secs);
    media.seek(target);
    state.progress_secs = target;
}

/// Skips `delta_secs` from the current position.
///
/// Forward skips landing within [`FORWARD_SKIP_GUARD_SECS`] of the end stop
/// [`FORWARD_SKIP_CLAMP_SECS`] short of it, so the skip never races the
/// element's own `ended`. Backward skips stop at zero.
pub fn seek_relative(
    state: &mut PlaybackState,
    media: &mut dyn MediaPort,
    delta_secs: f64,
    direction: SkipDirection,
) {
    if !delta_secs.is_finite() {
        return;
    }
    let delta = delta_secs.abs();
    let current = state.progress_secs;
    let target = match direction {
        SkipDirection::Forward => {
            let duration = state.duration_secs;
            let target = current + delta;
            if state.ready && duration > 0.0 && target >= duration - FORWARD_SKIP_GUARD_SECS {
                (duration - FORWARD_SKIP_CLAMP_SECS).max(0.0)
            } else {
                target
            }
        }
        SkipDirection::Backward => (current - delta).max(0.0),
    };
    media.seek(target);
    state.progress_secs = target;
}

/// Applies a rate option; the "normal" sentinel means 1.0x.
pub fn set_playback_rate(state: &mut PlaybackState, media: &mut dyn MediaPort, option: RateOption) {
    let rate = option.rate();
    media.set_rate(rate.value());
    state.playback_rate = rate;
}

/// Sets the level without touching the mute flag.
pub fn set_volume(state: &mut PlaybackState, media: &mut dyn MediaPort, volume: Volume) {
    media.set_volume(volume.as_gain());
    state.volume = volume;
}

/// Mutes or unmutes without touching the stored level.
pub fn set_muted(state: &mut PlaybackState, media: &mut dyn MediaPort, muted: bool) {
    media.set_muted(muted);
    state.muted = muted;
}

/// Starts playback. Ignored while the source is in error.
///
/// # Errors
///
/// Returns the element's refusal; `playing` stays false in that case.
pub fn play(state: &mut PlaybackState, media: &mut dyn MediaPort) -> Result<(), MediaError> {
    if state.has_error() {
        return Ok(());
    }
    match media.play() {
        Ok(()) => {
            state.playing = !media.paused();
            state.ended = false;
            Ok(())
        }
        Err(err) => {
            state.playing = false;
            Err(err)
        }
    }
}

pub fn pause(state: &mut PlaybackState, media: &mut dyn MediaPort) {
    media.pause();
    state.playing = false;
    state.buffering = false;
}

/// Pauses when playing, plays otherwise.
///
/// # Errors
///
/// See [`play`].
pub fn toggle_play(state: &mut PlaybackState, media: &mut dyn MediaPort) -> Result<(), MediaError> {
    if state.playing {
        pause(state, media);
        Ok(())
    } else {
        play(state, media)
    }
}
