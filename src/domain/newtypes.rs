// SPDX-License-Identifier: MPL-2.0
//! Playback newtypes.
//!
//! This module provides type-safe wrappers for playback values,
//! ensuring they are always within valid ranges.

use crate::config::{
    DEFAULT_BUFFERING_GRACE_MS, DEFAULT_CONTROLS_HIDE_MS, DEFAULT_MAX_IN_FLIGHT_CAPTURES,
    DEFAULT_PLAYBACK_RATE, DEFAULT_PREWARM_STRIDE_SECS, DEFAULT_VOLUME, MAX_BUFFERING_GRACE_MS,
    MAX_CONTROLS_HIDE_MS, MAX_IN_FLIGHT_CAPTURES, MAX_PLAYBACK_RATE, MAX_PREWARM_STRIDE_SECS,
    MAX_VOLUME, MIN_BUFFERING_GRACE_MS, MIN_CONTROLS_HIDE_MS, MIN_IN_FLIGHT_CAPTURES,
    MIN_PLAYBACK_RATE, MIN_PREWARM_STRIDE_SECS,
};
use std::time::Duration;

// =============================================================================
// Volume
// =============================================================================

/// Volume level in percent, guaranteed to be within 0–100.
///
/// Muting is tracked separately, so the stored level survives a
/// mute/unmute cycle.
///
/// # Example
///
/// ```
/// use scrub_player::domain::Volume;
///
/// let vol = Volume::new(45);
/// assert_eq!(vol.value(), 45);
///
/// // Values outside range are clamped
/// assert_eq!(Volume::new(250).value(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    /// Creates a new volume level, clamping to valid range.
    // Clamped to MAX_VOLUME, so the narrowing cast cannot truncate.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn new(percent: u32) -> Self {
        Self(percent.min(u32::from(MAX_VOLUME)) as u8)
    }

    /// Returns the level in percent.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the level as a linear gain (0.0–1.0) for the media element.
    #[must_use]
    pub fn as_gain(self) -> f64 {
        f64::from(self.0) / f64::from(MAX_VOLUME)
    }

    /// Returns true if the level is zero.
    #[must_use]
    pub fn is_silent(self) -> bool {
        self.0 == 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(DEFAULT_VOLUME)
    }
}

// =============================================================================
// PlaybackRate
// =============================================================================

/// Playback rate multiplier, clamped to what media elements accept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackRate(f64);

impl PlaybackRate {
    /// Creates a new playback rate, clamping to valid range.
    ///
    /// Non-finite input falls back to normal speed.
    #[must_use]
    pub fn new(rate: f64) -> Self {
        if !rate.is_finite() {
            return Self::default();
        }
        Self(rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE))
    }

    /// Returns the multiplier.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Returns true for 1.0x.
    #[must_use]
    pub fn is_normal(self) -> bool {
        (self.0 - 1.0).abs() < 1e-9
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self(DEFAULT_PLAYBACK_RATE)
    }
}

// =============================================================================
// PreviewKey
// =============================================================================

/// Cache key of a scrub preview: the requested time rounded down to a whole
/// second.
///
/// Negative and non-finite times normalize to second zero.
///
/// # Example
///
/// ```
/// use scrub_player::domain::PreviewKey;
///
/// assert_eq!(PreviewKey::from_secs(12.97).value(), 12);
/// assert_eq!(PreviewKey::from_secs(-3.0).value(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewKey(u32);

impl PreviewKey {
    /// Builds the key for a time in seconds.
    // floor() then saturating float-to-int cast
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_secs(time_secs: f64) -> Self {
        if !time_secs.is_finite() || time_secs <= 0.0 {
            return Self(0);
        }
        Self(time_secs.floor() as u32)
    }

    /// Builds the key for a whole second.
    #[must_use]
    pub fn from_whole_secs(secs: u32) -> Self {
        Self(secs)
    }

    /// Returns the whole second.
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// Returns the key as a time in seconds.
    #[must_use]
    pub fn as_secs(self) -> f64 {
        f64::from(self.0)
    }
}

// =============================================================================
// AutoHideDelay
// =============================================================================

/// Delay before the control bar auto-hides, clamped to 0.5–30 seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoHideDelay(u64);

impl AutoHideDelay {
    /// Creates a new delay in milliseconds, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_CONTROLS_HIDE_MS, MAX_CONTROLS_HIDE_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the delay as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for AutoHideDelay {
    fn default() -> Self {
        Self(DEFAULT_CONTROLS_HIDE_MS)
    }
}

// =============================================================================
// BufferingGrace
// =============================================================================

/// Window without a time update after which playback is presumed stalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferingGrace(u64);

impl BufferingGrace {
    /// Creates a new grace window in milliseconds, clamping to valid range.
    #[must_use]
    pub fn new(millis: u64) -> Self {
        Self(millis.clamp(MIN_BUFFERING_GRACE_MS, MAX_BUFFERING_GRACE_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the window as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for BufferingGrace {
    fn default() -> Self {
        Self(DEFAULT_BUFFERING_GRACE_MS)
    }
}

// =============================================================================
// PrewarmStride
// =============================================================================

/// Spacing of the background pre-warm sweep in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrewarmStride(u32);

impl PrewarmStride {
    #[must_use]
    pub fn new(secs: u32) -> Self {
        Self(secs.clamp(MIN_PREWARM_STRIDE_SECS, MAX_PREWARM_STRIDE_SECS))
    }

    #[must_use]
    pub fn secs(self) -> u32 {
        self.0
    }
}

impl Default for PrewarmStride {
    fn default() -> Self {
        Self(DEFAULT_PREWARM_STRIDE_SECS)
    }
}

// =============================================================================
// CaptureConcurrency
// =============================================================================

/// Upper bound on seeks outstanding on the capture instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureConcurrency(usize);

impl CaptureConcurrency {
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(MIN_IN_FLIGHT_CAPTURES, MAX_IN_FLIGHT_CAPTURES))
    }

    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for CaptureConcurrency {
    fn default() -> Self {
        Self(DEFAULT_MAX_IN_FLIGHT_CAPTURES)
    }
}
