// SPDX-License-Identifier: MPL-2.0
//! Primary media element port.
//!
//! This module defines the [`MediaPort`] trait that wraps the native,
//! playable media element, and the [`MediaEvent`] notifications it emits.
//!
//! # Design Notes
//!
//! - Methods are synchronous requests; the element answers later through
//!   [`MediaEvent`]s that the host dispatches to the player
//! - The element clamps seek targets natively
//! - Volume is passed as a linear gain (0.0–1.0)

use crate::error::MediaError;

// =============================================================================
// MediaEvent
// =============================================================================

/// Notifications from the primary media element.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Enough data is available to start playback ("can play").
    Ready,
    /// The playback position advanced (or jumped).
    TimeUpdate { current_time: f64 },
    /// A seek finished and the element settled on a new position.
    SeekCompleted,
    /// The element reported a decode or network fault.
    Error(MediaError),
    /// Playback reached the end of the media.
    Ended,
}

// =============================================================================
// MediaPort Trait
// =============================================================================

/// Port for the playable media element.
///
/// # Lifecycle
///
/// 1. The player calls `load()` with the configured source
/// 2. The element emits `Ready` once playable
/// 3. `TimeUpdate` events flow while playing; `Ended` or `Error` terminate
pub trait MediaPort {
    /// Points the element at a new source. Loading is asynchronous.
    fn load(&mut self, src: &str);

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Duration in seconds (0 or NaN while unknown).
    fn duration(&self) -> f64;

    /// Whether the element is paused.
    fn paused(&self) -> bool;

    /// Requests playback.
    ///
    /// # Errors
    ///
    /// Returns a [`MediaError`] if the element rejects the request
    /// (for example because of an autoplay policy).
    fn play(&mut self) -> Result<(), MediaError>;

    /// Pauses playback.
    fn pause(&mut self);

    /// Moves the playback position.
    fn seek(&mut self, position_secs: f64);

    /// Sets the output gain (0.0–1.0).
    fn set_volume(&mut self, gain: f64);

    /// Mutes or unmutes output without touching the gain.
    fn set_muted(&mut self, muted: bool);

    /// Sets the playback rate multiplier.
    fn set_rate(&mut self, rate: f64);
}
