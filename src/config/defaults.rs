// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the player core. Constants are organized by category.
//!
//! # Categories
//!
//! - **Visibility**: Control bar auto-hide delay
//! - **Buffering**: Stall detection grace window
//! - **Transport**: Skip step, end-of-media guards, loop-back rewind
//! - **Volume**: Level bounds and icon thresholds
//! - **Preview**: Thumbnail surface and capture scheduling

// ==========================================================================
// Visibility Defaults
// ==========================================================================

/// Default delay before the control bar hides after pointer activity (ms).
pub const DEFAULT_CONTROLS_HIDE_MS: u64 = 3_000;

/// Minimum control bar auto-hide delay (ms).
pub const MIN_CONTROLS_HIDE_MS: u64 = 500;

/// Maximum control bar auto-hide delay (ms).
pub const MAX_CONTROLS_HIDE_MS: u64 = 30_000;

// ==========================================================================
// Buffering Defaults
// ==========================================================================

/// Default time without a time-update before playback counts as stalled (ms).
pub const DEFAULT_BUFFERING_GRACE_MS: u64 = 1_000;

/// Minimum buffering grace window (ms).
pub const MIN_BUFFERING_GRACE_MS: u64 = 250;

/// Maximum buffering grace window (ms).
pub const MAX_BUFFERING_GRACE_MS: u64 = 10_000;

// ==========================================================================
// Transport Defaults
// ==========================================================================

/// Seconds skipped by the rewind / fast-forward buttons.
pub const DEFAULT_SKIP_SECS: f64 = 5.0;

/// A forward skip landing within this many seconds of the end is clamped.
pub const FORWARD_SKIP_GUARD_SECS: f64 = 2.0;

/// Distance from the end that a clamped forward skip lands on.
pub const FORWARD_SKIP_CLAMP_SECS: f64 = 1.0;

/// How far before the end a soft loop rewinds.
pub const LOOP_BACK_REWIND_SECS: f64 = 30.0;

/// Tolerance when comparing the configured start position with the duration.
pub const START_AT_END_TOLERANCE_SECS: f64 = 1e-3;

/// Playback rate applied when the element is attached.
pub const DEFAULT_PLAYBACK_RATE: f64 = 1.0;

/// Minimum accepted playback rate multiplier.
pub const MIN_PLAYBACK_RATE: f64 = 0.0625;

/// Maximum accepted playback rate multiplier.
pub const MAX_PLAYBACK_RATE: f64 = 16.0;

/// Rate labels offered when none are configured.
pub const DEFAULT_PLAYBACK_RATE_OPTIONS: [&str; 7] =
    ["0.25", "0.5", "0.75", "Normal", "1.25", "1.5", "2"];

/// Label of the sentinel option meaning 1.0x.
pub const NORMAL_RATE_LABEL: &str = "Normal";

// ==========================================================================
// Volume Defaults
// ==========================================================================

/// Default volume level (percent).
pub const DEFAULT_VOLUME: u8 = 100;

/// Maximum volume level (percent).
pub const MAX_VOLUME: u8 = 100;

/// Levels at or above this show the "high" icon.
pub const VOLUME_HIGH_THRESHOLD: u8 = 60;

/// Levels at or above this (and below high) show the "low" icon.
pub const VOLUME_LOW_THRESHOLD: u8 = 10;

// ==========================================================================
// Preview Defaults
// ==========================================================================

/// Width of the offscreen thumbnail surface in pixels.
pub const PREVIEW_WIDTH: u32 = 160;

/// Height of the offscreen thumbnail surface in pixels.
pub const PREVIEW_HEIGHT: u32 = 90;

/// Default stride of the background pre-warm sweep (seconds of media).
pub const DEFAULT_PREWARM_STRIDE_SECS: u32 = 10;

/// Minimum pre-warm stride (seconds).
pub const MIN_PREWARM_STRIDE_SECS: u32 = 1;

/// Maximum pre-warm stride (seconds).
pub const MAX_PREWARM_STRIDE_SECS: u32 = 600;

/// During playback, whole seconds divisible by this are captured opportunistically.
pub const PLAYBACK_CAPTURE_EVERY_SECS: u32 = 5;

/// Default number of seeks allowed in flight on the capture instance.
pub const DEFAULT_MAX_IN_FLIGHT_CAPTURES: usize = 4;

/// Minimum in-flight captures.
pub const MIN_IN_FLIGHT_CAPTURES: usize = 1;

/// Maximum in-flight captures.
pub const MAX_IN_FLIGHT_CAPTURES: usize = 32;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_CONTROLS_HIDE_MS > 0);
    assert!(DEFAULT_CONTROLS_HIDE_MS >= MIN_CONTROLS_HIDE_MS);
    assert!(DEFAULT_CONTROLS_HIDE_MS <= MAX_CONTROLS_HIDE_MS);

    assert!(MIN_BUFFERING_GRACE_MS > 0);
    assert!(DEFAULT_BUFFERING_GRACE_MS >= MIN_BUFFERING_GRACE_MS);
    assert!(DEFAULT_BUFFERING_GRACE_MS <= MAX_BUFFERING_GRACE_MS);

    assert!(FORWARD_SKIP_GUARD_SECS > FORWARD_SKIP_CLAMP_SECS);
    assert!(DEFAULT_SKIP_SECS > 0.0);
    assert!(LOOP_BACK_REWIND_SECS > 0.0);
    assert!(MIN_PLAYBACK_RATE > 0.0);
    assert!(DEFAULT_PLAYBACK_RATE >= MIN_PLAYBACK_RATE);
    assert!(DEFAULT_PLAYBACK_RATE <= MAX_PLAYBACK_RATE);

    assert!(DEFAULT_VOLUME <= MAX_VOLUME);
    assert!(VOLUME_LOW_THRESHOLD < VOLUME_HIGH_THRESHOLD);
    assert!(VOLUME_HIGH_THRESHOLD <= MAX_VOLUME);

    assert!(PREVIEW_WIDTH > 0 && PREVIEW_HEIGHT > 0);
    assert!(MIN_PREWARM_STRIDE_SECS > 0);
    assert!(DEFAULT_PREWARM_STRIDE_SECS >= MIN_PREWARM_STRIDE_SECS);
    assert!(DEFAULT_PREWARM_STRIDE_SECS <= MAX_PREWARM_STRIDE_SECS);
    assert!(PLAYBACK_CAPTURE_EVERY_SECS > 0);
    assert!(MIN_IN_FLIGHT_CAPTURES > 0);
    assert!(DEFAULT_MAX_IN_FLIGHT_CAPTURES >= MIN_IN_FLIGHT_CAPTURES);
    assert!(DEFAULT_MAX_IN_FLIGHT_CAPTURES <= MAX_IN_FLIGHT_CAPTURES);
};
