// SPDX-License-Identifier: MPL-2.0
//! Clock-style time labels.

/// Formats seconds as `M:SS`, or `H:MM:SS` from one hour on.
///
/// Fractions are truncated; negative or non-finite input reads as zero.
///
/// # Examples
///
/// ```
/// use scrub_player::player::format_hms;
///
/// assert_eq!(format_hms(65.0), "1:05");
/// assert_eq!(format_hms(3725.4), "1:02:05");
/// ```
#[must_use]
pub fn format_hms(seconds: f64) -> String {
    // Allow cast_possible_truncation/sign_loss: clamped to a finite non-negative value first.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let total_secs = if seconds.is_finite() {
        seconds.max(0.0) as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
