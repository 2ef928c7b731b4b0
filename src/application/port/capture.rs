// SPDX-License-Identifier: MPL-2.0
//! Hidden capture instance port.
//!
//! A second, muted, headless decodable-media instance used only to grab
//! frames for scrub previews. It is owned exclusively by the preview cache
//! and never exposed to transport operations.

use crate::error::CaptureError;
use image_rs::RgbaImage;

/// Correlates a seek on the capture instance with its completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaptureRequestId(u64);

impl CaptureRequestId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Notifications from the capture instance.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureEvent {
    /// The seek for `request` completed; the current frame is drawable.
    SeekCompleted { request: CaptureRequestId },
    /// The seek for `request` failed.
    SeekFailed {
        request: CaptureRequestId,
        error: CaptureError,
    },
}

/// Port for the capture instance.
///
/// Completions may arrive in any order.
pub trait CapturePort {
    /// Points the instance at a new source.
    fn load(&mut self, src: &str);

    /// Starts an asynchronous seek; completion arrives as a [`CaptureEvent`].
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`] if the seek cannot even be issued.
    fn seek(&mut self, request: CaptureRequestId, time_secs: f64) -> Result<(), CaptureError>;

    /// Draws the current frame at native resolution.
    ///
    /// # Errors
    ///
    /// Returns a [`CaptureError`] if no frame is decodable.
    fn current_frame(&mut self) -> Result<RgbaImage, CaptureError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn CapturePort) {}

    #[test]
    fn request_ids_order_by_value() {
        assert!(CaptureRequestId::new(1) < CaptureRequestId::new(2));
        assert_eq!(CaptureRequestId::new(9).value(), 9);
    }
}
