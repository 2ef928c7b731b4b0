// SPDX-License-Identifier: MPL-2.0
//! Platform fullscreen port.
//!
//! The platform's own change notification is the source of truth; request
//! results only drive optimistic updates.

use crate::error::FullscreenError;

pub trait FullscreenPort {
    /// Whether the platform exposes a fullscreen API at all.
    fn is_supported(&self) -> bool;

    /// Whether the player surface is currently fullscreen.
    fn is_fullscreen(&self) -> bool;

    /// Asks the platform to make the player surface fullscreen.
    ///
    /// # Errors
    ///
    /// Returns [`FullscreenError::Denied`] if the platform refuses synchronously.
    fn request(&mut self) -> Result<(), FullscreenError>;

    /// Leaves fullscreen.
    ///
    /// # Errors
    ///
    /// Returns a [`FullscreenError`] if the platform refuses.
    fn exit(&mut self) -> Result<(), FullscreenError>;
}
