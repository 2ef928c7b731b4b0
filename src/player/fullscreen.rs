// SPDX-License-Identifier: MPL-2.0
//! Bridge to the platform fullscreen API.
//!
//! Explicit requests update `fullscreen` optimistically; the platform's
//! change notification re-derives it, so a request that silently failed is
//! corrected on the next notification.

use crate::application::port::FullscreenPort;
use crate::domain::PlaybackState;

pub struct FullscreenBridge {
    port: Option<Box<dyn FullscreenPort>>,
}

impl std::fmt::Debug for FullscreenBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenBridge")
            .field("supported", &self.is_supported())
            .finish()
    }
}

impl FullscreenBridge {
    #[must_use]
    pub fn new(port: Option<Box<dyn FullscreenPort>>) -> Self {
        Self { port }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.port.as_ref().is_some_and(|port| port.is_supported())
    }

    /// Requests fullscreen. Returns true if the platform accepted.
    pub fn enter(&mut self, state: &mut PlaybackState) -> bool {
        let Some(port) = self.port.as_deref_mut().filter(|port| port.is_supported()) else {
            return false;
        };
        match port.request() {
            Ok(()) => {
                state.fullscreen = true;
                true
            }
            Err(err) => {
                log::debug!("fullscreen request refused: {}", err);
                false
            }
        }
    }

    /// Leaves fullscreen. Returns true if the platform accepted.
    pub fn exit(&mut self, state: &mut PlaybackState) -> bool {
        let Some(port) = self.port.as_deref_mut().filter(|port| port.is_supported()) else {
            return false;
        };
        match port.exit() {
            Ok(()) => {
                state.fullscreen = false;
                true
            }
            Err(err) => {
                log::debug!("fullscreen exit refused: {}", err);
                false
            }
        }
    }

    /// Enters or exits depending on what the platform reports, so a stale
    /// optimistic flag never picks the wrong direction. Returns true if the
    /// player asked to enter and the platform accepted.
    pub fn toggle(&mut self, state: &mut PlaybackState) -> bool {
        let fullscreen = self
            .port
            .as_deref()
            .map_or(state.fullscreen, |port| port.is_fullscreen());
        if fullscreen {
            self.exit(state);
            false
        } else {
            self.enter(state)
        }
    }

    /// The platform reported a fullscreen change.
    pub fn on_change(&self, state: &mut PlaybackState) {
        if let Some(port) = self.port.as_deref() {
            state.fullscreen = port.is_fullscreen();
        }
    }
}
