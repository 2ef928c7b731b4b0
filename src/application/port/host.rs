// SPDX-License-Identifier: MPL-2.0
//! Host application callbacks.
//!
//! Every callback is fire-and-forget; nothing is read back. All methods
//! default to no-ops so a host implements only what it listens to.

use crate::domain::ItemId;

pub trait PlayerHost {
    /// The media became playable.
    fn on_can_play(&mut self) {}

    /// The playback position advanced.
    fn on_time_update(&mut self, _current_time: f64) {}

    /// Playback finished (not fired for a soft loop-back).
    fn on_ended(&mut self) {}

    /// The source failed to load or decode.
    fn on_error_video(&mut self) {}

    /// The "next" control was clicked.
    fn on_next_click(&mut self) {}

    /// A playlist entry was clicked.
    fn on_click_item_list_reproduction(&mut self, _id: &ItemId, _was_playing: bool) {}

    /// A quality was chosen; switching streams is up to the host.
    fn on_change_quality(&mut self, _id: &ItemId) {}

    /// The close cross on the loading/error overlay was clicked.
    fn on_cross_click(&mut self) {}

    /// The back button was clicked.
    fn on_back_button(&mut self) {}
}

/// Host that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

impl PlayerHost for NoopHost {}
