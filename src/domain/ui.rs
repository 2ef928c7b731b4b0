// SPDX-License-Identifier: MPL-2.0
//! Presentation-facing enums the core emits.

use super::newtypes::Volume;
use crate::config::{VOLUME_HIGH_THRESHOLD, VOLUME_LOW_THRESHOLD};

/// Hover popovers attached to the control bar.
///
/// Each has its own disjoint hover target; at most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Popover {
    Volume,
    Quality,
    Speed,
    NextUp,
    Playlist,
}

impl Popover {
    pub const ALL: [Popover; 5] = [
        Popover::Volume,
        Popover::Quality,
        Popover::Speed,
        Popover::NextUp,
        Popover::Playlist,
    ];
}

/// Which volume glyph the control bar shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    High,
    Low,
    Off,
    Muted,
}

impl VolumeIcon {
    /// Icon for a level alone, ignoring the mute flag.
    #[must_use]
    pub fn for_level(volume: Volume) -> Self {
        match volume.value() {
            v if v >= VOLUME_HIGH_THRESHOLD => VolumeIcon::High,
            v if v >= VOLUME_LOW_THRESHOLD => VolumeIcon::Low,
            0 => VolumeIcon::Muted,
            _ => VolumeIcon::Off,
        }
    }

    /// Icon for the combined state: muting always wins.
    #[must_use]
    pub fn for_state(volume: Volume, muted: bool) -> Self {
        if muted {
            VolumeIcon::Muted
        } else {
            Self::for_level(volume)
        }
    }
}
