// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value types and invariants of the player core.
//!
//! # Modules
//!
//! - [`newtypes`]: Bounded values ([`Volume`], [`PlaybackRate`], [`PreviewKey`],
//!   [`AutoHideDelay`], [`BufferingGrace`])
//! - [`playback`]: The derived [`PlaybackState`] snapshot
//! - [`catalog`]: Host catalog entries ([`Quality`], [`PlaylistItem`], [`NextUp`],
//!   [`RateOption`])
//! - [`ui`]: Presentation enums ([`Popover`], [`VolumeIcon`])

pub mod catalog;
pub mod newtypes;
pub mod playback;
pub mod ui;

pub use catalog::{ItemId, NextUp, PlaylistItem, Quality, RateOption};
pub use newtypes::{
    AutoHideDelay, BufferingGrace, CaptureConcurrency, PlaybackRate, PrewarmStride, PreviewKey,
    Volume,
};
pub use playback::PlaybackState;
pub use ui::{Popover, VolumeIcon};
