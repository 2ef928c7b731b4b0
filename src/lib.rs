// SPDX-License-Identifier: MPL-2.0
//! `scrub_player` is the headless core of an embeddable video control surface.
//!
//! It reconciles media element events into playback state, drives the
//! auto-hiding controls and popovers, implements seek and transport intents,
//! and serves cached scrub-preview thumbnails. Rendering, decoding and the
//! platform APIs stay behind the ports in [`application::port`].

#![doc(html_root_url = "https://docs.rs/scrub_player/0.1.0")]

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod player;

#[cfg(test)]
mod test_utils;

pub use error::{Error, Result};
pub use player::{Player, PlayerMessage, PlayerPorts};
