// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that the host platform (or the
//! adapters in [`crate::infrastructure`]) implement. The player core depends
//! only on these traits, which keeps it deterministic under test.
//!
//! # Available Ports
//!
//! - [`media`]: The primary playable media element
//! - [`capture`]: The hidden instance used for preview frames
//! - [`fullscreen`]: Platform fullscreen API
//! - [`scheduler`]: Single-shot timers
//! - [`host`]: Output callbacks to the embedding application
//!
//! # Design Notes
//!
//! - Single-threaded and event-driven: no trait requires `Send`
//! - Requests are synchronous; answers come back as events the host
//!   dispatches to [`crate::player::Player::update`]
//! - No `async fn`

pub mod capture;
pub mod fullscreen;
pub mod host;
pub mod media;
pub mod scheduler;

pub use capture::{CaptureEvent, CapturePort, CaptureRequestId};
pub use fullscreen::FullscreenPort;
pub use host::{NoopHost, PlayerHost};
pub use media::{MediaEvent, MediaPort};
pub use scheduler::{Scheduler, TimerFired, TimerKind, TimerToken};
