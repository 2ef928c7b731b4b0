// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`tokio_scheduler`]: Real timers on a tokio runtime (implements [`Scheduler`])
//! - [`manual_scheduler`]: Virtual clock for deterministic hosts and tests
//! - [`simulated`]: Scripted in-memory media, capture, fullscreen and host
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Simulated ports are cheap `Clone` handles over shared state, so a test
//!   keeps one handle while the player owns another
//!
//! [`Scheduler`]: crate::application::port::Scheduler

pub mod manual_scheduler;
pub mod simulated;
pub mod tokio_scheduler;

pub use manual_scheduler::{ManualClock, ManualScheduler};
pub use simulated::{
    HostCall, RecordingHost, SimulatedCapture, SimulatedFullscreen, SimulatedMedia,
};
pub use tokio_scheduler::TokioScheduler;
