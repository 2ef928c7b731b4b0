// SPDX-License-Identifier: MPL-2.0
//! Scripted in-memory ports.
//!
//! These stand in for the platform when there is none: the demo binary and
//! the test suites drive a [`crate::player::Player`] with them. Every type is
//! a cheap `Clone` handle over shared state, so the caller keeps a handle to
//! script events and inspect calls while the player owns another.

use crate::application::port::{
    CaptureEvent, CapturePort, CaptureRequestId, FullscreenPort, MediaEvent, MediaPort,
    PlayerHost,
};
use crate::domain::ItemId;
use crate::error::{CaptureError, FullscreenError, MediaError};
use image_rs::{Rgba, RgbaImage};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// =============================================================================
// SimulatedMedia
// =============================================================================

#[derive(Debug)]
struct MediaInner {
    src: Option<String>,
    duration: f64,
    current_time: f64,
    paused: bool,
    gain: f64,
    muted: bool,
    rate: f64,
    reject_play: Option<MediaError>,
    seeks: Vec<f64>,
    play_calls: usize,
}

/// Media element with a scripted clock.
#[derive(Debug, Clone)]
pub struct SimulatedMedia {
    inner: Rc<RefCell<MediaInner>>,
}

impl SimulatedMedia {
    /// A paused element whose sources all last `duration_secs`.
    #[must_use]
    pub fn new(duration_secs: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MediaInner {
                src: None,
                duration: duration_secs,
                current_time: 0.0,
                paused: true,
                gain: 1.0,
                muted: false,
                rate: 1.0,
                reject_play: None,
                seeks: Vec::new(),
                play_calls: 0,
            })),
        }
    }

    pub fn set_duration(&self, duration_secs: f64) {
        self.inner.borrow_mut().duration = duration_secs;
    }

    /// Makes every `play()` fail with `error` until cleared with `None`.
    pub fn reject_play(&self, error: Option<MediaError>) {
        self.inner.borrow_mut().reject_play = error;
    }

    /// Plays `elapsed_secs` of media at the current rate.
    ///
    /// Returns the time update the element would emit, or `Ended` once the
    /// end is reached. Returns `None` while paused.
    pub fn tick(&self, elapsed_secs: f64) -> Option<MediaEvent> {
        let mut inner = self.inner.borrow_mut();
        if inner.paused {
            return None;
        }
        let next = inner.current_time + elapsed_secs * inner.rate;
        if next >= inner.duration {
            inner.current_time = inner.duration;
            inner.paused = true;
            Some(MediaEvent::Ended)
        } else {
            inner.current_time = next;
            Some(MediaEvent::TimeUpdate { current_time: next })
        }
    }

    #[must_use]
    pub fn src(&self) -> Option<String> {
        self.inner.borrow().src.clone()
    }

    /// Every position the player asked to seek to, in order.
    #[must_use]
    pub fn seeks(&self) -> Vec<f64> {
        self.inner.borrow().seeks.clone()
    }

    #[must_use]
    pub fn play_calls(&self) -> usize {
        self.inner.borrow().play_calls
    }

    #[must_use]
    pub fn rate(&self) -> f64 {
        self.inner.borrow().rate
    }

    #[must_use]
    pub fn gain(&self) -> f64 {
        self.inner.borrow().gain
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.inner.borrow().muted
    }
}

impl MediaPort for SimulatedMedia {
    fn load(&mut self, src: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.src = Some(src.to_string());
        inner.current_time = 0.0;
        inner.paused = true;
    }

    fn current_time(&self) -> f64 {
        self.inner.borrow().current_time
    }

    fn duration(&self) -> f64 {
        self.inner.borrow().duration
    }

    fn paused(&self) -> bool {
        self.inner.borrow().paused
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut inner = self.inner.borrow_mut();
        inner.play_calls += 1;
        if let Some(err) = inner.reject_play.clone() {
            return Err(err);
        }
        inner.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.inner.borrow_mut().paused = true;
    }

    fn seek(&mut self, position_secs: f64) {
        let mut inner = self.inner.borrow_mut();
        inner.seeks.push(position_secs);
        inner.current_time = position_secs.clamp(0.0, inner.duration.max(0.0));
    }

    fn set_volume(&mut self, gain: f64) {
        self.inner.borrow_mut().gain = gain;
    }

    fn set_muted(&mut self, muted: bool) {
        self.inner.borrow_mut().muted = muted;
    }

    fn set_rate(&mut self, rate: f64) {
        self.inner.borrow_mut().rate = rate;
    }
}

// =============================================================================
// SimulatedCapture
// =============================================================================

const SIMULATED_FRAME_WIDTH: u32 = 320;
const SIMULATED_FRAME_HEIGHT: u32 = 180;

#[derive(Debug, Default)]
struct CaptureInner {
    src: Option<String>,
    pending: VecDeque<(CaptureRequestId, f64)>,
    position: f64,
    seek_count: usize,
    fail_draws: bool,
}

/// Capture instance whose seeks complete only when the script says so.
///
/// Frames are solid; the red channel holds the whole second modulo 256.
#[derive(Debug, Clone, Default)]
pub struct SimulatedCapture {
    inner: Rc<RefCell<CaptureInner>>,
}

impl SimulatedCapture {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes frame drawing fail.
    pub fn fail_draws(&self, fail: bool) {
        self.inner.borrow_mut().fail_draws = fail;
    }

    #[must_use]
    pub fn src(&self) -> Option<String> {
        self.inner.borrow().src.clone()
    }

    /// Seeks issued since creation.
    #[must_use]
    pub fn seek_count(&self) -> usize {
        self.inner.borrow().seek_count
    }

    /// Outstanding seeks, oldest first.
    #[must_use]
    pub fn pending_requests(&self) -> Vec<(CaptureRequestId, f64)> {
        self.inner.borrow().pending.iter().copied().collect()
    }

    /// Settles the seek for `request`.
    pub fn complete(&self, request: CaptureRequestId) -> Option<CaptureEvent> {
        let mut inner = self.inner.borrow_mut();
        let index = inner.pending.iter().position(|(id, _)| *id == request)?;
        let (request, time_secs) = inner.pending.remove(index)?;
        inner.position = time_secs;
        Some(CaptureEvent::SeekCompleted { request })
    }

    /// Fails the seek for `request`.
    pub fn fail(&self, request: CaptureRequestId) -> Option<CaptureEvent> {
        let mut inner = self.inner.borrow_mut();
        let index = inner.pending.iter().position(|(id, _)| *id == request)?;
        let (request, _) = inner.pending.remove(index)?;
        Some(CaptureEvent::SeekFailed {
            request,
            error: CaptureError::Seek("simulated failure".into()),
        })
    }

    /// Settles the oldest outstanding seek.
    pub fn complete_next(&self) -> Option<CaptureEvent> {
        let request = self.inner.borrow().pending.front().map(|(id, _)| *id)?;
        self.complete(request)
    }

    /// Settles every seek outstanding right now.
    ///
    /// The capture position ends at the last settled seek, so frames drawn
    /// while dispatching the returned events all show that position. Use
    /// [`complete_next`](Self::complete_next) when frame content matters.
    pub fn complete_all(&self) -> Vec<CaptureEvent> {
        let requests: Vec<_> = self.pending_requests().into_iter().map(|(id, _)| id).collect();
        requests
            .into_iter()
            .filter_map(|id| self.complete(id))
            .collect()
    }
}

impl CapturePort for SimulatedCapture {
    fn load(&mut self, src: &str) {
        let mut inner = self.inner.borrow_mut();
        inner.src = Some(src.to_string());
        inner.pending.clear();
        inner.position = 0.0;
    }

    fn seek(&mut self, request: CaptureRequestId, time_secs: f64) -> Result<(), CaptureError> {
        let mut inner = self.inner.borrow_mut();
        if inner.src.is_none() {
            return Err(CaptureError::Seek("no source loaded".into()));
        }
        inner.seek_count += 1;
        inner.pending.push_back((request, time_secs));
        Ok(())
    }

    fn current_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        let inner = self.inner.borrow();
        if inner.fail_draws {
            return Err(CaptureError::Draw("simulated failure".into()));
        }
        // Allow cast_possible_truncation/sign_loss: positions are non-negative and reduced mod 256.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let red = (inner.position.max(0.0).floor() as u64 % 256) as u8;
        Ok(RgbaImage::from_pixel(
            SIMULATED_FRAME_WIDTH,
            SIMULATED_FRAME_HEIGHT,
            Rgba([red, 0, 0, 255]),
        ))
    }
}

// =============================================================================
// SimulatedFullscreen
// =============================================================================

#[derive(Debug)]
struct FullscreenInner {
    supported: bool,
    fullscreen: bool,
    deny: bool,
    ignore: bool,
    requests: usize,
}

/// Platform fullscreen API.
#[derive(Debug, Clone)]
pub struct SimulatedFullscreen {
    inner: Rc<RefCell<FullscreenInner>>,
}

impl Default for SimulatedFullscreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedFullscreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(FullscreenInner {
                supported: true,
                fullscreen: false,
                deny: false,
                ignore: false,
                requests: 0,
            })),
        }
    }

    /// A platform without fullscreen.
    #[must_use]
    pub fn unsupported() -> Self {
        let port = Self::new();
        port.inner.borrow_mut().supported = false;
        port
    }

    /// Makes requests fail with [`FullscreenError::Denied`].
    pub fn deny_requests(&self, deny: bool) {
        self.inner.borrow_mut().deny = deny;
    }

    /// Makes requests report success without changing anything.
    pub fn ignore_requests(&self, ignore: bool) {
        self.inner.borrow_mut().ignore = ignore;
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.inner.borrow().requests
    }

    fn transition(&mut self, target: bool) -> Result<(), FullscreenError> {
        let mut inner = self.inner.borrow_mut();
        if !inner.supported {
            return Err(FullscreenError::Unsupported);
        }
        inner.requests += 1;
        if inner.deny {
            return Err(FullscreenError::Denied);
        }
        if !inner.ignore {
            inner.fullscreen = target;
        }
        Ok(())
    }
}

impl FullscreenPort for SimulatedFullscreen {
    fn is_supported(&self) -> bool {
        self.inner.borrow().supported
    }

    fn is_fullscreen(&self) -> bool {
        self.inner.borrow().fullscreen
    }

    fn request(&mut self) -> Result<(), FullscreenError> {
        self.transition(true)
    }

    fn exit(&mut self) -> Result<(), FullscreenError> {
        self.transition(false)
    }
}

// =============================================================================
// RecordingHost
// =============================================================================

/// One host callback invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CanPlay,
    TimeUpdate(f64),
    Ended,
    ErrorVideo,
    NextClick,
    ItemClicked(ItemId, bool),
    QualityChanged(ItemId),
    CrossClick,
    BackButton,
}

/// Host that records every callback.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    calls: Rc<RefCell<Vec<HostCall>>>,
}

impl RecordingHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    /// Calls other than time updates.
    #[must_use]
    pub fn lifecycle_calls(&self) -> Vec<HostCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !matches!(call, HostCall::TimeUpdate(_)))
            .cloned()
            .collect()
    }

    /// Removes and returns the recorded calls.
    pub fn take(&self) -> Vec<HostCall> {
        std::mem::take(&mut *self.calls.borrow_mut())
    }

    fn record(&self, call: HostCall) {
        log::trace!("host callback: {:?}", call);
        self.calls.borrow_mut().push(call);
    }
}

impl PlayerHost for RecordingHost {
    fn on_can_play(&mut self) {
        self.record(HostCall::CanPlay);
    }

    fn on_time_update(&mut self, current_time: f64) {
        self.record(HostCall::TimeUpdate(current_time));
    }

    fn on_ended(&mut self) {
        self.record(HostCall::Ended);
    }

    fn on_error_video(&mut self) {
        self.record(HostCall::ErrorVideo);
    }

    fn on_next_click(&mut self) {
        self.record(HostCall::NextClick);
    }

    fn on_click_item_list_reproduction(&mut self, id: &ItemId, was_playing: bool) {
        self.record(HostCall::ItemClicked(id.clone(), was_playing));
    }

    fn on_change_quality(&mut self, id: &ItemId) {
        self.record(HostCall::QualityChanged(id.clone()));
    }

    fn on_cross_click(&mut self) {
        self.record(HostCall::CrossClick);
    }

    fn on_back_button(&mut self) {
        self.record(HostCall::BackButton);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_tick_advances_at_rate_and_ends() {
        let mut media = SimulatedMedia::new(10.0);
        assert!(media.tick(1.0).is_none());

        media.play().expect("not rejected");
        media.set_rate(2.0);
        assert_eq!(
            media.tick(1.0),
            Some(MediaEvent::TimeUpdate { current_time: 2.0 })
        );
        assert_eq!(media.tick(10.0), Some(MediaEvent::Ended));
        assert!(media.paused());
    }

    #[test]
    fn capture_frame_encodes_position() {
        let mut capture = SimulatedCapture::new();
        capture.load("a.mp4");
        capture
            .seek(CaptureRequestId::new(1), 42.8)
            .expect("source loaded");
        capture.complete(CaptureRequestId::new(1));

        let frame = capture.current_frame().expect("draws");
        assert_eq!(frame.get_pixel(0, 0).0[0], 42);
    }

    #[test]
    fn capture_without_source_rejects_seeks() {
        let mut capture = SimulatedCapture::new();
        assert!(capture.seek(CaptureRequestId::new(1), 1.0).is_err());
    }

    #[test]
    fn host_records_in_order() {
        let mut host = RecordingHost::new();
        host.on_can_play();
        host.on_time_update(1.0);
        host.on_ended();

        assert_eq!(host.lifecycle_calls(), vec![HostCall::CanPlay, HostCall::Ended]);
        assert_eq!(host.take().len(), 3);
        assert!(host.calls().is_empty());
    }
}
