// SPDX-License-Identifier: MPL-2.0
//! Scrub preview cache.
//!
//! Maps a hovered scrub position to a thumbnail without decoding the whole
//! asset. Frames come from a secondary, muted capture instance that this
//! cache owns exclusively; the transport never sees it.
//!
//! # Design
//!
//! - **Second-keyed**: entries are keyed by [`PreviewKey`], the requested
//!   time rounded down to a whole second
//! - **Source-scoped**: the whole cache is dropped on source change, there
//!   is no other eviction
//! - **Latest request wins**: captures complete out of order; only the
//!   capture for the most recently requested key may become the active
//!   preview
//! - **Prioritized queue**: hover requests jump ahead of the pre-warm sweep
//!   and of opportunistic captures made during playback
//!
//! # Usage
//!
//! ```ignore
//! let mut cache = PreviewCache::new(PreviewSettings::default(), Some(Box::new(capture)));
//! cache.load_source("movie.mp4");
//! match cache.request_preview(42.7) {
//!     PreviewLookup::Hit(thumbnail) => show(thumbnail),
//!     PreviewLookup::Pending => show_spinner(),
//! }
//! // later, when the capture instance reports:
//! cache.handle_event(event);
//! ```

use crate::application::port::{CaptureEvent, CapturePort, CaptureRequestId};
use crate::config::{PLAYBACK_CAPTURE_EVERY_SECS, PREVIEW_HEIGHT, PREVIEW_WIDTH};
use crate::domain::{CaptureConcurrency, PrewarmStride, PreviewKey};
use crate::error::CaptureError;
use image_rs::imageops::{self, FilterType};
use image_rs::{ImageFormat, RgbaImage};
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::sync::Arc;

/// A captured frame scaled to the preview surface.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    key: PreviewKey,
    time_secs: f64,
    image: RgbaImage,
}

impl Thumbnail {
    /// Scales `frame` to `width` x `height`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::NoFrame`] for an empty frame.
    pub fn from_frame(
        key: PreviewKey,
        time_secs: f64,
        frame: &RgbaImage,
        width: u32,
        height: u32,
    ) -> Result<Self, CaptureError> {
        if frame.width() == 0 || frame.height() == 0 {
            return Err(CaptureError::NoFrame);
        }
        let image = if frame.dimensions() == (width, height) {
            frame.clone()
        } else {
            imageops::resize(frame, width, height, FilterType::Triangle)
        };
        Ok(Self {
            key,
            time_secs,
            image,
        })
    }

    #[must_use]
    pub fn key(&self) -> PreviewKey {
        self.key
    }

    /// Exact time the frame was captured for.
    #[must_use]
    pub fn time_secs(&self) -> f64 {
        self.time_secs
    }

    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Encodes the thumbnail as PNG for hosts that ship it elsewhere.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Encode`] if the encoder fails.
    pub fn to_png(&self) -> Result<Vec<u8>, CaptureError> {
        let mut bytes = Vec::new();
        self.image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| CaptureError::Encode(err.to_string()))?;
        Ok(bytes)
    }
}

/// Result of a preview request.
#[derive(Debug, Clone)]
pub enum PreviewLookup {
    /// Cached; no decode work was done.
    Hit(Arc<Thumbnail>),
    /// A capture is queued or in flight.
    Pending,
}

/// Tuning of the preview cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSettings {
    pub width: u32,
    pub height: u32,
    pub prewarm_stride: PrewarmStride,
    pub concurrency: CaptureConcurrency,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            width: PREVIEW_WIDTH,
            height: PREVIEW_HEIGHT,
            prewarm_stride: PrewarmStride::default(),
            concurrency: CaptureConcurrency::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingCapture {
    key: PreviewKey,
    time_secs: f64,
}

/// Second-keyed thumbnail cache fed by a capture instance.
pub struct PreviewCache {
    settings: PreviewSettings,
    capture: Option<Box<dyn CapturePort>>,
    entries: HashMap<PreviewKey, Arc<Thumbnail>>,
    queue: VecDeque<PendingCapture>,
    in_flight: HashMap<CaptureRequestId, PendingCapture>,
    next_request: u64,
    latest_requested: Option<PreviewKey>,
    hover_time: Option<f64>,
    active: Option<Arc<Thumbnail>>,
}

impl std::fmt::Debug for PreviewCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewCache")
            .field("settings", &self.settings)
            .field("has_capture", &self.capture.is_some())
            .field("entries", &self.entries.len())
            .field("queued", &self.queue.len())
            .field("in_flight", &self.in_flight.len())
            .field("latest_requested", &self.latest_requested)
            .finish_non_exhaustive()
    }
}

impl PreviewCache {
    /// Without a capture instance every request stays pending.
    #[must_use]
    pub fn new(settings: PreviewSettings, capture: Option<Box<dyn CapturePort>>) -> Self {
        Self {
            settings,
            capture,
            entries: HashMap::new(),
            queue: VecDeque::new(),
            in_flight: HashMap::new(),
            next_request: 1,
            latest_requested: None,
            hover_time: None,
            active: None,
        }
    }

    #[must_use]
    pub fn settings(&self) -> PreviewSettings {
        self.settings
    }

    /// Drops every entry and pending capture, then points the capture
    /// instance at `src`.
    ///
    /// Request ids keep increasing, so completions for the old source are
    /// recognized as unknown and ignored.
    pub fn load_source(&mut self, src: &str) {
        self.clear();
        if let Some(capture) = self.capture.as_deref_mut() {
            capture.load(src);
        }
    }

    /// Discards the whole cache.
    pub fn clear(&mut self) {
        if !self.entries.is_empty() || !self.in_flight.is_empty() {
            log::debug!(
                "preview cache cleared ({} entries, {} in flight)",
                self.entries.len(),
                self.in_flight.len()
            );
        }
        self.entries.clear();
        self.queue.clear();
        self.in_flight.clear();
        self.latest_requested = None;
        self.hover_time = None;
        self.active = None;
    }

    /// Requests the preview for a hovered position.
    pub fn request_preview(&mut self, time_secs: f64) -> PreviewLookup {
        let key = PreviewKey::from_secs(time_secs);
        self.hover_time = Some(time_secs.max(0.0));
        self.latest_requested = Some(key);

        if let Some(thumbnail) = self.entries.get(&key) {
            log::trace!("preview hit at {}s", key.value());
            self.active = Some(Arc::clone(thumbnail));
            return PreviewLookup::Hit(Arc::clone(thumbnail));
        }

        log::trace!("preview miss at {}s", key.value());
        self.active = None;
        self.enqueue(key, time_secs.max(0.0), true);
        self.pump();
        PreviewLookup::Pending
    }

    /// The pointer left the scrub bar.
    pub fn on_scrub_leave(&mut self) {
        self.hover_time = None;
        self.latest_requested = None;
        self.active = None;
    }

    /// Queues captures every stride seconds in `[0, duration_secs)`.
    ///
    /// The end of the media itself is never captured.
    pub fn prewarm(&mut self, duration_secs: f64) {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return;
        }
        let stride = self.settings.prewarm_stride.secs();
        let mut secs: u32 = 0;
        let mut queued = 0usize;
        while f64::from(secs) < duration_secs {
            let key = PreviewKey::from_whole_secs(secs);
            self.enqueue(key, key.as_secs(), false);
            queued += 1;
            let Some(next) = secs.checked_add(stride) else {
                break;
            };
            secs = next;
        }
        log::debug!(
            "pre-warming {} previews every {}s before {:.2}s",
            queued,
            stride,
            duration_secs
        );
        self.pump();
    }

    /// Opportunistic capture during playback, on every multiple of
    /// [`PLAYBACK_CAPTURE_EVERY_SECS`].
    pub fn on_playback_time(&mut self, time_secs: f64) {
        let key = PreviewKey::from_secs(time_secs);
        if key.value() % PLAYBACK_CAPTURE_EVERY_SECS == 0 {
            self.enqueue(key, key.as_secs(), false);
            self.pump();
        }
    }

    /// Handles a notification from the capture instance.
    pub fn handle_event(&mut self, event: CaptureEvent) {
        match event {
            CaptureEvent::SeekCompleted { request } => {
                if let Some(pending) = self.in_flight.remove(&request) {
                    self.store_frame(pending);
                } else {
                    log::trace!("ignoring unknown capture {}", request.value());
                }
            }
            CaptureEvent::SeekFailed { request, error } => {
                if let Some(pending) = self.in_flight.remove(&request) {
                    log::warn!("preview capture at {}s failed: {}", pending.key.value(), error);
                }
            }
        }
        self.pump();
    }

    fn store_frame(&mut self, pending: PendingCapture) {
        let Some(capture) = self.capture.as_deref_mut() else {
            return;
        };
        let thumbnail = capture.current_frame().and_then(|frame| {
            Thumbnail::from_frame(
                pending.key,
                pending.time_secs,
                &frame,
                self.settings.width,
                self.settings.height,
            )
        });
        match thumbnail {
            Ok(thumbnail) => {
                let thumbnail = Arc::new(thumbnail);
                if self.latest_requested == Some(pending.key) {
                    self.active = Some(Arc::clone(&thumbnail));
                }
                self.entries.insert(pending.key, thumbnail);
            }
            Err(err) => {
                log::warn!("preview capture at {}s failed: {}", pending.key.value(), err);
            }
        }
    }

    fn is_known(&self, key: PreviewKey) -> bool {
        self.entries.contains_key(&key) || self.in_flight.values().any(|p| p.key == key)
    }

    fn enqueue(&mut self, key: PreviewKey, time_secs: f64, urgent: bool) {
        if self.is_known(key) {
            return;
        }
        let queued = self.queue.iter().position(|p| p.key == key);
        let pending = PendingCapture { key, time_secs };
        match (queued, urgent) {
            (Some(index), true) => {
                self.queue.remove(index);
                self.queue.push_front(pending);
            }
            (Some(_), false) => {}
            (None, true) => self.queue.push_front(pending),
            (None, false) => self.queue.push_back(pending),
        }
    }

    fn pump(&mut self) {
        let Some(capture) = self.capture.as_deref_mut() else {
            return;
        };
        while self.in_flight.len() < self.settings.concurrency.value() {
            let Some(pending) = self.queue.pop_front() else {
                break;
            };
            if self.entries.contains_key(&pending.key) {
                continue;
            }
            let request = CaptureRequestId::new(self.next_request);
            self.next_request += 1;
            match capture.seek(request, pending.time_secs) {
                Ok(()) => {
                    self.in_flight.insert(request, pending);
                }
                Err(err) => {
                    log::warn!("preview capture at {}s failed: {}", pending.key.value(), err);
                }
            }
        }
    }

    /// Thumbnail to display: only ever the one for the latest request.
    #[must_use]
    pub fn active_preview(&self) -> Option<&Arc<Thumbnail>> {
        self.active.as_ref()
    }

    /// Time currently hovered on the scrub bar.
    #[must_use]
    pub fn hover_time(&self) -> Option<f64> {
        self.hover_time
    }

    /// True while the hovered position has no thumbnail yet.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.hover_time.is_some() && self.active.is_none()
    }

    #[must_use]
    pub fn get(&self, key: PreviewKey) -> Option<&Arc<Thumbnail>> {
        self.entries.get(&key)
    }

    #[must_use]
    pub fn contains(&self, key: PreviewKey) -> bool {
        self.entries.contains_key(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn queued(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::SimulatedCapture;
    use crate::test_utils::{assert_abs_diff_eq, solid_frame};

    fn cache_with(concurrency: usize) -> (PreviewCache, SimulatedCapture) {
        let capture = SimulatedCapture::new();
        let settings = PreviewSettings {
            concurrency: CaptureConcurrency::new(concurrency),
            ..PreviewSettings::default()
        };
        let mut cache = PreviewCache::new(settings, Some(Box::new(capture.clone())));
        cache.load_source("movie.mp4");
        (cache, capture)
    }

    fn complete_all(cache: &mut PreviewCache, capture: &SimulatedCapture) {
        while let Some(event) = capture.complete_next() {
            cache.handle_event(event);
        }
    }

    #[test]
    fn thumbnail_is_scaled_to_surface() {
        let frame = solid_frame(320, 180, 7);
        let thumbnail = Thumbnail::from_frame(PreviewKey::from_secs(3.2), 3.2, &frame, 160, 90)
            .expect("non-empty frame");

        assert_eq!((thumbnail.width(), thumbnail.height()), (160, 90));
        assert_eq!(thumbnail.image().get_pixel(80, 45).0[0], 7);
        assert_abs_diff_eq!(thumbnail.time_secs(), 3.2);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let frame = RgbaImage::new(0, 0);
        let result = Thumbnail::from_frame(PreviewKey::from_secs(0.0), 0.0, &frame, 160, 90);
        assert!(matches!(result, Err(CaptureError::NoFrame)));
    }

    #[test]
    fn thumbnail_encodes_png() {
        let frame = solid_frame(16, 9, 1);
        let thumbnail = Thumbnail::from_frame(PreviewKey::from_secs(0.0), 0.0, &frame, 16, 9)
            .expect("non-empty frame");
        let png = thumbnail.to_png().expect("png encodes");
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn miss_then_hit_returns_same_thumbnail() {
        let (mut cache, capture) = cache_with(4);

        assert!(matches!(cache.request_preview(12.3), PreviewLookup::Pending));
        assert!(cache.is_loading());
        complete_all(&mut cache, &capture);

        let PreviewLookup::Hit(first) = cache.request_preview(12.9) else {
            panic!("expected hit");
        };
        let PreviewLookup::Hit(second) = cache.request_preview(12.0) else {
            panic!("expected hit");
        };
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(capture.seek_count(), 1);
    }

    #[test]
    fn out_of_order_completion_keeps_latest_request() {
        let (mut cache, capture) = cache_with(4);
        cache.request_preview(10.0);
        cache.request_preview(50.0);
        let pending = capture.pending_requests();
        assert_eq!(pending.len(), 2);

        let late = pending.iter().find(|(_, t)| *t < 20.0).map(|(id, _)| *id);
        let early = pending.iter().find(|(_, t)| *t > 20.0).map(|(id, _)| *id);
        let (Some(late), Some(early)) = (late, early) else {
            panic!("both captures pending");
        };

        cache.handle_event(capture.complete(early).expect("pending"));
        cache.handle_event(capture.complete(late).expect("pending"));

        let active = cache.active_preview().expect("latest preview published");
        assert_eq!(active.key(), PreviewKey::from_secs(50.0));
        assert!(cache.contains(PreviewKey::from_secs(10.0)));
    }

    #[test]
    fn concurrency_bounds_outstanding_seeks() {
        let (mut cache, capture) = cache_with(2);
        cache.prewarm(100.0);

        assert_eq!(cache.in_flight(), 2);
        assert_eq!(capture.pending_requests().len(), 2);

        complete_all(&mut cache, &capture);
        assert_eq!(cache.len(), 10);
        assert_eq!(cache.in_flight(), 0);
        assert!(!cache.contains(PreviewKey::from_whole_secs(100)));
    }

    #[test]
    fn prewarm_stops_before_the_end() {
        let (mut cache, capture) = cache_with(32);
        cache.prewarm(100.0);
        let times: Vec<f64> = capture.pending_requests().iter().map(|(_, t)| *t).collect();
        assert_eq!(times.len(), 10);
        assert!(times.iter().all(|&t| t < 100.0));

        let (mut cache, capture) = cache_with(32);
        cache.prewarm(100.5);
        let times: Vec<f64> = capture.pending_requests().iter().map(|(_, t)| *t).collect();
        assert_eq!(times.len(), 11);
        assert_abs_diff_eq!(times[10], 100.0);

        let (mut cache, capture) = cache_with(32);
        cache.prewarm(0.4);
        assert_eq!(capture.pending_requests().len(), 1);
        assert_eq!(cache.in_flight(), 1);
    }

    #[test]
    fn hover_jumps_ahead_of_prewarm() {
        let (mut cache, capture) = cache_with(1);
        cache.prewarm(100.0);
        cache.request_preview(77.4);

        // one pre-warm seek was already issued, the hover goes next
        if let Some(event) = capture.complete_next() {
            cache.handle_event(event);
        }
        let next = capture.pending_requests();
        assert_eq!(next.len(), 1);
        assert_abs_diff_eq!(next[0].1, 77.4);
    }

    #[test]
    fn failed_capture_degrades_and_frees_slot() {
        let (mut cache, capture) = cache_with(1);
        cache.request_preview(5.0);
        cache.request_preview(6.0);
        let first = capture.pending_requests()[0].0;

        cache.handle_event(capture.fail(first).expect("pending"));

        assert!(cache.is_loading());
        assert!(!cache.contains(PreviewKey::from_secs(6.0)));
        assert_eq!(capture.pending_requests().len(), 1);
    }

    #[test]
    fn draw_failure_leaves_spinner() {
        let (mut cache, capture) = cache_with(1);
        capture.fail_draws(true);
        cache.request_preview(5.0);
        complete_all(&mut cache, &capture);

        assert!(cache.is_empty());
        assert!(cache.is_loading());
    }

    #[test]
    fn source_change_discards_everything() {
        let (mut cache, capture) = cache_with(4);
        cache.request_preview(3.0);
        complete_all(&mut cache, &capture);
        cache.request_preview(8.0);
        let stale = capture.pending_requests();

        cache.load_source("other.mp4");
        assert!(cache.is_empty());
        assert!(cache.active_preview().is_none());

        for (id, _) in stale {
            if let Some(event) = capture.complete(id) {
                cache.handle_event(event);
            }
        }
        assert!(cache.is_empty());
    }

    #[test]
    fn playback_captures_every_fifth_second() {
        let (mut cache, capture) = cache_with(4);
        for t in [1.0, 4.9, 5.2, 5.7, 9.0, 10.0] {
            cache.on_playback_time(t);
        }
        let times: Vec<f64> = capture.pending_requests().iter().map(|(_, t)| *t).collect();
        assert_eq!(times, vec![5.0, 10.0]);
    }

    #[test]
    fn scrub_leave_clears_hover() {
        let (mut cache, capture) = cache_with(4);
        cache.request_preview(3.0);
        complete_all(&mut cache, &capture);
        cache.request_preview(3.0);

        cache.on_scrub_leave();

        assert!(cache.hover_time().is_none());
        assert!(cache.active_preview().is_none());
        assert!(!cache.is_loading());
    }

    #[test]
    fn without_capture_requests_stay_pending() {
        let mut cache = PreviewCache::new(PreviewSettings::default(), None);
        assert!(matches!(cache.request_preview(1.0), PreviewLookup::Pending));
        assert_eq!(cache.in_flight(), 0);
    }
}
