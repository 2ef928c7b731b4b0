// SPDX-License-Identifier: MPL-2.0
//! Playback control core.
//!
//! [`Player`] owns the injected ports and the sub-controllers, and is driven
//! entirely by [`PlayerMessage`]s the host dispatches from its event loop:
//! media and capture notifications, fired timers, fullscreen changes,
//! pointer and keyboard input, and user intents.
//!
//! - [`reconciler`]: media events → [`PlaybackState`]
//! - [`visibility`]: auto-hiding control bar, standby card, popovers
//! - [`transport`]: seek, skip, rate, volume and play intents
//! - [`preview`]: second-keyed scrub thumbnails
//! - [`fullscreen`]: platform fullscreen bridge
//! - [`view_model`]: derived presentation state
//!
//! Everything runs on the host's thread; nothing here blocks.

pub mod fullscreen;
pub mod preview;
pub mod reconciler;
pub mod time_format;
pub mod timer;
pub mod transport;
pub mod view_model;
pub mod visibility;

pub use fullscreen::FullscreenBridge;
pub use preview::{PreviewCache, PreviewLookup, PreviewSettings, Thumbnail};
pub use reconciler::{HostNotice, Reconciler};
pub use time_format::format_hms;
pub use timer::{SingleShotTimer, TimerState};
pub use transport::SkipDirection;
pub use view_model::{ControlsView, ErrorPanel, RateChoice, ScrubPreview, StandbyCard};
pub use visibility::{VisibilityController, VisibilityState};

use crate::application::port::{
    CaptureEvent, CapturePort, FullscreenPort, MediaEvent, MediaPort, PlayerHost, Scheduler,
    TimerFired, TimerKind,
};
use crate::config::{PlayerConfig, DEFAULT_SKIP_SECS};
use crate::domain::{ItemId, PlaybackState, Popover, RateOption, Volume};
use crate::error::{MediaError, Result};
use crate::i18n::Translations;
use unic_langid::LanguageIdentifier;

/// Keys the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Other,
}

/// Everything the host can feed into the player.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerMessage {
    /// Notification from the primary media element.
    Media(MediaEvent),
    /// Notification from the capture instance.
    Capture(CaptureEvent),
    /// A scheduler timer elapsed.
    TimerFired(TimerFired),
    /// The platform reported a fullscreen change.
    FullscreenChanged,
    PointerActivity,
    KeyPressed(Key),
    DoubleClick,
    PopoverEnter(Popover),
    PopoverLeave(Popover),
    /// Pointer over the scrub bar at this media time.
    ScrubHover(f64),
    ScrubLeave,
    SeekTo(f64),
    Skip(SkipDirection),
    TogglePlay,
    SetVolume(Volume),
    SetMuted(bool),
    SetPlaybackRate(RateOption),
    ToggleFullscreen,
    EnterFullscreen,
    ExitFullscreen,
    SelectQuality(ItemId),
    SelectPlaylistItem(ItemId),
    NextClicked,
    CrossClicked,
    BackClicked,
}

/// Ports handed to [`Player::mount`].
///
/// Media, capture and fullscreen are optional: operations needing a missing
/// port are no-ops.
pub struct PlayerPorts {
    pub media: Option<Box<dyn MediaPort>>,
    pub capture: Option<Box<dyn CapturePort>>,
    pub fullscreen: Option<Box<dyn FullscreenPort>>,
    pub scheduler: Box<dyn Scheduler>,
    pub host: Box<dyn PlayerHost>,
}

impl PlayerPorts {
    #[must_use]
    pub fn new(scheduler: Box<dyn Scheduler>, host: Box<dyn PlayerHost>) -> Self {
        Self {
            media: None,
            capture: None,
            fullscreen: None,
            scheduler,
            host,
        }
    }

    #[must_use]
    pub fn with_media(mut self, media: Box<dyn MediaPort>) -> Self {
        self.media = Some(media);
        self
    }

    #[must_use]
    pub fn with_capture(mut self, capture: Box<dyn CapturePort>) -> Self {
        self.capture = Some(capture);
        self
    }

    #[must_use]
    pub fn with_fullscreen(mut self, fullscreen: Box<dyn FullscreenPort>) -> Self {
        self.fullscreen = Some(fullscreen);
        self
    }
}

/// A mounted player.
///
/// Dropping (or [`unmount`](Self::unmount)ing) cancels both timers and
/// releases the preview cache.
pub struct Player {
    config: PlayerConfig,
    translations: Translations,
    language: LanguageIdentifier,
    reconciler: Reconciler,
    visibility: VisibilityController,
    preview: PreviewCache,
    fullscreen: FullscreenBridge,
    media: Option<Box<dyn MediaPort>>,
    scheduler: Box<dyn Scheduler>,
    host: Box<dyn PlayerHost>,
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("src", &self.config.src)
            .field("language", &self.language)
            .field("state", self.reconciler.state())
            .field("visibility", &self.visibility.state())
            .field("preview", &self.preview)
            .finish_non_exhaustive()
    }
}

impl Player {
    /// Mounts a player for `config.src`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration is invalid.
    pub fn mount(
        config: PlayerConfig,
        translations: Translations,
        ports: PlayerPorts,
    ) -> Result<Self> {
        config.validate()?;
        let language = translations.resolve_language(config.language.as_deref());
        let timing = &config.timing;
        let preview_settings = PreviewSettings {
            prewarm_stride: timing.prewarm_stride(),
            concurrency: timing.capture_concurrency(),
            ..PreviewSettings::default()
        };

        let mut player = Self {
            reconciler: Reconciler::new(
                config.autoplay,
                config.start_position,
                timing.buffering_grace(),
            ),
            visibility: VisibilityController::new(
                timing.auto_hide(),
                config.auto_control_close_enabled,
            ),
            preview: PreviewCache::new(preview_settings, ports.capture),
            fullscreen: FullscreenBridge::new(ports.fullscreen),
            media: None,
            scheduler: ports.scheduler,
            host: ports.host,
            config,
            translations,
            language,
        };
        log::debug!("mounting player for {} ({})", player.config.src, player.language);
        player.preview.load_source(&player.config.src);
        if let Some(media) = ports.media {
            player.attach_media(media);
        }
        Ok(player)
    }

    /// Attaches the primary media element.
    ///
    /// Applies the configured start rate and the current volume, then loads
    /// the source at its start position.
    pub fn attach_media(&mut self, mut media: Box<dyn MediaPort>) {
        let state = self.reconciler.state_mut();
        state.playback_rate = self.config.initial_rate();
        media.set_rate(state.playback_rate.value());
        media.set_volume(state.volume.as_gain());
        media.set_muted(state.muted);
        media.load(&self.config.src);
        media.seek(self.config.start_position);
        self.media = Some(media);
    }

    /// Switches to a new source, keeping the rest of the configuration.
    pub fn set_source(&mut self, src: impl Into<String>) {
        self.config.src = src.into();
        self.reload_source();
    }

    /// Replaces the configuration. A changed `src` starts a new load cycle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configuration is invalid; the
    /// player keeps its previous configuration in that case.
    pub fn reconfigure(&mut self, config: PlayerConfig) -> Result<()> {
        config.validate()?;
        let source_changed = config.src != self.config.src
            || config.start_position != self.config.start_position;
        self.language = self.translations.resolve_language(config.language.as_deref());
        self.visibility.set_auto_close(config.auto_control_close_enabled);
        self.visibility.set_delay(config.timing.auto_hide());
        self.reconciler.set_buffering_grace(config.timing.buffering_grace());
        self.config = config;
        if source_changed {
            self.reload_source();
        }
        Ok(())
    }

    fn reload_source(&mut self) {
        log::debug!("source changed to {}", self.config.src);
        self.reconciler.reset_for_source(
            self.config.autoplay,
            self.config.start_position,
            self.scheduler.as_mut(),
        );
        self.visibility.reset_for_source();
        self.preview.load_source(&self.config.src);
        if let Some(media) = self.media.as_deref_mut() {
            media.load(&self.config.src);
            media.seek(self.config.start_position);
        }
    }

    /// Releases timers and the preview cache.
    pub fn unmount(self) {
        log::debug!("unmounting player for {}", self.config.src);
    }

    /// Processes one message.
    pub fn update(&mut self, message: PlayerMessage) {
        match message {
            PlayerMessage::Media(event) => self.on_media_event(event),
            PlayerMessage::Capture(event) => self.preview.handle_event(event),
            PlayerMessage::TimerFired(fired) => self.on_timer_fired(fired),
            PlayerMessage::FullscreenChanged => {
                self.fullscreen.on_change(self.reconciler.state_mut());
            }
            PlayerMessage::PointerActivity => {
                self.visibility.on_pointer_activity(self.scheduler.as_mut());
            }
            PlayerMessage::KeyPressed(Key::Space) => {
                self.toggle_play();
                self.visibility.on_pointer_activity(self.scheduler.as_mut());
            }
            PlayerMessage::KeyPressed(Key::Other) => {}
            PlayerMessage::DoubleClick | PlayerMessage::ToggleFullscreen => {
                if self.fullscreen.toggle(self.reconciler.state_mut()) {
                    self.visibility.on_fullscreen_entered();
                }
            }
            PlayerMessage::EnterFullscreen => {
                if self.fullscreen.enter(self.reconciler.state_mut()) {
                    self.visibility.on_fullscreen_entered();
                }
            }
            PlayerMessage::ExitFullscreen => {
                self.fullscreen.exit(self.reconciler.state_mut());
            }
            PlayerMessage::PopoverEnter(popover) => self.visibility.open_popover(popover),
            PlayerMessage::PopoverLeave(popover) => self.visibility.close_popover(popover),
            PlayerMessage::ScrubHover(time_secs) => {
                self.preview.request_preview(time_secs);
            }
            PlayerMessage::ScrubLeave => self.preview.on_scrub_leave(),
            PlayerMessage::SeekTo(position) => {
                if let Some(media) = self.media.as_deref_mut() {
                    transport::seek_absolute(self.reconciler.state_mut(), media, position);
                }
            }
            PlayerMessage::Skip(direction) => {
                if let Some(media) = self.media.as_deref_mut() {
                    transport::seek_relative(
                        self.reconciler.state_mut(),
                        media,
                        DEFAULT_SKIP_SECS,
                        direction,
                    );
                }
            }
            PlayerMessage::TogglePlay => self.toggle_play(),
            PlayerMessage::SetVolume(volume) => {
                if let Some(media) = self.media.as_deref_mut() {
                    transport::set_volume(self.reconciler.state_mut(), media, volume);
                }
            }
            PlayerMessage::SetMuted(muted) => {
                if let Some(media) = self.media.as_deref_mut() {
                    transport::set_muted(self.reconciler.state_mut(), media, muted);
                }
                self.visibility.close_popover(Popover::Volume);
            }
            PlayerMessage::SetPlaybackRate(option) => {
                if !self.config.playback_rate_enable {
                    return;
                }
                if let Some(media) = self.media.as_deref_mut() {
                    transport::set_playback_rate(self.reconciler.state_mut(), media, option);
                }
            }
            PlayerMessage::SelectQuality(id) => {
                self.visibility.close_popover(Popover::Quality);
                if self.config.qualities.iter().any(|quality| quality.id == id) {
                    self.host.on_change_quality(&id);
                } else {
                    log::debug!("ignoring unknown quality {}", id);
                }
            }
            PlayerMessage::SelectPlaylistItem(id) => {
                match self.config.reproduction_list.iter().find(|item| item.id == id) {
                    Some(item) => self.host.on_click_item_list_reproduction(&id, item.playing),
                    None => log::debug!("ignoring unknown playlist item {}", id),
                }
            }
            PlayerMessage::NextClicked => self.host.on_next_click(),
            PlayerMessage::CrossClicked => self.host.on_cross_click(),
            PlayerMessage::BackClicked => {
                if self.config.back_button {
                    self.host.on_back_button();
                }
            }
        }
    }

    fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Ready => {
                let Some(media) = self.media.as_deref_mut() else {
                    return;
                };
                self.reconciler.on_ready(media);
                self.preview.prewarm(self.reconciler.state().duration_secs);
                self.host.on_can_play();
            }
            MediaEvent::TimeUpdate { current_time } => {
                if let Some(HostNotice::TimeUpdate(time)) = self
                    .reconciler
                    .on_time_update(current_time, self.scheduler.as_mut())
                {
                    self.visibility.on_time_update();
                    self.preview.on_playback_time(time);
                    self.host.on_time_update(time);
                }
            }
            MediaEvent::SeekCompleted => {
                if let Some(media) = self.media.as_deref() {
                    self.reconciler.on_seek_completed(media);
                }
            }
            MediaEvent::Error(error) => self.on_media_error(&error),
            MediaEvent::Ended => {
                let Some(media) = self.media.as_deref_mut() else {
                    return;
                };
                if self
                    .reconciler
                    .on_ended(media, self.scheduler.as_mut())
                    .is_some()
                {
                    self.host.on_ended();
                }
            }
        }
    }

    fn on_media_error(&mut self, error: &MediaError) {
        let message = self.translations.tr(&self.language, error.i18n_key());
        self.reconciler
            .on_error(error, message, self.scheduler.as_mut());
        self.host.on_error_video();
    }

    fn on_timer_fired(&mut self, fired: TimerFired) {
        match fired.kind {
            TimerKind::ControlsAutoHide => {
                let playing = self.reconciler.state().playing;
                self.visibility.on_auto_hide(fired.token, playing);
            }
            TimerKind::BufferingDetect => {
                self.reconciler.on_buffering_timer(fired.token);
            }
        }
    }

    fn toggle_play(&mut self) {
        let Some(media) = self.media.as_deref_mut() else {
            return;
        };
        if let Err(err) = transport::toggle_play(self.reconciler.state_mut(), media) {
            log::warn!("play rejected: {}", err);
        }
    }

    /// Derived presentation state.
    #[must_use]
    pub fn view(&self) -> ControlsView {
        ControlsView::build(self)
    }

    #[must_use]
    pub fn state(&self) -> &PlaybackState {
        self.reconciler.state()
    }

    #[must_use]
    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    #[must_use]
    pub fn preview(&self) -> &PreviewCache {
        &self.preview
    }

    #[must_use]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    #[must_use]
    pub fn language(&self) -> &LanguageIdentifier {
        &self.language
    }

    /// Localized string for `key` in the player's language.
    #[must_use]
    pub fn tr(&self, key: &str) -> String {
        self.translations.tr(&self.language, key)
    }

    #[must_use]
    pub fn loop_back_applied(&self) -> bool {
        self.reconciler.loop_back_applied()
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.reconciler.teardown(self.scheduler.as_mut());
        self.visibility.teardown(self.scheduler.as_mut());
        self.preview.clear();
    }
}
