// SPDX-License-Identifier: MPL-2.0
use approx::assert_abs_diff_eq;
use scrub_player::application::port::{FullscreenPort, MediaEvent};
use scrub_player::config::{self, PlayerConfig};
use scrub_player::domain::{Popover, PreviewKey, Volume, VolumeIcon};
use scrub_player::i18n::Translations;
use scrub_player::infrastructure::{
    HostCall, ManualClock, RecordingHost, SimulatedCapture, SimulatedFullscreen, SimulatedMedia,
};
use scrub_player::player::SkipDirection;
use scrub_player::{Player, PlayerMessage, PlayerPorts};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

struct Harness {
    player: Player,
    media: SimulatedMedia,
    capture: SimulatedCapture,
    fullscreen: SimulatedFullscreen,
    clock: ManualClock,
    host: RecordingHost,
}

impl Harness {
    fn mount(config: PlayerConfig, duration_secs: f64) -> Self {
        let media = SimulatedMedia::new(duration_secs);
        let capture = SimulatedCapture::new();
        let clock = ManualClock::new();
        let host = RecordingHost::new();
        let fullscreen = SimulatedFullscreen::new();
        let ports = PlayerPorts::new(Box::new(clock.scheduler()), Box::new(host.clone()))
            .with_media(Box::new(media.clone()))
            .with_capture(Box::new(capture.clone()))
            .with_fullscreen(Box::new(fullscreen.clone()));
        let translations = Translations::embedded().expect("embedded translations parse");
        let player = Player::mount(config, translations, ports).expect("valid config");
        Self {
            player,
            media,
            capture,
            fullscreen,
            clock,
            host,
        }
    }

    fn ready(config: PlayerConfig, duration_secs: f64) -> Self {
        let mut harness = Self::mount(config, duration_secs);
        harness.media(MediaEvent::Ready);
        harness
    }

    fn media(&mut self, event: MediaEvent) {
        self.player.update(PlayerMessage::Media(event));
    }

    fn time_update(&mut self, current_time: f64) {
        self.media(MediaEvent::TimeUpdate { current_time });
    }

    fn advance(&mut self, elapsed: Duration) {
        for fired in self.clock.advance(elapsed) {
            self.player.update(PlayerMessage::TimerFired(fired));
        }
    }

    fn hover(&mut self, time_secs: f64) {
        self.player.update(PlayerMessage::ScrubHover(time_secs));
    }
}

#[test]
fn non_decreasing_time_updates_leave_last_timestamp() {
    let sequences: [&[f64]; 4] = [
        &[0.0],
        &[0.5, 1.0, 1.0, 2.25],
        &[3.0, 17.75, 42.0, 42.0, 119.5],
        &[10.0, 10.0, 10.0],
    ];
    for sequence in sequences {
        let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
        for &t in sequence {
            harness.time_update(t);
        }
        let last = *sequence.last().expect("non-empty");
        assert_abs_diff_eq!(harness.player.state().progress_secs, last);
    }
}

#[test]
fn forward_skip_never_passes_duration_minus_one() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
    for position in [0.0, 60.0, 113.0, 116.5, 119.0, 120.0] {
        harness.player.update(PlayerMessage::SeekTo(position));
        harness.player.update(PlayerMessage::Skip(SkipDirection::Forward));
        assert!(harness.player.state().progress_secs <= 119.0);
    }
}

#[test]
fn backward_skip_stops_at_zero() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
    for position in [0.0, 1.0, 4.99, 5.0] {
        harness.player.update(PlayerMessage::SeekTo(position));
        harness.player.update(PlayerMessage::Skip(SkipDirection::Backward));
        assert_abs_diff_eq!(harness.player.state().progress_secs, 0.0);
    }
}

#[test]
fn opening_popover_a_then_b_leaves_only_b() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
    for a in Popover::ALL {
        for b in Popover::ALL {
            harness.player.update(PlayerMessage::PopoverEnter(a));
            harness.player.update(PlayerMessage::PopoverEnter(b));
            assert_eq!(harness.player.visibility().popover, Some(b));
            harness.player.update(PlayerMessage::PopoverLeave(b));
        }
    }
}

#[test]
fn cached_preview_is_the_same_reference() {
    let mut harness = Harness::mount(PlayerConfig::new("movie.mp4"), 120.0);
    harness.hover(33.2);
    for event in harness.capture.complete_all() {
        harness.player.update(PlayerMessage::Capture(event));
    }

    harness.hover(33.9);
    let first = harness
        .player
        .view()
        .preview
        .and_then(|preview| preview.thumbnail)
        .expect("cached thumbnail");
    harness.hover(33.0);
    let second = harness
        .player
        .view()
        .preview
        .and_then(|preview| preview.thumbnail)
        .expect("cached thumbnail");

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(harness.capture.seek_count(), 1);
}

#[test]
fn loop_back_applies_once_per_load() {
    let mut config = PlayerConfig::new("movie.mp4");
    config.start_position = 120.0;
    let mut harness = Harness::ready(config, 120.0);

    for _ in 0..4 {
        harness.media(MediaEvent::Ended);
    }

    let rewinds = harness
        .media
        .seeks()
        .iter()
        .filter(|&&seek| (seek - 90.0).abs() < 1e-9)
        .count();
    assert_eq!(rewinds, 1);
    assert_eq!(
        harness.host.lifecycle_calls(),
        vec![HostCall::CanPlay, HostCall::Ended]
    );
}

#[test]
fn start_at_end_with_autoplay_rewinds_and_resumes() {
    let mut config = PlayerConfig::new("movie.mp4");
    config.start_position = 120.0;
    config.autoplay = true;
    let mut harness = Harness::ready(config, 120.0);
    assert!(harness.player.state().playing);

    harness.media(MediaEvent::Ended);

    let state = harness.player.state();
    assert_abs_diff_eq!(state.progress_secs, 90.0);
    assert!(state.playing);
    assert!(!state.ended);
    assert!(harness.player.loop_back_applied());
    assert!(!harness.host.calls().contains(&HostCall::Ended));
}

#[test]
fn loop_back_rearms_after_source_change() {
    let mut config = PlayerConfig::new("one.mp4");
    config.start_position = 120.0;
    let mut harness = Harness::ready(config, 120.0);
    harness.media(MediaEvent::Ended);
    assert!(harness.player.loop_back_applied());

    harness.player.set_source("two.mp4");
    assert!(!harness.player.loop_back_applied());
    harness.media(MediaEvent::Ready);
    harness.media(MediaEvent::Ended);

    assert!(harness.player.loop_back_applied());
    assert!(!harness.host.calls().contains(&HostCall::Ended));
}

#[test]
fn slow_capture_for_earlier_hover_does_not_override_latest() {
    let mut harness = Harness::mount(PlayerConfig::new("movie.mp4"), 120.0);
    harness.hover(10.0);
    harness.hover(50.0);

    let pending = harness.capture.pending_requests();
    let id_for = |time: f64| {
        pending
            .iter()
            .find(|(_, t)| (*t - time).abs() < 1e-9)
            .map(|(id, _)| *id)
            .expect("capture pending")
    };
    let (ten, fifty) = (id_for(10.0), id_for(50.0));

    let completed = harness.capture.complete(fifty).expect("pending");
    harness.player.update(PlayerMessage::Capture(completed));
    let completed = harness.capture.complete(ten).expect("pending");
    harness.player.update(PlayerMessage::Capture(completed));

    let thumbnail = harness
        .player
        .view()
        .preview
        .and_then(|preview| preview.thumbnail)
        .expect("preview published");
    assert_eq!(thumbnail.key(), PreviewKey::from_secs(50.0));
    assert_eq!(thumbnail.image().get_pixel(0, 0).0[0], 50);
    assert!(harness.player.preview().contains(PreviewKey::from_secs(10.0)));
}

#[test]
fn volume_icons_stay_independent_of_mute_flag() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
    for (level, icon) in [
        (45, VolumeIcon::Low),
        (75, VolumeIcon::High),
        (0, VolumeIcon::Muted),
    ] {
        harness.player.update(PlayerMessage::SetVolume(Volume::new(level)));
        assert_eq!(harness.player.view().volume_icon, icon);
        assert!(!harness.player.state().muted);
    }

    harness.player.update(PlayerMessage::SetMuted(true));
    assert!(harness.player.state().muted);
    assert!(harness.media.is_muted());
}

#[test]
fn stalled_playback_shows_spinner_until_next_update() {
    let mut config = PlayerConfig::new("movie.mp4");
    config.autoplay = true;
    let mut harness = Harness::ready(config, 120.0);
    harness.time_update(1.0);

    harness.advance(Duration::from_millis(1100));
    assert!(harness.player.state().buffering);
    assert!(harness.player.view().show_spinner);

    harness.time_update(1.2);
    assert!(!harness.player.view().show_spinner);
}

#[test]
fn error_blocks_play_until_new_source() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
    harness.media(MediaEvent::Error(scrub_player::error::MediaError::Network(
        "reset".into(),
    )));

    harness.player.update(PlayerMessage::TogglePlay);
    assert!(!harness.player.state().playing);
    assert_eq!(harness.media.play_calls(), 0);

    harness.player.set_source("other.mp4");
    assert!(harness.player.state().error.is_none());
    harness.media(MediaEvent::Ready);
    harness.player.update(PlayerMessage::TogglePlay);
    assert!(harness.player.state().playing);
}

#[test]
fn prewarm_fills_cache_at_stride() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 95.0);
    while let Some(event) = harness.capture.complete_next() {
        harness.player.update(PlayerMessage::Capture(event));
    }

    let preview = harness.player.preview();
    assert_eq!(preview.len(), 10);
    for secs in (0..=90).step_by(10) {
        assert!(preview.contains(PreviewKey::from_whole_secs(secs)));
    }
}

#[test]
fn cache_lookup_through_preview_api() {
    let mut harness = Harness::mount(PlayerConfig::new("movie.mp4"), 120.0);
    harness.hover(7.5);
    for event in harness.capture.complete_all() {
        harness.player.update(PlayerMessage::Capture(event));
    }
    let thumbnail = harness
        .player
        .preview()
        .get(PreviewKey::from_secs(7.5))
        .expect("cached");
    assert_eq!((thumbnail.width(), thumbnail.height()), (160, 90));
    assert!(!thumbnail.to_png().expect("png encodes").is_empty());
}

#[test]
fn config_file_round_trip_drives_player() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("player.toml");

    let mut config = PlayerConfig::new("movie.mp4");
    config.language = Some("he".into());
    config.autoplay = true;
    config.timing.controls_hide_ms = 1500;
    config::save_to_path(&config, &path).expect("Failed to write config file");

    let loaded = config::load_from_path(&path).expect("Failed to load config file");
    assert_eq!(loaded, config);

    let mut harness = Harness::ready(loaded, 120.0);
    assert_eq!(harness.player.language().to_string(), "he");
    assert_eq!(harness.player.tr("paused"), "מושהה");

    harness.player.update(PlayerMessage::PointerActivity);
    harness.advance(Duration::from_millis(1500));
    assert!(!harness.player.visibility().controls_visible);
}

#[test]
fn prewarm_never_seeks_to_the_end() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 100.0);
    let mut seeks = Vec::new();
    loop {
        let pending = harness.capture.pending_requests();
        let Some(&(request, time_secs)) = pending.first() else {
            break;
        };
        seeks.push(time_secs);
        let event = harness.capture.complete(request).expect("pending");
        harness.player.update(PlayerMessage::Capture(event));
    }

    assert_eq!(seeks.len(), 10);
    assert!(seeks.iter().all(|&t| t < 100.0));
    assert!(!harness.player.preview().contains(PreviewKey::from_whole_secs(100)));
}

#[test]
fn fullscreen_toggle_recovers_from_silently_ignored_request() {
    let mut harness = Harness::ready(PlayerConfig::new("movie.mp4"), 120.0);
    harness.fullscreen.ignore_requests(true);

    harness.player.update(PlayerMessage::ToggleFullscreen);
    assert!(harness.player.state().fullscreen);
    assert!(!harness.fullscreen.is_fullscreen());

    harness.fullscreen.ignore_requests(false);
    harness.player.update(PlayerMessage::ToggleFullscreen);
    harness.player.update(PlayerMessage::FullscreenChanged);

    assert!(harness.fullscreen.is_fullscreen());
    assert!(harness.player.state().fullscreen);
}
