// SPDX-License-Identifier: MPL-2.0
//! Presentation state derived from the player.
//!
//! A [`ControlsView`] is a snapshot: the presentation layer renders it and
//! sends intents back as [`super::PlayerMessage`]s. Nothing in here mutates
//! the player.

use super::time_format::format_hms;
use super::{Player, Thumbnail};
use crate::domain::{NextUp, Popover, Quality, VolumeIcon};
use crate::i18n::keys;
use std::sync::Arc;

/// One entry of the speed popover.
#[derive(Debug, Clone, PartialEq)]
pub struct RateChoice {
    pub label: String,
    pub selected: bool,
}

/// "You're watching" card shown while paused and idle.
#[derive(Debug, Clone, PartialEq)]
pub struct StandbyCard {
    pub heading: String,
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub paused_label: String,
}

/// Panel replacing the controls once the source failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPanel {
    pub message: String,
    /// Suggestion to switch quality, present with more than one quality.
    pub hint: Option<String>,
    /// Every quality, the failing one still flagged `playing`; empty with
    /// fewer than two.
    pub qualities: Vec<Quality>,
}

/// Tooltip above the hovered scrub position.
#[derive(Debug, Clone)]
pub struct ScrubPreview {
    pub time_label: String,
    pub thumbnail: Option<Arc<Thumbnail>>,
    /// Spinner instead of a thumbnail.
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub struct ControlsView {
    pub title_media: Option<String>,
    pub extra_info_media: Option<String>,
    pub ready: bool,
    pub playing: bool,
    pub fullscreen: bool,
    pub progress_secs: f64,
    pub duration_secs: f64,
    pub progress_percent: f64,
    pub remaining_label: String,
    pub show_spinner: bool,
    pub show_controls: bool,
    pub show_scrub_bar: bool,
    pub standby: Option<StandbyCard>,
    pub open_popover: Option<Popover>,
    pub volume: u8,
    pub muted: bool,
    pub volume_icon: VolumeIcon,
    pub show_rate_control: bool,
    pub rate_heading: String,
    pub rate_label: String,
    pub rate_choices: Vec<RateChoice>,
    pub qualities: Vec<Quality>,
    pub show_playlist_button: bool,
    pub playlist_heading: String,
    pub next_up: Option<NextUp>,
    pub next_label: String,
    /// Label of the back button, when one is configured.
    pub back_label: Option<String>,
    pub error: Option<ErrorPanel>,
    pub preview: Option<ScrubPreview>,
}

impl ControlsView {
    pub(crate) fn build(player: &Player) -> Self {
        let config = player.config();
        let state = player.state();
        let visibility = player.visibility();
        let preview = player.preview();

        let show_spinner =
            (!state.ready || (state.buffering && state.playing)) && !state.has_error() && !state.ended;
        let show_controls = visibility.controls_visible && state.ready && !state.has_error();

        let standby = (config.overlay_enabled
            && visibility.standby_visible
            && state.ready
            && !state.playing)
            .then(|| StandbyCard {
                heading: player.tr(keys::YOU_ARE_WATCHING),
                title: config.title.clone(),
                sub_title: config.sub_title.clone(),
                paused_label: player.tr(keys::PAUSED),
            });

        let rate_choices: Vec<RateChoice> = config
            .playback_rate_options
            .iter()
            .map(|option| RateChoice {
                label: option.label(),
                selected: option.matches(state.playback_rate),
            })
            .collect();
        let rate_label = rate_choices
            .iter()
            .find(|choice| choice.selected)
            .map_or_else(
                || format!("{}x", state.playback_rate.value()),
                |choice| choice.label.clone(),
            );

        let error = state.error.as_ref().map(|message| {
            let has_alternatives = config.qualities.len() > 1;
            ErrorPanel {
                message: message.clone(),
                hint: has_alternatives.then(|| player.tr(keys::TRY_OTHER_QUALITY)),
                qualities: if has_alternatives {
                    config.qualities.clone()
                } else {
                    Vec::new()
                },
            }
        });

        let scrub_preview = preview.hover_time().map(|time| ScrubPreview {
            time_label: format_hms(time),
            thumbnail: preview.active_preview().cloned(),
            loading: preview.is_loading(),
        });

        Self {
            title_media: config.title_media.clone(),
            extra_info_media: config.extra_info_media.clone(),
            ready: state.ready,
            playing: state.playing,
            fullscreen: state.fullscreen,
            progress_secs: state.progress_secs,
            duration_secs: state.duration_secs,
            progress_percent: state.progress_percent(),
            remaining_label: format_hms(state.remaining_secs()),
            show_spinner,
            show_controls,
            show_scrub_bar: show_controls && visibility.popover.is_none(),
            standby,
            open_popover: visibility.popover,
            volume: state.volume.value(),
            muted: state.muted,
            volume_icon: VolumeIcon::for_state(state.volume, state.muted),
            show_rate_control: config.playback_rate_enable,
            rate_heading: player.tr(keys::SPEEDS),
            rate_label,
            rate_choices,
            qualities: config.qualities.clone(),
            show_playlist_button: config.reproduction_list.len() > 1,
            playlist_heading: player.tr(keys::PLAYLIST),
            next_up: config
                .data_next
                .as_ref()
                .filter(|next| !next.title.trim().is_empty())
                .cloned(),
            next_label: player.tr(keys::NEXT_EPISODE),
            back_label: config.back_button.then(|| player.tr(keys::GO_BACK)),
            error,
            preview: scrub_preview,
        }
    }
}
