// SPDX-License-Identifier: MPL-2.0
//! This module handles the player configuration: every input prop the host
//! can pass, loadable from and savable to a `player.toml` file.
//!
//! # Configuration Sections
//!
//! - top level - Source, autoplay, start position, labels and catalogs
//! - `[theme]` - Cosmetic values passed through to the presentation layer
//! - `[timing]` - Timer delays and preview capture scheduling
//!
//! # Examples
//!
//! ```
//! use scrub_player::config::{self, PlayerConfig};
//!
//! let config = config::from_toml_str(
//!     r#"
//!     src = "https://example.com/movie.mp4"
//!     autoplay = true
//!     playback_rate_options = ["Normal", "1.5"]
//!     "#,
//! )
//! .expect("valid config");
//!
//! assert!(config.autoplay);
//! assert_eq!(config.playback_rate_options.len(), 2);
//! ```

pub mod defaults;

// Re-export all default constants
pub use defaults::*;

use crate::domain::{
    AutoHideDelay, BufferingGrace, CaptureConcurrency, NextUp, PlaybackRate, PlaylistItem,
    PrewarmStride, Quality, RateOption,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "player.toml";
const APP_NAME: &str = "ScrubPlayer";

// =============================================================================
// Section Structs
// =============================================================================

/// Cosmetic settings. The core never reads them; they are carried so a
/// presentation layer can be configured from the same file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeConfig {
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            font_family: default_font_family(),
        }
    }
}

/// Timer and capture tunables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimingConfig {
    /// Control bar auto-hide delay in milliseconds.
    #[serde(default = "default_controls_hide_ms")]
    pub controls_hide_ms: u64,

    /// Stall detection grace window in milliseconds.
    #[serde(default = "default_buffering_grace_ms")]
    pub buffering_grace_ms: u64,

    /// Spacing of the preview pre-warm sweep in seconds.
    #[serde(default = "default_prewarm_stride_secs")]
    pub prewarm_stride_secs: u32,

    /// Seeks allowed in flight on the capture instance.
    #[serde(default = "default_max_in_flight_captures")]
    pub max_in_flight_captures: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            controls_hide_ms: DEFAULT_CONTROLS_HIDE_MS,
            buffering_grace_ms: DEFAULT_BUFFERING_GRACE_MS,
            prewarm_stride_secs: DEFAULT_PREWARM_STRIDE_SECS,
            max_in_flight_captures: DEFAULT_MAX_IN_FLIGHT_CAPTURES,
        }
    }
}

impl TimingConfig {
    #[must_use]
    pub fn auto_hide(&self) -> AutoHideDelay {
        AutoHideDelay::new(self.controls_hide_ms)
    }

    #[must_use]
    pub fn buffering_grace(&self) -> BufferingGrace {
        BufferingGrace::new(self.buffering_grace_ms)
    }

    #[must_use]
    pub fn prewarm_stride(&self) -> PrewarmStride {
        PrewarmStride::new(self.prewarm_stride_secs)
    }

    #[must_use]
    pub fn capture_concurrency(&self) -> CaptureConcurrency {
        CaptureConcurrency::new(self.max_in_flight_captures)
    }
}

// =============================================================================
// PlayerConfig
// =============================================================================

/// Input props of the player. Only `src` is required.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerConfig {
    /// Media URL.
    pub src: String,

    #[serde(default)]
    pub autoplay: bool,

    /// Position (seconds) the element is moved to when a source loads.
    #[serde(default)]
    pub start_position: f64,

    /// UI language tag (e.g., "en", "pt").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_media: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_info_media: Option<String>,

    /// Whether the player fills the viewport.
    #[serde(default = "default_true")]
    pub full_player: bool,

    /// Whether a back button is offered.
    #[serde(default)]
    pub back_button: bool,

    #[serde(default = "default_true")]
    pub playback_rate_enable: bool,

    /// Rate applied when the element is attached.
    #[serde(default = "default_playback_rate_start")]
    pub playback_rate_start: f64,

    #[serde(default = "default_playback_rate_options")]
    pub playback_rate_options: Vec<RateOption>,

    /// When false, the controls stay up and only the standby card appears.
    #[serde(default = "default_true")]
    pub auto_control_close_enabled: bool,

    /// Whether the paused standby card may be shown.
    #[serde(default = "default_true")]
    pub overlay_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_next: Option<NextUp>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub qualities: Vec<Quality>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reproduction_list: Vec<PlaylistItem>,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub timing: TimingConfig,
}

impl PlayerConfig {
    /// Creates a configuration for `src` with every other prop defaulted.
    pub fn new(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            autoplay: false,
            start_position: 0.0,
            language: None,
            title: None,
            sub_title: None,
            title_media: None,
            extra_info_media: None,
            full_player: true,
            back_button: false,
            playback_rate_enable: true,
            playback_rate_start: DEFAULT_PLAYBACK_RATE,
            playback_rate_options: default_playback_rate_options(),
            auto_control_close_enabled: true,
            overlay_enabled: true,
            data_next: None,
            qualities: Vec::new(),
            reproduction_list: Vec::new(),
            theme: ThemeConfig::default(),
            timing: TimingConfig::default(),
        }
    }

    /// Rate applied on attach.
    #[must_use]
    pub fn initial_rate(&self) -> PlaybackRate {
        PlaybackRate::new(self.playback_rate_start)
    }

    /// Validates fields serde cannot check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty source or a negative / non-finite
    /// start position.
    pub fn validate(&self) -> Result<()> {
        if self.src.trim().is_empty() {
            return Err(Error::Config("src must not be empty".into()));
        }
        if !self.start_position.is_finite() || self.start_position < 0.0 {
            return Err(Error::Config(format!(
                "start_position must be a non-negative number, got {}",
                self.start_position
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Default Functions
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_playback_rate_start() -> f64 {
    DEFAULT_PLAYBACK_RATE
}

fn default_playback_rate_options() -> Vec<RateOption> {
    DEFAULT_PLAYBACK_RATE_OPTIONS
        .iter()
        .filter_map(|label| RateOption::parse(label))
        .collect()
}

fn default_primary_color() -> String {
    "#03dffc".to_string()
}

fn default_secondary_color() -> String {
    "#ffffff".to_string()
}

fn default_font_family() -> String {
    "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif".to_string()
}

fn default_controls_hide_ms() -> u64 {
    DEFAULT_CONTROLS_HIDE_MS
}

fn default_buffering_grace_ms() -> u64 {
    DEFAULT_BUFFERING_GRACE_MS
}

fn default_prewarm_stride_secs() -> u32 {
    DEFAULT_PREWARM_STRIDE_SECS
}

fn default_max_in_flight_captures() -> usize {
    DEFAULT_MAX_IN_FLIGHT_CAPTURES
}

// =============================================================================
// Loading / Saving
// =============================================================================

/// Platform-specific location of the config file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the config from the platform location, if a file exists there.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load() -> Result<Option<PlayerConfig>> {
    match default_config_path() {
        Some(path) if path.exists() => load_from_path(&path).map(Some),
        _ => Ok(None),
    }
}

/// Parses and validates a config from TOML text.
///
/// # Errors
///
/// Returns [`Error::Config`] for malformed TOML or invalid values.
pub fn from_toml_str(content: &str) -> Result<PlayerConfig> {
    let config: PlayerConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Loads and validates a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is invalid.
pub fn load_from_path(path: &Path) -> Result<PlayerConfig> {
    let content = fs::read_to_string(path)?;
    from_toml_str(&content)
}

/// Writes a config file, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn save_to_path(config: &PlayerConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
