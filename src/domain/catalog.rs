// SPDX-License-Identifier: MPL-2.0
//! Host-provided catalog entries: qualities, playlist items, the next-up
//! teaser and the selectable playback rates.

use super::newtypes::PlaybackRate;
use crate::config::NORMAL_RATE_LABEL;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a quality or playlist entry, as chosen by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{}", n),
            ItemId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        ItemId::Number(value)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        ItemId::Text(value.to_string())
    }
}

/// A selectable stream quality. Switching is delegated to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    pub id: ItemId,
    pub name: String,
    /// Badge shown before the name (e.g. "HD"); empty for none.
    #[serde(default)]
    pub prefix: String,
    /// Whether this is the quality currently streaming.
    #[serde(default)]
    pub playing: bool,
}

/// One entry of the reproduction list (playlist).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub playing: bool,
    /// Watched percentage, shown as a progress strip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
}

/// Teaser for the next media in line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextUp {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A selectable playback rate: either a numeric multiplier or the
/// "normal" sentinel meaning 1.0x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RateOption {
    Normal,
    Multiplier(f64),
}

impl RateOption {
    /// Resolves the option to a concrete rate.
    #[must_use]
    pub fn rate(self) -> PlaybackRate {
        match self {
            RateOption::Normal => PlaybackRate::new(1.0),
            RateOption::Multiplier(value) => PlaybackRate::new(value),
        }
    }

    /// Returns true if choosing this option yields `rate`.
    #[must_use]
    pub fn matches(self, rate: PlaybackRate) -> bool {
        (self.rate().value() - rate.value()).abs() < 1e-9
    }

    /// Label shown in the speed popover.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            RateOption::Normal => NORMAL_RATE_LABEL.to_string(),
            RateOption::Multiplier(value) => format!("{}", value),
        }
    }

    /// Parses a label: the sentinel (case-insensitive) or a decimal.
    pub fn parse(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case(NORMAL_RATE_LABEL) {
            return Some(RateOption::Normal);
        }
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(RateOption::Multiplier)
    }
}

impl TryFrom<String> for RateOption {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RateOption::parse(&value).ok_or_else(|| format!("invalid playback rate option: {value}"))
    }
}

impl From<RateOption> for String {
    fn from(value: RateOption) -> Self {
        value.label()
    }
}
