// SPDX-License-Identifier: MPL-2.0
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),
    #[error("Config Error: {0}")]
    Config(String),
    #[error("I18n Error: {0}")]
    I18n(String),
    #[error("Media Error: {0}")]
    Media(#[from] MediaError),
    #[error("Capture Error: {0}")]
    Capture(#[from] CaptureError),
    #[error("Fullscreen Error: {0}")]
    Fullscreen(#[from] FullscreenError),
}

/// Faults reported by the primary media element.
///
/// Any of these is terminal for the current source: there is no automatic
/// retry and the host must supply a new source to recover.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    /// Fetching was aborted before the media became playable.
    #[error("Media loading aborted")]
    Aborted,

    /// A network fault interrupted the download.
    #[error("Network error: {0}")]
    Network(String),

    /// The media could not be decoded.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// The source format or URL is not supported.
    #[error("Source not supported")]
    SourceNotSupported,

    /// The element refused to start playback (autoplay policy, etc.).
    #[error("Playback rejected: {0}")]
    PlayRejected(String),

    /// Generic error with raw message.
    #[error("{0}")]
    Other(String),
}

impl MediaError {
    /// Returns the i18n message key for this error type.
    ///
    /// Every load fault currently shares the generic playback message.
    pub fn i18n_key(&self) -> &'static str {
        "play-error"
    }

    /// Maps the numeric codes used by HTML-style media elements.
    pub fn from_code(code: u16, message: &str) -> Self {
        match code {
            1 => MediaError::Aborted,
            2 => MediaError::Network(message.to_string()),
            3 => MediaError::Decode(message.to_string()),
            4 => MediaError::SourceNotSupported,
            _ => MediaError::Other(message.to_string()),
        }
    }
}

/// Failure of the hidden capture instance. Never surfaced to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("capture seek failed: {0}")]
    Seek(String),
    #[error("frame could not be drawn: {0}")]
    Draw(String),
    #[error("no frame available")]
    NoFrame,
    #[error("thumbnail encoding failed: {0}")]
    Encode(String),
}

/// The platform refused or does not offer fullscreen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FullscreenError {
    #[error("fullscreen is not supported")]
    Unsupported,
    #[error("fullscreen request denied")]
    Denied,
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
