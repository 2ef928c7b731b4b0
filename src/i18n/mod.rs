// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the player.
//!
//! Strings live in an explicit [`Translations`] table handed to the player;
//! there is no process-wide registry. Lookups are pure functions of
//! `(language, key)`.
//!
//! # Features
//!
//! - Embedded `.ftl` tables for `en`, `pt` and `he`
//! - Caller-provided Fluent sources for custom languages or wording
//! - Language resolution from config, then OS locale, then `en`
//! - Fallback to the default language when a key is missing

use crate::error::{Error, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use rust_embed::RustEmbed;
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Language used when nothing else matches.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Message keys used by the player core.
pub mod keys {
    pub const YOU_ARE_WATCHING: &str = "you-are-watching";
    pub const PAUSED: &str = "paused";
    pub const TRY_OTHER_QUALITY: &str = "try-other-quality";
    pub const GO_BACK: &str = "go-back";
    pub const SPEEDS: &str = "speeds";
    pub const NEXT_EPISODE: &str = "next-episode";
    pub const PLAYLIST: &str = "playlist";
    pub const PLAY_ERROR: &str = "play-error";
}

/// Translation table keyed by language.
pub struct Translations {
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
    fallback: LanguageIdentifier,
}

impl std::fmt::Debug for Translations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translations")
            .field("languages", &self.available_languages())
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl Translations {
    /// Builds the table from the `.ftl` files embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I18n`] if an embedded file fails to parse.
    pub fn embedded() -> Result<Self> {
        let mut sources = Vec::new();
        for file in Asset::iter() {
            let filename = file.as_ref();
            if let Some(locale_str) = filename.strip_suffix(".ftl") {
                if let Some(content) = Asset::get(filename) {
                    sources.push((
                        locale_str.to_string(),
                        String::from_utf8_lossy(content.data.as_ref()).to_string(),
                    ));
                }
            }
        }
        Self::from_sources(sources)
    }

    /// Builds the table from `(language tag, Fluent source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::I18n`] for an invalid language tag or Fluent syntax.
    pub fn from_sources<I, L, S>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, S)>,
        L: AsRef<str>,
        S: Into<String>,
    {
        let mut bundles = HashMap::new();
        for (tag, source) in sources {
            let locale: LanguageIdentifier = tag
                .as_ref()
                .parse()
                .map_err(|_| Error::I18n(format!("invalid language tag: {}", tag.as_ref())))?;
            let resource = FluentResource::try_new(source.into()).map_err(|(_, errors)| {
                Error::I18n(format!("{} parse error(s) in {}", errors.len(), locale))
            })?;
            let mut bundle = FluentBundle::new(vec![locale.clone()]);
            bundle.set_use_isolating(false);
            bundle
                .add_resource(resource)
                .map_err(|_| Error::I18n(format!("duplicate messages in {}", locale)))?;
            bundles.insert(locale, bundle);
        }

        let fallback = DEFAULT_LANGUAGE
            .parse()
            .map_err(|_| Error::I18n("invalid default language".into()))?;

        Ok(Self { bundles, fallback })
    }

    /// Languages present in the table, sorted by tag.
    #[must_use]
    pub fn available_languages(&self) -> Vec<LanguageIdentifier> {
        let mut languages: Vec<_> = self.bundles.keys().cloned().collect();
        languages.sort_by_key(ToString::to_string);
        languages
    }

    /// Picks the language to display.
    ///
    /// 1. The configured tag, if the table has it (or its base language)
    /// 2. The OS locale, same matching
    /// 3. The default language
    #[must_use]
    pub fn resolve_language(&self, configured: Option<&str>) -> LanguageIdentifier {
        configured
            .and_then(|tag| self.match_available(tag))
            .or_else(|| sys_locale::get_locale().and_then(|os| self.match_available(&os)))
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn match_available(&self, tag: &str) -> Option<LanguageIdentifier> {
        let requested: LanguageIdentifier = tag.parse().ok()?;
        if self.bundles.contains_key(&requested) {
            return Some(requested);
        }
        self.available_languages()
            .into_iter()
            .find(|available| available.language == requested.language)
    }

    /// Looks up `key` for `language`, falling back to the default language
    /// and finally to the key itself.
    #[must_use]
    pub fn tr(&self, language: &LanguageIdentifier, key: &str) -> String {
        self.format(language, key)
            .or_else(|| self.format(&self.fallback, key))
            .unwrap_or_else(|| key.to_string())
    }

    fn format(&self, language: &LanguageIdentifier, key: &str) -> Option<String> {
        let bundle = self.bundles.get(language)?;
        let pattern = bundle.get_message(key)?.value()?;
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);
        errors.is_empty().then(|| value.to_string())
    }
}
