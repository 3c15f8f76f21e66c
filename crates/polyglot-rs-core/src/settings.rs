//! Engine settings.
//!
//! [`Settings`] holds everything about a [`Polyglot`](crate::engine::Polyglot)
//! that can live in a configuration file. Handlers and custom plural rules are
//! code, not data, and are attached to
//! [`PolyglotOptions`](crate::engine::PolyglotOptions) directly.
//! See [`settings_loader`](crate::settings_loader) for TOML/JSON loading.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::interpolation::{DEFAULT_PREFIX, DEFAULT_SUFFIX};

/// Placeholder delimiter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpolationSettings {
    /// Opening delimiter (e.g. `%{`).
    pub prefix: String,
    /// Closing delimiter (e.g. `}`).
    pub suffix: String,
}

impl Default for InterpolationSettings {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use polyglot_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert_eq!(settings.locale, "en");
/// assert!(!settings.allow_missing);
/// assert_eq!(settings.interpolation.prefix, "%{");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // ── Translation ──────────────────────────────────────────────────

    /// The active locale code (e.g. "en", "ru-RU").
    pub locale: String,
    /// Treat missing keys as their own phrase instead of warning.
    pub allow_missing: bool,
    /// Placeholder delimiters.
    pub interpolation: InterpolationSettings,
    /// JSON dictionary files, merged in order.
    pub dictionaries: Vec<PathBuf>,

    // ── Logging ──────────────────────────────────────────────────────

    /// Whether to use human-readable log output.
    pub debug: bool,
    /// The log level (e.g. "info", "debug", "warn").
    pub log_level: String,

    // ── Escape hatch ─────────────────────────────────────────────────

    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            allow_missing: false,
            interpolation: InterpolationSettings::default(),
            dictionaries: Vec::new(),
            debug: true,
            log_level: "info".to_string(),
            extra: HashMap::new(),
        }
    }
}
