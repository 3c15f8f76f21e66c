//! The translation engine.
//!
//! [`Polyglot`] turns a dotted key plus optional [`TranslateOptions`] into a
//! display string:
//!
//! 1. look the key up in the [`PhraseStore`], falling back to the options'
//!    default phrase, then to the [`MissingKeyPolicy`];
//! 2. if a `smart_count` is present, split the template on `||||` and pick the
//!    variant the locale's plural family selects;
//! 3. substitute placeholders from the options.
//!
//! ## Quick Start
//!
//! ```
//! use polyglot_rs_core::dictionary::Dictionary;
//! use polyglot_rs_core::engine::{Polyglot, PolyglotOptions, TranslateOptions};
//!
//! let phrases = Dictionary::new()
//!     .leaf("hello", "Hello, %{name}!")
//!     .leaf("cars", "%{smart_count} car |||| %{smart_count} cars");
//! let polyglot = Polyglot::new(PolyglotOptions::new().with_phrases(phrases)).unwrap();
//!
//! assert_eq!(
//!     polyglot.translate_with("hello", TranslateOptions::new().with("name", "Ada")),
//!     "Hello, Ada!"
//! );
//! assert_eq!(polyglot.translate_with("cars", 1), "1 car");
//! assert_eq!(polyglot.translate_with("cars", 3), "3 cars");
//! ```
//!
//! ## Concurrency
//!
//! Lookups take `&self`; the plural-family cache behind them is guarded by a
//! per-instance lock. Every mutation (`extend`, `unset`, `clear`, `replace`,
//! `set_locale`, `set_plural_rules`) takes `&mut self`, so an engine shared
//! between threads must sit behind a `RwLock` or `Mutex`.

use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::dictionary::Dictionary;
use crate::error::I18nResult;
use crate::interpolation::{display_value, Substitutions, TokenInterpolator, PLURAL_DELIMITER};
use crate::phrases::{PhraseStore, UnsetTarget};
use crate::plural::PluralRules;
use crate::resolver::PluralResolver;
use crate::settings::{InterpolationSettings, Settings};

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// The option name that carries the plural count.
pub const SMART_COUNT: &str = "smart_count";

/// The option name that carries the default phrase in JSON options.
pub const DEFAULT_PHRASE: &str = "_";

/// Custom handling for keys with no phrase.
pub type MissingKeyHandler = Arc<dyn Fn(&MissingKey<'_>) -> String + Send + Sync>;

/// Destination for missing-key warnings.
pub type WarnSink = Arc<dyn Fn(&str) + Send + Sync>;

// ── Translate options ────────────────────────────────────────────────────

/// Runtime data for one translation: placeholder values, the plural count,
/// and an optional default phrase.
///
/// A bare count converts into options carrying only `smart_count`:
///
/// ```
/// use polyglot_rs_core::engine::TranslateOptions;
///
/// let opts = TranslateOptions::from(4);
/// assert_eq!(opts.smart_count(), Some(4));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslateOptions {
    smart_count: Option<u64>,
    default_phrase: Option<String>,
    values: serde_json::Map<String, serde_json::Value>,
}

impl TranslateOptions {
    /// Empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options carrying only a plural count.
    pub fn count(count: u64) -> Self {
        Self::new().with_count(count)
    }

    /// Sets a placeholder value. `null` leaves the placeholder untouched.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let name = name.into();
        let value = value.into();
        match name.as_str() {
            SMART_COUNT => self.smart_count = count_from_value(&value),
            DEFAULT_PHRASE => self.default_phrase = value.as_str().map(str::to_string),
            _ => {}
        }
        self.values.insert(name, value);
        self
    }

    /// Sets the plural count.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.smart_count = Some(count);
        self.values.insert(SMART_COUNT.to_string(), count.into());
        self
    }

    /// Sets the phrase used when the key is not in the store.
    #[must_use]
    pub fn with_default(mut self, phrase: impl Into<String>) -> Self {
        let phrase = phrase.into();
        self.values
            .insert(DEFAULT_PHRASE.to_string(), phrase.clone().into());
        self.default_phrase = Some(phrase);
        self
    }

    /// The plural count, if any.
    ///
    /// Numbers and numeric strings count; negative or non-numeric values
    /// give `None` even though [`is_counted`](Self::is_counted) is `true`.
    pub const fn smart_count(&self) -> Option<u64> {
        self.smart_count
    }

    /// Returns `true` if a non-null `smart_count` is bound, so the phrase
    /// gets pluralized. A count that cannot be classified selects the first
    /// variant.
    pub fn is_counted(&self) -> bool {
        self.values
            .get(SMART_COUNT)
            .is_some_and(|value| !value.is_null())
    }

    /// The default phrase, if any.
    pub fn default_phrase(&self) -> Option<&str> {
        self.default_phrase.as_deref()
    }

    /// The raw value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.get(name)
    }

    /// Returns `true` if no values, count or default phrase are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Substitutions for TranslateOptions {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.values.get(name).and_then(display_value)
    }
}

impl From<u64> for TranslateOptions {
    fn from(count: u64) -> Self {
        Self::count(count)
    }
}

impl From<u32> for TranslateOptions {
    fn from(count: u32) -> Self {
        Self::count(u64::from(count))
    }
}

impl From<usize> for TranslateOptions {
    fn from(count: usize) -> Self {
        Self::count(count as u64)
    }
}

impl From<i32> for TranslateOptions {
    fn from(count: i32) -> Self {
        u64::try_from(count).map_or_else(|_| Self::new().with(SMART_COUNT, count), Self::count)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for TranslateOptions {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        map.into_iter()
            .fold(Self::new(), |opts, (name, value)| opts.with(name, value))
    }
}

/// Objects become named values (`smart_count` and `_` included), a number
/// becomes a bare count, anything else is empty options.
impl From<serde_json::Value> for TranslateOptions {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => map.into(),
            number @ serde_json::Value::Number(_) => Self::new().with(SMART_COUNT, number),
            _ => Self::new(),
        }
    }
}

/// Reads a count from a number or a numeric string. Fractions truncate.
fn count_from_value(value: &serde_json::Value) -> Option<u64> {
    match value {
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(count_from_f64))
        }
        other => other
            .as_u64()
            .or_else(|| other.as_f64().and_then(count_from_f64)),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn count_from_f64(f: f64) -> Option<u64> {
    (f.is_finite() && f >= 0.0).then_some(f as u64)
}

// ── Missing keys ─────────────────────────────────────────────────────────

/// Everything a [`MissingKeyHandler`] gets to see.
pub struct MissingKey<'a> {
    /// The key that had no phrase.
    pub key: &'a str,
    /// The options passed to the translation call.
    pub options: &'a TranslateOptions,
    /// The engine's current locale.
    pub locale: &'a str,
    /// The engine's placeholder pattern.
    pub interpolator: &'a TokenInterpolator,
    /// The engine's plural catalogue.
    pub plural_rules: &'a PluralRules,
}

impl MissingKey<'_> {
    /// Pluralizes and interpolates the key itself with the engine's settings.
    pub fn transform_key(&self) -> String {
        let family = self.plural_rules.family_for(self.locale);
        transform(
            self.key,
            self.options,
            |count| self.plural_rules.classify(family, count),
            self.interpolator,
        )
    }
}

/// How a key with no phrase and no default phrase is rendered.
///
/// Picked once when the engine is built: a handler wins over
/// `allow_missing`, which wins over warning.
#[derive(Clone)]
pub enum MissingKeyPolicy {
    /// Call the handler and return its result verbatim.
    Handler(MissingKeyHandler),
    /// Use the key as the phrase template.
    Passthrough,
    /// Report through the warn sink and return the key unchanged.
    Warn,
}

impl fmt::Debug for MissingKeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::Passthrough => f.write_str("Passthrough"),
            Self::Warn => f.write_str("Warn"),
        }
    }
}

fn default_warn_sink() -> WarnSink {
    Arc::new(|message: &str| tracing::warn!("{message}"))
}

// ── Construction options ─────────────────────────────────────────────────

/// Construction options for [`Polyglot`].
#[derive(Clone, Default)]
pub struct PolyglotOptions {
    /// Initial phrases.
    pub phrases: Dictionary,
    /// Initial locale; [`DEFAULT_LOCALE`] when `None` or empty.
    pub locale: Option<String>,
    /// Use missing keys as their own phrase template.
    pub allow_missing: bool,
    /// Custom missing-key handling; takes precedence over `allow_missing`.
    pub on_missing_key: Option<MissingKeyHandler>,
    /// Warning destination; `tracing::warn!` when `None`.
    pub warn: Option<WarnSink>,
    /// Placeholder delimiters; `%{` / `}` when `None`.
    pub interpolation: Option<InterpolationSettings>,
    /// Plural catalogue; the built-in one when `None`.
    pub plural_rules: Option<PluralRules>,
}

impl fmt::Debug for PolyglotOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolyglotOptions")
            .field("phrases", &self.phrases)
            .field("locale", &self.locale)
            .field("allow_missing", &self.allow_missing)
            .field("on_missing_key", &self.on_missing_key.is_some())
            .field("warn", &self.warn.is_some())
            .field("interpolation", &self.interpolation)
            .field("plural_rules", &self.plural_rules)
            .finish()
    }
}

impl PolyglotOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds options from settings, loading every configured dictionary file
    /// in order.
    pub fn from_settings(settings: &Settings) -> I18nResult<Self> {
        let mut phrases = Dictionary::new();
        for path in &settings.dictionaries {
            phrases.merge(Dictionary::from_file(path)?);
        }
        Ok(Self {
            phrases,
            locale: Some(settings.locale.clone()),
            allow_missing: settings.allow_missing,
            interpolation: Some(settings.interpolation.clone()),
            ..Self::default()
        })
    }

    /// Sets the initial phrase tree.
    #[must_use]
    pub fn with_phrases(mut self, phrases: Dictionary) -> Self {
        self.phrases = phrases;
        self
    }

    /// Sets the initial locale.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Uses missing keys as their own phrase template.
    #[must_use]
    pub const fn with_allow_missing(mut self, allow_missing: bool) -> Self {
        self.allow_missing = allow_missing;
        self
    }

    /// Installs a custom missing-key handler. It wins over `allow_missing`.
    #[must_use]
    pub fn with_missing_key_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&MissingKey<'_>) -> String + Send + Sync + 'static,
    {
        self.on_missing_key = Some(Arc::new(handler));
        self
    }

    /// Sends missing-key warnings to `warn` instead of `tracing`.
    #[must_use]
    pub fn with_warn<F>(mut self, warn: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.warn = Some(Arc::new(warn));
        self
    }

    /// Sets the placeholder delimiters. Empty strings keep the defaults.
    #[must_use]
    pub fn with_interpolation(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.interpolation = Some(InterpolationSettings {
            prefix: prefix.into(),
            suffix: suffix.into(),
        });
        self
    }

    /// Replaces the built-in plural catalogue.
    #[must_use]
    pub fn with_plural_rules(mut self, rules: PluralRules) -> Self {
        self.plural_rules = Some(rules);
        self
    }
}

// ── Engine ───────────────────────────────────────────────────────────────

/// Phrase lookup, pluralization and interpolation for one locale at a time.
#[derive(Clone)]
pub struct Polyglot {
    phrases: PhraseStore,
    locale: String,
    resolver: PluralResolver,
    interpolator: TokenInterpolator,
    missing_key: MissingKeyPolicy,
    warn: WarnSink,
}

impl fmt::Debug for Polyglot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polyglot")
            .field("phrases", &self.phrases.len())
            .field("locale", &self.locale)
            .field("interpolator", &self.interpolator.pattern().as_str())
            .field("missing_key", &self.missing_key)
            .field("plural_rules", self.resolver.rules())
            .finish_non_exhaustive()
    }
}

impl Default for Polyglot {
    fn default() -> Self {
        Self::from_parts(
            PolyglotOptions::default(),
            TokenInterpolator::default(),
        )
    }
}

impl Polyglot {
    /// Builds an engine. Fails only on an invalid interpolation setup, before
    /// any phrase is stored.
    pub fn new(options: PolyglotOptions) -> I18nResult<Self> {
        let interpolator = match &options.interpolation {
            Some(delimiters) => {
                TokenInterpolator::new(Some(&delimiters.prefix), Some(&delimiters.suffix))?
            }
            None => TokenInterpolator::default(),
        };
        Ok(Self::from_parts(options, interpolator))
    }

    fn from_parts(options: PolyglotOptions, interpolator: TokenInterpolator) -> Self {
        let missing_key = match options.on_missing_key {
            Some(handler) => MissingKeyPolicy::Handler(handler),
            None if options.allow_missing => MissingKeyPolicy::Passthrough,
            None => MissingKeyPolicy::Warn,
        };
        let locale = options
            .locale
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let mut phrases = PhraseStore::new();
        phrases.extend(&options.phrases, None);
        tracing::debug!(phrases = phrases.len(), locale = %locale, "created translation engine");

        Self {
            phrases,
            locale,
            resolver: PluralResolver::new(options.plural_rules.unwrap_or_default()),
            interpolator,
            missing_key,
            warn: options.warn.unwrap_or_else(default_warn_sink),
        }
    }

    // ── Translation ──────────────────────────────────────────────────

    /// Translates `key` with no runtime data.
    pub fn translate(&self, key: &str) -> String {
        self.translate_with(key, TranslateOptions::new())
    }

    /// Translates `key` with placeholder values, a count, or a default phrase.
    ///
    /// Missing keys never fail: see [`MissingKeyPolicy`].
    pub fn translate_with(&self, key: &str, options: impl Into<TranslateOptions>) -> String {
        let options = options.into();

        let phrase = self
            .phrases
            .get(key)
            .or_else(|| options.default_phrase());

        match phrase {
            Some(phrase) => self.transform(phrase, &options),
            None => self.handle_missing(key, &options),
        }
    }

    /// Pluralizes and interpolates an arbitrary phrase with this engine's
    /// locale, plural rules and placeholder pattern.
    pub fn transform(&self, phrase: &str, options: &TranslateOptions) -> String {
        transform(
            phrase,
            options,
            |count| self.resolver.variant_for(&self.locale, count),
            &self.interpolator,
        )
    }

    fn handle_missing(&self, key: &str, options: &TranslateOptions) -> String {
        match &self.missing_key {
            MissingKeyPolicy::Handler(handler) => handler(&MissingKey {
                key,
                options,
                locale: &self.locale,
                interpolator: &self.interpolator,
                plural_rules: self.resolver.rules(),
            }),
            MissingKeyPolicy::Passthrough => self.transform(key, options),
            MissingKeyPolicy::Warn => {
                (self.warn)(&format!("Missing translation for key: \"{key}\""));
                key.to_string()
            }
        }
    }

    /// Returns `true` if a phrase is stored under exactly `key`.
    pub fn has(&self, key: &str) -> bool {
        self.phrases.has(key)
    }

    // ── Locale ───────────────────────────────────────────────────────

    /// The current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Switches locale and returns the locale now in effect. An empty locale
    /// is ignored.
    pub fn set_locale(&mut self, locale: &str) -> &str {
        if !locale.is_empty() && locale != self.locale {
            tracing::debug!(from = %self.locale, to = locale, "changed locale");
            self.locale = locale.to_string();
        }
        &self.locale
    }

    // ── Phrases ──────────────────────────────────────────────────────

    /// Adds every leaf of `tree` under `prefix`, overwriting existing keys.
    pub fn extend(&mut self, tree: &Dictionary, prefix: Option<&str>) {
        let before = self.phrases.len();
        self.phrases.extend(tree, prefix);
        tracing::debug!(
            prefix = prefix.unwrap_or(""),
            added = self.phrases.len().saturating_sub(before),
            total = self.phrases.len(),
            "extended phrases"
        );
    }

    /// Removes one key, or every leaf a tree would add under `prefix`.
    pub fn unset<'a>(&mut self, target: impl Into<UnsetTarget<'a>>, prefix: Option<&str>) {
        self.phrases.unset(target, prefix);
    }

    /// Removes every phrase.
    pub fn clear(&mut self) {
        self.phrases.clear();
    }

    /// Replaces all phrases with `tree`.
    pub fn replace(&mut self, tree: &Dictionary) {
        self.phrases.replace(tree);
        tracing::debug!(total = self.phrases.len(), "replaced phrases");
    }

    /// Read access to the flat phrase map.
    pub const fn phrases(&self) -> &PhraseStore {
        &self.phrases
    }

    // ── Configuration ────────────────────────────────────────────────

    /// The active plural catalogue.
    pub const fn plural_rules(&self) -> &PluralRules {
        self.resolver.rules()
    }

    /// Swaps the plural catalogue at runtime.
    pub fn set_plural_rules(&mut self, rules: PluralRules) {
        tracing::debug!(families = ?rules.families(), "replaced plural rules");
        self.resolver.set_rules(rules);
    }

    /// The plural resolver, including its locale cache.
    pub const fn resolver(&self) -> &PluralResolver {
        &self.resolver
    }

    /// The placeholder pattern.
    pub const fn interpolator(&self) -> &TokenInterpolator {
        &self.interpolator
    }

    /// The missing-key strategy chosen at construction.
    pub const fn missing_key_policy(&self) -> &MissingKeyPolicy {
        &self.missing_key
    }
}

// ── Phrase transformation ────────────────────────────────────────────────

/// Pluralizes and interpolates `phrase` with the built-in plural rules and the
/// default `%{...}` placeholders. `locale` defaults to [`DEFAULT_LOCALE`].
///
/// # Examples
///
/// ```
/// use polyglot_rs_core::engine::{transform_phrase, TranslateOptions};
///
/// let phrase = "%{smart_count} plik |||| %{smart_count} pliki |||| %{smart_count} plików";
/// assert_eq!(transform_phrase(phrase, &TranslateOptions::count(3), Some("pl")), "3 pliki");
/// assert_eq!(transform_phrase(phrase, &TranslateOptions::count(5), Some("pl")), "5 plików");
/// ```
pub fn transform_phrase(phrase: &str, options: &TranslateOptions, locale: Option<&str>) -> String {
    static DEFAULT_RULES: OnceLock<PluralRules> = OnceLock::new();
    static DEFAULT_INTERPOLATOR: OnceLock<TokenInterpolator> = OnceLock::new();

    let rules = DEFAULT_RULES.get_or_init(PluralRules::default);
    let interpolator = DEFAULT_INTERPOLATOR.get_or_init(TokenInterpolator::default);
    let family = rules.family_for(locale.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LOCALE));

    transform(
        phrase,
        options,
        |count| rules.classify(family, count),
        interpolator,
    )
}

/// Selects the plural variant (if counted) and substitutes placeholders.
///
/// An out-of-range or empty variant falls back to the first one. A count the
/// classifier cannot take, or a missing classifier, selects the first one too.
fn transform<F>(
    phrase: &str,
    options: &TranslateOptions,
    variant_for: F,
    interpolator: &TokenInterpolator,
) -> String
where
    F: FnOnce(u64) -> Option<usize>,
{
    let selected = if options.is_counted() && !phrase.is_empty() {
        let texts: Vec<&str> = phrase.split(PLURAL_DELIMITER).collect();
        let index = options.smart_count().and_then(variant_for).unwrap_or(0);
        texts
            .get(index)
            .copied()
            .filter(|text| !text.is_empty())
            .or_else(|| texts.first().copied())
            .unwrap_or(phrase)
            .trim()
    } else {
        phrase
    };

    interpolator.interpolate(selected, options)
}
