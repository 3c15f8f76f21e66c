//! Plural rule catalogue.
//!
//! A [`PluralRules`] value maps plural *family* names (`"german"`,
//! `"russian"`, ...) to classifier functions and maps locale codes to
//! families. A classifier turns a count into the zero-based index of the
//! variant to pick out of a `||||`-separated phrase template.
//!
//! | Family | Locales | Variants |
//! |---|---|---|
//! | `chinese` | id, id-ID, ja, ko, ko-KR, lo, ms, th, th-TH, zh | 1 |
//! | `german` | fa, da, de, en, es, fi, el, he, hi-IN, hu, hu-HU, it, nl, no, pt, sv, tr | 2 |
//! | `french` | fr, tl, pt-br | 2 |
//! | `russian` | ru, ru-RU | 3 |
//! | `bosnian_serbian` | bs-Latn-BA, bs-Cyrl-BA, srl-RS, sr-RS | 3 |
//! | `croatian` | hr, hr-HR | 3 |
//! | `arabic` | ar | 6 |
//! | `lithuanian` | lt | 3 |
//! | `czech` | cs, cs-CZ, sk | 3 |
//! | `polish` | pl | 3 |
//! | `icelandic` | is | 2 |
//! | `slovenian` | sl-SL | 4 |
//!
//! The catalogue can be replaced wholesale with a custom one built from
//! [`PluralRules::empty`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A classifier from count to variant index.
pub type PluralFn = Arc<dyn Fn(u64) -> usize + Send + Sync>;

/// The family used when neither the locale nor its language prefix is known.
pub const DEFAULT_FAMILY: &str = "german";

// ── Built-in classifiers ─────────────────────────────────────────────────

/// Single form.
pub const fn chinese(_n: u64) -> usize {
    0
}

/// `one` for exactly 1, `other` otherwise.
pub const fn german(n: u64) -> usize {
    if n == 1 {
        0
    } else {
        1
    }
}

/// `one` for 0 and 1, `other` otherwise.
pub const fn french(n: u64) -> usize {
    if n < 2 {
        0
    } else {
        1
    }
}

/// Shared by `russian`, `bosnian_serbian` and `croatian`.
pub const fn slavic(n: u64) -> usize {
    let last_two = n % 100;
    let end = last_two % 10;
    if last_two != 11 && end == 1 {
        return 0;
    }
    if end >= 2 && end <= 4 && !(last_two >= 12 && last_two <= 14) {
        return 1;
    }
    2
}

/// Six forms: 0, 1, 2, few (3..=10), many (11..=99), other.
#[allow(clippy::cast_possible_truncation)]
pub const fn arabic(n: u64) -> usize {
    if n < 3 {
        return n as usize;
    }
    let last_two = n % 100;
    if last_two >= 3 && last_two <= 10 {
        3
    } else if last_two >= 11 {
        4
    } else {
        5
    }
}

pub const fn lithuanian(n: u64) -> usize {
    if n % 10 == 1 && n % 100 != 11 {
        return 0;
    }
    if n % 10 >= 2 && n % 10 <= 9 && (n % 100 < 11 || n % 100 > 19) {
        1
    } else {
        2
    }
}

pub const fn czech(n: u64) -> usize {
    if n == 1 {
        0
    } else if n >= 2 && n <= 4 {
        1
    } else {
        2
    }
}

pub const fn polish(n: u64) -> usize {
    if n == 1 {
        return 0;
    }
    let end = n % 10;
    if end >= 2 && end <= 4 && (n % 100 < 10 || n % 100 >= 20) {
        1
    } else {
        2
    }
}

pub const fn icelandic(n: u64) -> usize {
    if n % 10 != 1 || n % 100 == 11 {
        1
    } else {
        0
    }
}

pub const fn slovenian(n: u64) -> usize {
    match n % 100 {
        1 => 0,
        2 => 1,
        3 | 4 => 2,
        _ => 3,
    }
}

const BUILTIN: &[(&str, fn(u64) -> usize, &[&str])] = &[
    ("arabic", arabic, &["ar"]),
    (
        "bosnian_serbian",
        slavic,
        &["bs-Latn-BA", "bs-Cyrl-BA", "srl-RS", "sr-RS"],
    ),
    (
        "chinese",
        chinese,
        &["id", "id-ID", "ja", "ko", "ko-KR", "lo", "ms", "th", "th-TH", "zh"],
    ),
    ("croatian", slavic, &["hr", "hr-HR"]),
    (
        "german",
        german,
        &[
            "fa", "da", "de", "en", "es", "fi", "el", "he", "hi-IN", "hu", "hu-HU", "it", "nl",
            "no", "pt", "sv", "tr",
        ],
    ),
    ("french", french, &["fr", "tl", "pt-br"]),
    ("russian", slavic, &["ru", "ru-RU"]),
    ("lithuanian", lithuanian, &["lt"]),
    ("czech", czech, &["cs", "cs-CZ", "sk"]),
    ("polish", polish, &["pl"]),
    ("icelandic", icelandic, &["is"]),
    ("slovenian", slovenian, &["sl-SL"]),
];

// ── Catalogue ────────────────────────────────────────────────────────────

/// Plural families and the locales that select them.
///
/// # Examples
///
/// ```
/// use polyglot_rs_core::plural::PluralRules;
///
/// let rules = PluralRules::default();
/// assert_eq!(rules.family_for("ru-RU"), "russian");
/// assert_eq!(rules.family_for("de-AT"), "german");
/// assert_eq!(rules.classify("russian", 22), Some(1));
/// ```
#[derive(Clone)]
pub struct PluralRules {
    families: HashMap<String, PluralFn>,
    locales: HashMap<String, String>,
    default_family: String,
}

impl Default for PluralRules {
    fn default() -> Self {
        let mut rules = Self::empty();
        for &(family, classifier, locales) in BUILTIN {
            rules = rules
                .with_family(family, classifier)
                .with_locales(family, locales.iter().copied());
        }
        rules
    }
}

impl fmt::Debug for PluralRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut families: Vec<&str> = self.families.keys().map(String::as_str).collect();
        families.sort_unstable();
        f.debug_struct("PluralRules")
            .field("families", &families)
            .field("locales", &self.locales.len())
            .field("default_family", &self.default_family)
            .finish()
    }
}

impl PluralRules {
    /// A catalogue with no families or locales, falling back to
    /// [`DEFAULT_FAMILY`].
    pub fn empty() -> Self {
        Self {
            families: HashMap::new(),
            locales: HashMap::new(),
            default_family: DEFAULT_FAMILY.to_string(),
        }
    }

    /// Registers (or replaces) a family classifier.
    #[must_use]
    pub fn with_family<F>(mut self, name: impl Into<String>, classifier: F) -> Self
    where
        F: Fn(u64) -> usize + Send + Sync + 'static,
    {
        self.families.insert(name.into(), Arc::new(classifier));
        self
    }

    /// Maps each locale to `family`. Later mappings win.
    #[must_use]
    pub fn with_locales<I, S>(mut self, family: &str, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for locale in locales {
            self.locales.insert(locale.into(), family.to_string());
        }
        self
    }

    /// Sets the family used for unknown locales.
    #[must_use]
    pub fn with_default_family(mut self, family: impl Into<String>) -> Self {
        self.default_family = family.into();
        self
    }

    /// The family used for unknown locales.
    pub fn default_family(&self) -> &str {
        &self.default_family
    }

    /// Returns `true` if a classifier is registered under `family`.
    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains_key(family)
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.families.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolves a locale to a family name without any caching.
    ///
    /// Tries the exact locale, then the part before the first `-`, then the
    /// default family. A mapping to a family with no registered classifier
    /// is skipped.
    pub fn family_for(&self, locale: &str) -> &str {
        let language = locale.split('-').next().unwrap_or(locale);
        [locale, language]
            .into_iter()
            .filter_map(|candidate| self.locales.get(candidate))
            .find(|family| self.has_family(family))
            .map_or(self.default_family.as_str(), String::as_str)
    }

    /// Runs the classifier of `family`, or `None` if it is not registered.
    pub fn classify(&self, family: &str, count: u64) -> Option<usize> {
        self.families.get(family).map(|classifier| classifier(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german() {
        assert_eq!(german(0), 1);
        assert_eq!(german(1), 0);
        assert_eq!(german(2), 1);
    }

    #[test]
    fn test_french() {
        assert_eq!(french(0), 0);
        assert_eq!(french(1), 0);
        assert_eq!(french(2), 1);
    }

    #[test]
    fn test_slavic() {
        assert_eq!(slavic(1), 0);
        assert_eq!(slavic(2), 1);
        assert_eq!(slavic(4), 1);
        assert_eq!(slavic(5), 2);
        assert_eq!(slavic(11), 2);
        assert_eq!(slavic(12), 2);
        assert_eq!(slavic(14), 2);
        assert_eq!(slavic(21), 0);
        assert_eq!(slavic(22), 1);
        assert_eq!(slavic(111), 2);
        assert_eq!(slavic(0), 2);
    }

    #[test]
    fn test_arabic() {
        assert_eq!(arabic(0), 0);
        assert_eq!(arabic(1), 1);
        assert_eq!(arabic(2), 2);
        assert_eq!(arabic(3), 3);
        assert_eq!(arabic(10), 3);
        assert_eq!(arabic(11), 4);
        assert_eq!(arabic(99), 4);
        assert_eq!(arabic(100), 5);
        assert_eq!(arabic(102), 5);
        assert_eq!(arabic(103), 3);
    }

    #[test]
    fn test_lithuanian() {
        assert_eq!(lithuanian(1), 0);
        assert_eq!(lithuanian(11), 2);
        assert_eq!(lithuanian(21), 0);
        assert_eq!(lithuanian(2), 1);
        assert_eq!(lithuanian(12), 2);
        assert_eq!(lithuanian(19), 2);
        assert_eq!(lithuanian(29), 1);
        assert_eq!(lithuanian(10), 2);
    }

    #[test]
    fn test_czech() {
        assert_eq!(czech(1), 0);
        assert_eq!(czech(2), 1);
        assert_eq!(czech(4), 1);
        assert_eq!(czech(5), 2);
        assert_eq!(czech(0), 2);
        assert_eq!(czech(22), 2);
    }

    #[test]
    fn test_polish() {
        assert_eq!(polish(1), 0);
        assert_eq!(polish(2), 1);
        assert_eq!(polish(5), 2);
        assert_eq!(polish(12), 2);
        assert_eq!(polish(22), 1);
        assert_eq!(polish(21), 2);
        assert_eq!(polish(112), 2);
    }

    #[test]
    fn test_icelandic() {
        assert_eq!(icelandic(1), 0);
        assert_eq!(icelandic(21), 0);
        assert_eq!(icelandic(11), 1);
        assert_eq!(icelandic(2), 1);
    }

    #[test]
    fn test_slovenian() {
        assert_eq!(slovenian(1), 0);
        assert_eq!(slovenian(101), 0);
        assert_eq!(slovenian(2), 1);
        assert_eq!(slovenian(3), 2);
        assert_eq!(slovenian(4), 2);
        assert_eq!(slovenian(5), 3);
        assert_eq!(slovenian(0), 3);
    }

    #[test]
    fn test_chinese() {
        assert_eq!(chinese(0), 0);
        assert_eq!(chinese(1), 0);
        assert_eq!(chinese(1000), 0);
    }

    #[test]
    fn test_default_catalogue_families() {
        let rules = PluralRules::default();
        assert_eq!(
            rules.families(),
            vec![
                "arabic",
                "bosnian_serbian",
                "chinese",
                "croatian",
                "czech",
                "french",
                "german",
                "icelandic",
                "lithuanian",
                "polish",
                "russian",
                "slovenian",
            ]
        );
        assert_eq!(rules.default_family(), "german");
    }

    #[test]
    fn test_family_for() {
        let rules = PluralRules::default();
        assert_eq!(rules.family_for("en"), "german");
        assert_eq!(rules.family_for("fr"), "french");
        assert_eq!(rules.family_for("pt-br"), "french");
        assert_eq!(rules.family_for("pt"), "german");
        assert_eq!(rules.family_for("pt-PT"), "german");
        assert_eq!(rules.family_for("ru-RU"), "russian");
        assert_eq!(rules.family_for("ru-UA"), "russian");
        assert_eq!(rules.family_for("sr-RS"), "bosnian_serbian");
        assert_eq!(rules.family_for("zh-Hant-TW"), "chinese");
        assert_eq!(rules.family_for("sl-SL"), "slovenian");
        assert_eq!(rules.family_for("xx"), "german");
        assert_eq!(rules.family_for(""), "german");
    }

    #[test]
    fn test_classify_unknown_family() {
        let rules = PluralRules::default();
        assert_eq!(rules.classify("klingon", 1), None);
        assert_eq!(rules.classify("arabic", 11), Some(4));
    }

    #[test]
    fn test_custom_catalogue() {
        let rules = PluralRules::empty()
            .with_family("binary", |n| usize::from(n % 2 == 1))
            .with_locales("binary", ["bn"])
            .with_default_family("binary");
        assert_eq!(rules.family_for("bn-XX"), "binary");
        assert_eq!(rules.family_for("en"), "binary");
        assert_eq!(rules.classify("binary", 3), Some(1));
        assert!(!rules.has_family("german"));
    }

    #[test]
    fn test_unregistered_family_falls_back_to_default() {
        let rules = PluralRules::default()
            .with_locales("ghost", ["xx", "ru-XX"])
            .with_default_family("french");
        assert_eq!(rules.family_for("xx"), "french");
        assert_eq!(rules.family_for("xx-YY"), "french");
        assert_eq!(rules.family_for("ru-XX"), "russian");
    }

    #[test]
    fn test_debug_lists_families() {
        let debug = format!("{:?}", PluralRules::default());
        assert!(debug.contains("PluralRules"));
        assert!(debug.contains("slovenian"));
    }
}
