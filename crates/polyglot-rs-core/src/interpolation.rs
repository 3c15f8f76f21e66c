//! Placeholder substitution.
//!
//! A [`TokenInterpolator`] compiles `prefix (.*?) suffix` once and replaces
//! each match whose name is known to a [`Substitutions`] source. Unknown
//! placeholders, and placeholders bound to `null`, are left exactly as
//! written, delimiters included.
//!
//! ```
//! use std::collections::HashMap;
//! use polyglot_rs_core::interpolation::TokenInterpolator;
//!
//! let interpolator = TokenInterpolator::default();
//! let vars = HashMap::from([("name", "Ada")]);
//! assert_eq!(interpolator.interpolate("Hello, %{name}!", &vars), "Hello, Ada!");
//! assert_eq!(interpolator.interpolate("Bye %{other}", &vars), "Bye %{other}");
//! ```

use std::borrow::{Borrow, Cow};
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::error::{I18nError, I18nResult};

/// Separates plural variants inside a phrase template.
pub const PLURAL_DELIMITER: &str = "||||";

/// Default placeholder prefix.
pub const DEFAULT_PREFIX: &str = "%{";

/// Default placeholder suffix.
pub const DEFAULT_SUFFIX: &str = "}";

/// A source of placeholder values.
pub trait Substitutions {
    /// Returns the display value for `name`, or `None` to leave the
    /// placeholder untouched.
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>>;
}

impl<T: Substitutions + ?Sized> Substitutions for &T {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        (**self).lookup(name)
    }
}

impl<K, V, S> Substitutions for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|v| Cow::Borrowed(v.as_ref()))
    }
}

impl Substitutions for serde_json::Map<String, serde_json::Value> {
    fn lookup(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(display_value)
    }
}

/// Renders a JSON value the way it should appear inside a phrase.
///
/// Strings are inserted verbatim, `null` counts as absent, integral floats
/// drop their fraction (`5.0` renders as `5`), everything else uses its JSON
/// text.
pub(crate) fn display_value(value: &serde_json::Value) -> Option<Cow<'_, str>> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        serde_json::Value::Number(n) => Some(Cow::Owned(display_number(n))),
        other => Some(Cow::Owned(other.to_string())),
    }
}

fn display_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{f:.0}")
            }
        }
        _ => n.to_string(),
    }
}

/// Compiled placeholder pattern.
#[derive(Debug, Clone)]
pub struct TokenInterpolator {
    prefix: String,
    suffix: String,
    pattern: Regex,
}

impl Default for TokenInterpolator {
    fn default() -> Self {
        static DEFAULT_PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = DEFAULT_PATTERN
            .get_or_init(|| Regex::new(r"%\{(.*?)\}").expect("default token pattern is valid"));
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            pattern: pattern.clone(),
        }
    }
}

impl TokenInterpolator {
    /// Compiles a pattern for the given delimiters.
    ///
    /// `None` or an empty string selects the default delimiter. Delimiters are
    /// matched literally. Fails with [`I18nError::ReservedDelimiter`] if
    /// either one is [`PLURAL_DELIMITER`].
    pub fn new(prefix: Option<&str>, suffix: Option<&str>) -> I18nResult<Self> {
        let prefix = prefix.filter(|p| !p.is_empty()).unwrap_or(DEFAULT_PREFIX);
        let suffix = suffix.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SUFFIX);

        if prefix == PLURAL_DELIMITER || suffix == PLURAL_DELIMITER {
            return Err(I18nError::ReservedDelimiter {
                delimiter: PLURAL_DELIMITER.to_string(),
            });
        }

        let source = format!("{}(.*?){}", regex::escape(prefix), regex::escape(suffix));
        let pattern = Regex::new(&source).map_err(|e| I18nError::InvalidPattern(e.to_string()))?;

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            pattern,
        })
    }

    /// The placeholder prefix in effect.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The placeholder suffix in effect.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The compiled pattern; capture group 1 is the placeholder name.
    pub const fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Replaces every known placeholder in `text`.
    pub fn interpolate<S>(&self, text: &str, substitutions: &S) -> String
    where
        S: Substitutions + ?Sized,
    {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| {
                substitutions.lookup(&caps[1]).map_or_else(
                    || caps[0].to_string(),
                    Cow::into_owned,
                )
            })
            .into_owned()
    }

    /// Names of all placeholders in `text`, in order of appearance.
    pub fn placeholders<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpolate_basic() {
        let interpolator = TokenInterpolator::default();
        let vars = HashMap::from([("name".to_string(), "Ada".to_string())]);
        assert_eq!(
            interpolator.interpolate("Hello, %{name}!", &vars),
            "Hello, Ada!"
        );
    }

    #[test]
    fn test_missing_placeholder_untouched() {
        let interpolator = TokenInterpolator::default();
        let vars: HashMap<&str, &str> = HashMap::new();
        assert_eq!(interpolator.interpolate("Hi %{name}", &vars), "Hi %{name}");
    }

    #[test]
    fn test_repeated_and_multiple_placeholders() {
        let interpolator = TokenInterpolator::default();
        let vars = HashMap::from([("a", "1"), ("b", "2")]);
        assert_eq!(
            interpolator.interpolate("%{a}+%{a}=%{b}, %{c}", &vars),
            "1+1=2, %{c}"
        );
    }

    #[test]
    fn test_no_recursive_substitution() {
        let interpolator = TokenInterpolator::default();
        let vars = HashMap::from([("a", "%{b}"), ("b", "nope")]);
        assert_eq!(interpolator.interpolate("%{a}", &vars), "%{b}");
    }

    #[test]
    fn test_json_values() {
        let interpolator = TokenInterpolator::default();
        let vars = json!({ "n": 5, "s": "text", "flag": true, "gone": null });
        let map = vars.as_object().unwrap();
        assert_eq!(
            interpolator.interpolate("%{n} %{s} %{flag} %{gone}", map),
            "5 text true %{gone}"
        );
    }

    #[test]
    fn test_integral_floats_render_without_fraction() {
        let interpolator = TokenInterpolator::default();
        let vars = json!({ "whole": 5.0, "zero": -0.0, "part": 2.5 });
        let map = vars.as_object().unwrap();
        assert_eq!(
            interpolator.interpolate("%{whole} %{zero} %{part}", map),
            "5 0 2.5"
        );
    }

    #[test]
    fn test_custom_delimiters() {
        let interpolator = TokenInterpolator::new(Some("{{"), Some("}}")).unwrap();
        let vars = HashMap::from([("place", "Paris")]);
        assert_eq!(
            interpolator.interpolate("Welcome to {{place}}, not %{place}", &vars),
            "Welcome to Paris, not %{place}"
        );
        assert_eq!(interpolator.prefix(), "{{");
        assert_eq!(interpolator.suffix(), "}}");
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let interpolator = TokenInterpolator::new(Some("$("), Some(")")).unwrap();
        let vars = HashMap::from([("x", "ok")]);
        assert_eq!(interpolator.interpolate("[$(x)]", &vars), "[ok]");
    }

    #[test]
    fn test_empty_delimiters_use_defaults() {
        let interpolator = TokenInterpolator::new(Some(""), None).unwrap();
        assert_eq!(interpolator.prefix(), DEFAULT_PREFIX);
        assert_eq!(interpolator.suffix(), DEFAULT_SUFFIX);
    }

    #[test]
    fn test_reserved_delimiter_rejected() {
        let err = TokenInterpolator::new(Some("||||"), None).unwrap_err();
        assert!(matches!(err, I18nError::ReservedDelimiter { .. }));
        let err = TokenInterpolator::new(None, Some("||||")).unwrap_err();
        assert!(matches!(err, I18nError::ReservedDelimiter { .. }));
    }

    #[test]
    fn test_placeholders() {
        let interpolator = TokenInterpolator::default();
        assert_eq!(
            interpolator.placeholders("%{a} and %{smart_count} of %{a}"),
            vec!["a", "smart_count", "a"]
        );
        assert!(interpolator.placeholders("plain").is_empty());
    }

    #[test]
    fn test_lazy_match_stops_at_first_suffix() {
        let interpolator = TokenInterpolator::default();
        let vars = HashMap::from([("a", "A")]);
        assert_eq!(interpolator.interpolate("%{a}}", &vars), "A}");
    }
}
