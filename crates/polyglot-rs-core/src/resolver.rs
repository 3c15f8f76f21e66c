//! Memoizing locale-to-plural-variant resolution.
//!
//! [`PluralResolver`] wraps a [`PluralRules`] catalogue and remembers which
//! family each locale resolved to. The cache belongs to one resolver (and so
//! to one engine); it starts empty and only ever holds locales that were
//! actually asked for.
//!
//! A cached family that is no longer present in the catalogue (after
//! [`PluralResolver::set_rules`]) is treated as a miss, recomputed and
//! re-cached.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::plural::PluralRules;

/// Plural variant selection with a per-instance locale cache.
#[derive(Debug, Default)]
pub struct PluralResolver {
    rules: PluralRules,
    cache: RwLock<HashMap<String, String>>,
}

impl Clone for PluralResolver {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            cache: RwLock::new(self.cached()),
        }
    }
}

impl PluralResolver {
    /// Creates a resolver over `rules` with an empty cache.
    pub fn new(rules: PluralRules) -> Self {
        Self {
            rules,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The active catalogue.
    pub const fn rules(&self) -> &PluralRules {
        &self.rules
    }

    /// Swaps the catalogue. Cached entries survive and are revalidated lazily.
    pub fn set_rules(&mut self, rules: PluralRules) {
        self.rules = rules;
    }

    /// Resolves the plural family for `locale`, consulting the cache first.
    ///
    /// # Examples
    ///
    /// ```
    /// use polyglot_rs_core::plural::PluralRules;
    /// use polyglot_rs_core::resolver::PluralResolver;
    ///
    /// let resolver = PluralResolver::new(PluralRules::default());
    /// assert_eq!(resolver.resolve_family("pl-PL"), "polish");
    /// assert_eq!(resolver.resolve_family("tlh"), "german");
    /// ```
    pub fn resolve_family(&self, locale: &str) -> String {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(family) = cache.get(locale) {
                if self.rules.has_family(family) {
                    return family.clone();
                }
            }
        }

        let family = self.rules.family_for(locale).to_string();
        tracing::trace!(locale, family = %family, "resolved plural family");
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(locale.to_string(), family.clone());
        family
    }

    /// Runs the classifier of `family` for `count`.
    ///
    /// Returns `None` when the family is not in the catalogue. Callers bound
    /// the index against the variants they actually have.
    pub fn resolve_variant(&self, family: &str, count: u64) -> Option<usize> {
        self.rules.classify(family, count)
    }

    /// Resolves the family for `locale` and classifies `count` with it.
    pub fn variant_for(&self, locale: &str, count: u64) -> Option<usize> {
        let family = self.resolve_family(locale);
        self.resolve_variant(&family, count)
    }

    /// Snapshot of the cache, for inspection.
    pub fn cached(&self) -> HashMap<String, String> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_variant_boundaries() {
        let resolver = PluralResolver::default();
        assert_eq!(resolver.resolve_variant("russian", 1), Some(0));
        assert_eq!(resolver.resolve_variant("russian", 2), Some(1));
        assert_eq!(resolver.resolve_variant("russian", 11), Some(2));
        assert_eq!(resolver.resolve_variant("russian", 21), Some(0));
        assert_eq!(resolver.resolve_variant("polish", 1), Some(0));
        assert_eq!(resolver.resolve_variant("polish", 22), Some(1));
        assert_eq!(resolver.resolve_variant("arabic", 0), Some(0));
        assert_eq!(resolver.resolve_variant("arabic", 3), Some(3));
        assert_eq!(resolver.resolve_variant("arabic", 11), Some(4));
        assert_eq!(resolver.resolve_variant("arabic", 100), Some(5));
    }

    #[test]
    fn test_cache_starts_empty_and_fills_on_demand() {
        let resolver = PluralResolver::default();
        assert!(resolver.cached().is_empty());

        assert_eq!(resolver.resolve_family("ru"), "russian");
        assert_eq!(resolver.resolve_family("fr-CA"), "french");
        assert_eq!(resolver.resolve_family("ru"), "russian");

        let cached = resolver.cached();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached.get("fr-CA").map(String::as_str), Some("french"));
    }

    #[test]
    fn test_stale_cache_entry_is_recomputed() {
        let mut resolver = PluralResolver::default();
        assert_eq!(resolver.resolve_family("ru"), "russian");

        let custom = PluralRules::empty()
            .with_family("slavic_custom", |n| usize::from(n != 1))
            .with_locales("slavic_custom", ["ru"]);
        resolver.set_rules(custom);

        assert_eq!(resolver.resolve_family("ru"), "slavic_custom");
        assert_eq!(
            resolver.cached().get("ru").map(String::as_str),
            Some("slavic_custom")
        );
    }

    #[test]
    fn test_cache_is_per_instance() {
        let a = PluralResolver::default();
        let b = PluralResolver::new(
            PluralRules::empty()
                .with_family("single", |_| 0)
                .with_locales("single", ["ru"]),
        );
        assert_eq!(a.resolve_family("ru"), "russian");
        assert_eq!(b.resolve_family("ru"), "single");
        assert_eq!(a.resolve_family("ru"), "russian");
    }

    #[test]
    fn test_missing_default_family_yields_none() {
        let resolver = PluralResolver::new(PluralRules::empty());
        assert_eq!(resolver.resolve_family("en"), "german");
        assert_eq!(resolver.variant_for("en", 5), None);
    }

    #[test]
    fn test_unregistered_family_uses_default_classifier() {
        let resolver = PluralResolver::new(PluralRules::default().with_locales("ghost", ["xx"]));
        assert_eq!(resolver.resolve_family("xx"), "german");
        assert_eq!(resolver.variant_for("xx", 5), Some(1));
        assert_eq!(resolver.variant_for("xx", 1), Some(0));
    }

    #[test]
    fn test_variant_for() {
        let resolver = PluralResolver::default();
        assert_eq!(resolver.variant_for("cs-CZ", 3), Some(1));
        assert_eq!(resolver.variant_for("sl-SL", 102), Some(1));
        assert_eq!(resolver.variant_for("ja", 7), Some(0));
    }

    #[test]
    fn test_clone_copies_cache() {
        let resolver = PluralResolver::default();
        resolver.resolve_family("lt");
        let copy = resolver.clone();
        assert_eq!(copy.cached().len(), 1);
    }
}
