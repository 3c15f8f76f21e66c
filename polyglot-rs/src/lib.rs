//! # polyglot-rs
//!
//! Phrase lookup, pluralization and token interpolation for localized display
//! strings.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `polyglot-rs` to get everything, or on
//! `polyglot-rs-core` alone when the command line front end is not needed.
//!
//! ```
//! use polyglot_rs::{Dictionary, Polyglot, PolyglotOptions};
//!
//! let phrases = Dictionary::from_json_str(
//!     r#"{"num_cars": "%{smart_count} car |||| %{smart_count} cars"}"#,
//! )
//! .unwrap();
//! let polyglot = Polyglot::new(PolyglotOptions::default().with_phrases(phrases)).unwrap();
//!
//! assert_eq!(polyglot.translate_with("num_cars", 1), "1 car");
//! assert_eq!(polyglot.translate_with("num_cars", 3), "3 cars");
//! ```

/// Engine, phrase store, plural rules, interpolation, settings and errors.
pub use polyglot_rs_core as core;

/// Command line front end.
#[cfg(feature = "cli")]
pub use polyglot_rs_cli as cli;

pub use polyglot_rs_core::{
    transform_phrase, Dictionary, I18nError, I18nResult, MissingKey, MissingKeyPolicy,
    PhraseNode, PhraseStore, PluralResolver, PluralRules, Polyglot, PolyglotOptions, Settings,
    Substitutions, TokenInterpolator, TranslateOptions, PLURAL_DELIMITER,
};

/// Re-exported so callers can build substitution maps without adding the
/// dependency themselves.
pub use serde_json;
/// Re-exported for installing subscribers and spans around translations.
pub use tracing;
