//! # polyglot-rs-core
//!
//! Turns a symbolic key plus optional runtime data into a locale-appropriate,
//! fully interpolated display string.
//!
//! ## Modules
//!
//! - [`dictionary`] - Nested phrase trees as authored in translation files
//! - [`phrases`] - Flat dotted-key phrase storage
//! - [`plural`] - The plural rule catalogue (families, classifiers, locales)
//! - [`resolver`] - Memoizing locale to plural-variant resolution
//! - [`interpolation`] - `%{placeholder}` substitution
//! - [`engine`] - The [`Polyglot`] translation engine
//! - [`error`] - Error types and result aliases
//! - [`settings`] / [`settings_loader`] - Configuration and TOML/JSON loading
//! - [`logging`] - Tracing-based logging integration
//!
//! ## Quick Start
//!
//! ```
//! use polyglot_rs_core::{Dictionary, Polyglot, PolyglotOptions, TranslateOptions};
//!
//! let phrases = Dictionary::from_json_str(r#"{
//!     "inbox": { "unread": "%{smart_count} unread message |||| %{smart_count} unread messages" }
//! }"#).unwrap();
//!
//! let polyglot = Polyglot::new(PolyglotOptions::new().with_phrases(phrases)).unwrap();
//! assert_eq!(polyglot.translate_with("inbox.unread", 1), "1 unread message");
//! assert_eq!(polyglot.translate_with("inbox.unread", TranslateOptions::count(4)), "4 unread messages");
//! assert_eq!(polyglot.translate("inbox.missing"), "inbox.missing");
//! ```

pub mod dictionary;
pub mod engine;
pub mod error;
pub mod interpolation;
pub mod logging;
pub mod phrases;
pub mod plural;
pub mod resolver;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use dictionary::{Dictionary, PhraseNode};
pub use engine::{
    transform_phrase, MissingKey, MissingKeyPolicy, Polyglot, PolyglotOptions, TranslateOptions,
};
pub use error::{I18nError, I18nResult};
pub use interpolation::{Substitutions, TokenInterpolator, PLURAL_DELIMITER};
pub use phrases::PhraseStore;
pub use plural::PluralRules;
pub use resolver::PluralResolver;
pub use settings::Settings;
