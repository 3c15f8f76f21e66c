//! Core error types for polyglot-rs.
//!
//! Only configuration and loading problems are errors. A missing translation
//! key or an unmatched placeholder never produces an [`I18nError`]: the engine
//! degrades to a visible string instead (the literal key or the literal token).

use thiserror::Error;

/// The error type for every fallible polyglot-rs operation.
#[derive(Error, Debug)]
pub enum I18nError {
    // ── Configuration ────────────────────────────────────────────────

    /// An interpolation delimiter collides with the plural separator.
    #[error("\"{delimiter}\" token is reserved for pluralization")]
    ReservedDelimiter {
        /// The reserved sequence that was rejected.
        delimiter: String,
    },

    /// The interpolation token pattern could not be compiled.
    #[error("Invalid token pattern: {0}")]
    InvalidPattern(String),

    /// A settings value is missing, malformed, or cannot be read.
    #[error("Configuration error: {0}")]
    Configuration(String),

    // ── Dictionaries ─────────────────────────────────────────────────

    /// A dictionary contains something other than phrases and nested maps.
    #[error("Invalid dictionary: {0}")]
    InvalidDictionary(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl I18nError {
    /// Returns `true` for errors raised while configuring an engine.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ReservedDelimiter { .. } | Self::InvalidPattern(_) | Self::Configuration(_)
        )
    }
}

/// A convenience type alias for `Result<T, I18nError>`.
pub type I18nResult<T> = Result<T, I18nError>;
