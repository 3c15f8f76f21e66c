//! Logging integration.
//!
//! The engine reports through [`tracing`]: missing keys are `warn` events
//! (unless a custom warn sink is installed), dictionary and locale changes are
//! `debug` events. This module sets up a subscriber from [`Settings`] and
//! provides a span for grouping translations by locale.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level`; an invalid filter falls
/// back to "info". Output goes to stderr. In debug mode a pretty,
/// human-readable format is used, otherwise structured JSON. Installing a
/// second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a span tagging every event inside it with `locale`.
///
/// # Examples
///
/// ```
/// use polyglot_rs_core::logging::translation_span;
///
/// let span = translation_span("fr");
/// let _guard = span.enter();
/// tracing::info!("rendering");
/// ```
pub fn translation_span(locale: &str) -> tracing::Span {
    tracing::info_span!("translation", locale)
}
