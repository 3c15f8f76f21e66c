//! The `translate` command.
//!
//! Builds an engine from settings plus command line overrides and prints the
//! translation of one key.
//!
//! ```text
//! polyglot translate inbox.unread --dict locales/ru.json --locale ru --count 3
//! polyglot translate greeting --dict en.json --var name=Ada
//! ```

use std::io::Write;
use std::path::PathBuf;

use polyglot_rs_core::{I18nError, Polyglot, PolyglotOptions, Settings, TranslateOptions};

use crate::command::ManagementCommand;

/// Prints the translation of a key.
pub struct TranslateCommand;

impl ManagementCommand for TranslateCommand {
    fn name(&self) -> &'static str {
        "translate"
    }

    fn help(&self) -> &'static str {
        "Translate a key with the configured dictionaries"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("key")
                .required(true)
                .help("Dotted phrase key"),
        )
        .arg(
            clap::Arg::new("locale")
                .long("locale")
                .help("Locale to translate into (overrides settings)"),
        )
        .arg(
            clap::Arg::new("dict")
                .long("dict")
                .value_name("FILE")
                .action(clap::ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON dictionary file, merged after the configured ones"),
        )
        .arg(
            clap::Arg::new("count")
                .long("count")
                .value_parser(clap::value_parser!(u64))
                .help("Plural count, also available as %{smart_count}"),
        )
        .arg(
            clap::Arg::new("var")
                .long("var")
                .value_name("NAME=VALUE")
                .action(clap::ArgAction::Append)
                .help("Placeholder value"),
        )
        .arg(
            clap::Arg::new("default")
                .long("default")
                .help("Phrase used when the key is missing"),
        )
        .arg(
            clap::Arg::new("allow-missing")
                .long("allow-missing")
                .action(clap::ArgAction::SetTrue)
                .help("Use a missing key as its own phrase"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), I18nError> {
        let key = matches
            .get_one::<String>("key")
            .ok_or_else(|| I18nError::Configuration("key is required".to_string()))?;

        let mut settings = settings.clone();
        if let Some(locale) = matches.get_one::<String>("locale") {
            settings.locale.clone_from(locale);
        }
        if let Some(dicts) = matches.get_many::<PathBuf>("dict") {
            settings.dictionaries.extend(dicts.cloned());
        }
        settings.allow_missing |= matches.get_flag("allow-missing");

        let polyglot = Polyglot::new(PolyglotOptions::from_settings(&settings)?)?;
        let options = build_options(matches)?;

        writeln!(out, "{}", polyglot.translate_with(key, options))?;
        Ok(())
    }
}

fn build_options(matches: &clap::ArgMatches) -> Result<TranslateOptions, I18nError> {
    let mut options = TranslateOptions::new();

    if let Some(vars) = matches.get_many::<String>("var") {
        for var in vars {
            let (name, value) = parse_var(var)?;
            options = options.with(name, value);
        }
    }
    if let Some(default) = matches.get_one::<String>("default") {
        options = options.with_default(default.as_str());
    }
    if let Some(count) = matches.get_one::<u64>("count") {
        options = options.with_count(*count);
    }

    Ok(options)
}

/// Splits `name=value`. The value may itself contain `=`.
fn parse_var(var: &str) -> Result<(&str, &str), I18nError> {
    match var.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, value)),
        _ => Err(I18nError::Configuration(format!(
            "Invalid --var '{var}': expected NAME=VALUE"
        ))),
    }
}
