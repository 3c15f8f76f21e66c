//! The `keys` command.
//!
//! Prints every dotted key the configured dictionaries flatten to, sorted,
//! one per line.

use std::io::Write;
use std::path::PathBuf;

use polyglot_rs_core::{Dictionary, I18nError, PhraseStore, Settings};

use crate::command::ManagementCommand;

/// Lists flattened dictionary keys.
pub struct KeysCommand;

impl ManagementCommand for KeysCommand {
    fn name(&self) -> &'static str {
        "keys"
    }

    fn help(&self) -> &'static str {
        "List every phrase key in the configured dictionaries"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("dict")
                .long("dict")
                .value_name("FILE")
                .action(clap::ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON dictionary file, merged after the configured ones"),
        )
        .arg(
            clap::Arg::new("prefix")
                .long("prefix")
                .help("Prefix prepended to every key"),
        )
    }

    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), I18nError> {
        let extra = matches
            .get_many::<PathBuf>("dict")
            .into_iter()
            .flatten();

        let mut store = PhraseStore::new();
        let prefix = matches.get_one::<String>("prefix").map(String::as_str);
        for path in settings.dictionaries.iter().chain(extra) {
            store.extend(&Dictionary::from_file(path)?, prefix);
        }

        for key in store.keys() {
            writeln!(out, "{key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_sorted_and_prefixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.json");
        std::fs::write(&path, r#"{"b": "B", "a": {"y": "Y", "x": "X"}}"#).unwrap();

        let cmd = KeysCommand.add_arguments(clap::Command::new("keys"));
        let matches = cmd
            .try_get_matches_from(["keys", "--dict", path.to_str().unwrap(), "--prefix", "app"])
            .unwrap();

        let mut out = Vec::new();
        KeysCommand
            .handle(&matches, &Settings::default(), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "app.a.x\napp.a.y\napp.b\n");
    }

    #[test]
    fn test_keys_invalid_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"n": 1}"#).unwrap();

        let settings = Settings {
            dictionaries: vec![path],
            ..Settings::default()
        };
        let matches = KeysCommand
            .add_arguments(clap::Command::new("keys"))
            .try_get_matches_from(["keys"])
            .unwrap();
        let result = KeysCommand.handle(&matches, &settings, &mut Vec::new());
        assert!(matches!(result, Err(I18nError::InvalidDictionary(_))));
    }
}
