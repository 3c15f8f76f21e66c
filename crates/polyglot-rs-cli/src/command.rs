//! Management command framework.
//!
//! [`ManagementCommand`] defines a CLI subcommand; [`CommandRegistry`]
//! collects them, builds the clap application and dispatches parsed
//! arguments.
//!
//! ## Defining a Custom Command
//!
//! ```rust
//! use std::io::Write;
//! use polyglot_rs_cli::command::ManagementCommand;
//! use polyglot_rs_core::{I18nError, Settings};
//!
//! struct LocaleCommand;
//!
//! impl ManagementCommand for LocaleCommand {
//!     fn name(&self) -> &'static str { "locale" }
//!     fn help(&self) -> &'static str { "Print the configured locale" }
//!
//!     fn handle(
//!         &self,
//!         _matches: &clap::ArgMatches,
//!         settings: &Settings,
//!         out: &mut dyn Write,
//!     ) -> Result<(), I18nError> {
//!         writeln!(out, "{}", settings.locale)?;
//!         Ok(())
//!     }
//! }
//! ```

use std::collections::HashMap;
use std::io::Write;

use polyglot_rs_core::{I18nError, Settings};

/// A command that can be registered and invoked through the CLI.
pub trait ManagementCommand: Send + Sync {
    /// Returns the name of this command (used to invoke it from the CLI).
    fn name(&self) -> &'static str;

    /// Returns a short help description for this command.
    fn help(&self) -> &'static str;

    /// Adds custom arguments to the clap command.
    ///
    /// The default implementation returns the command unchanged.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Executes the command, writing its output to `out`.
    fn handle(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), I18nError>;
}

/// A registry of management commands, keyed by name.
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn ManagementCommand>>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registers a command, replacing any command with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns the command with the given name, if registered.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Returns a sorted list of all registered command names.
    pub fn list_commands(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no commands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the top-level clap `Command` with every registered subcommand
    /// and the global `--settings` option.
    pub fn build_cli(&self) -> clap::Command {
        let mut app = clap::Command::new("polyglot")
            .about("polyglot-rs translation utility")
            .subcommand_required(true)
            .arg(
                clap::Arg::new("settings")
                    .long("settings")
                    .global(true)
                    .value_name("FILE")
                    .help("TOML or JSON settings file"),
            );

        let mut entries: Vec<_> = self.commands.iter().collect();
        entries.sort_by_key(|(name, _)| **name);

        for (name, cmd) in entries {
            let subcmd = clap::Command::new(*name).about(cmd.help());
            app = app.subcommand(cmd.add_arguments(subcmd));
        }

        app
    }

    /// Dispatches the parsed subcommand to its registered handler.
    pub fn execute(
        &self,
        matches: &clap::ArgMatches,
        settings: &Settings,
        out: &mut dyn Write,
    ) -> Result<(), I18nError> {
        let (name, sub_matches) = matches
            .subcommand()
            .ok_or_else(|| I18nError::Configuration("No subcommand specified".to_string()))?;

        let cmd = self
            .get(name)
            .ok_or_else(|| I18nError::Configuration(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "executing command");
        cmd.handle(sub_matches, settings, out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoCommand {
        cmd_name: &'static str,
    }

    impl ManagementCommand for EchoCommand {
        fn name(&self) -> &'static str {
            self.cmd_name
        }

        fn help(&self) -> &'static str {
            "Echo the locale"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("loud")
                    .long("loud")
                    .action(clap::ArgAction::SetTrue),
            )
        }

        fn handle(
            &self,
            matches: &clap::ArgMatches,
            settings: &Settings,
            out: &mut dyn Write,
        ) -> Result<(), I18nError> {
            if matches.get_flag("loud") {
                writeln!(out, "{}", settings.locale.to_uppercase())?;
            } else {
                writeln!(out, "{}", settings.locale)?;
            }
            Ok(())
        }
    }

    struct FailingCommand;

    impl ManagementCommand for FailingCommand {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn help(&self) -> &'static str {
            "A command that always fails"
        }

        fn handle(
            &self,
            _matches: &clap::ArgMatches,
            _settings: &Settings,
            _out: &mut dyn Write,
        ) -> Result<(), I18nError> {
            Err(I18nError::Configuration("deliberate failure".to_string()))
        }
    }

    #[test]
    fn test_registry_new_is_empty() {
        let registry = CommandRegistry::default();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").map(|c| c.help()), Some("Echo the locale"));
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_list_commands_sorted() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "zebra" }));
        registry.register(Box::new(EchoCommand { cmd_name: "alpha" }));
        registry.register(Box::new(EchoCommand { cmd_name: "alpha" }));
        assert_eq!(registry.list_commands(), vec!["alpha", "zebra"]);
    }

    #[test]
    fn test_execute_with_arguments() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));

        let matches = registry
            .build_cli()
            .try_get_matches_from(["polyglot", "echo", "--loud"])
            .unwrap();
        let settings = Settings {
            locale: "fr".into(),
            ..Settings::default()
        };
        let mut out = Vec::new();
        registry.execute(&matches, &settings, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "FR\n");
    }

    #[test]
    fn test_global_settings_arg() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(EchoCommand { cmd_name: "echo" }));
        let matches = registry
            .build_cli()
            .try_get_matches_from(["polyglot", "echo", "--settings", "p.toml"])
            .unwrap();
        assert_eq!(
            matches.get_one::<String>("settings").map(String::as_str),
            Some("p.toml")
        );
    }

    #[test]
    fn test_execute_failing_command() {
        let mut registry = CommandRegistry::new();
        registry.register(Box::new(FailingCommand));
        let matches = registry
            .build_cli()
            .try_get_matches_from(["polyglot", "fail"])
            .unwrap();
        let result = registry.execute(&matches, &Settings::default(), &mut Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        let registry = CommandRegistry::new();
        assert!(registry.build_cli().try_get_matches_from(["polyglot"]).is_err());
    }
}
