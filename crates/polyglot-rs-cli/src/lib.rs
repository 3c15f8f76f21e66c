//! # polyglot-rs-cli
//!
//! Command line front end for polyglot-rs.
//!
//! - **Command framework** - [`ManagementCommand`] and [`CommandRegistry`]
//! - **Built-in commands** - `translate` and `keys`
//!
//! ## Quick Start
//!
//! ```rust
//! use polyglot_rs_cli::command::CommandRegistry;
//! use polyglot_rs_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert_eq!(names, vec!["keys", "translate"]);
//! ```

// - doc_markdown: backtick requirements for documentation items are too strict
#![allow(clippy::doc_markdown)]

pub mod command;
pub mod commands;

use std::ffi::OsString;
use std::io::Write;

use polyglot_rs_core::{logging, settings_loader, I18nError};

pub use command::{CommandRegistry, ManagementCommand};

/// Parses `args`, loads settings, sets up logging and runs the selected
/// command, writing its output to `out`.
///
/// Settings come from `--settings FILE` when given, otherwise from defaults;
/// `POLYGLOT_*` environment overrides apply either way.
pub fn run<I, T>(args: I, out: &mut dyn Write) -> Result<(), I18nError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);

    let matches = match registry.build_cli().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(e)
            if matches!(
                e.kind(),
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion
            ) =>
        {
            write!(out, "{e}")?;
            return Ok(());
        }
        Err(e) => return Err(I18nError::Configuration(e.to_string())),
    };

    let settings = match matches.get_one::<String>("settings") {
        Some(path) => settings_loader::from_file_with_env(path)?,
        None => settings_loader::from_env(),
    };
    logging::setup_logging(&settings);

    registry.execute(&matches, &settings, out)
}
