//! Command-line interface for phonedesk.
//!
//! This module provides the CLI structure for the `phonedesk` binary. Each
//! record subcommand fills the form and presses one button.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::screen::Alert;

pub use commands::{
    BackendArg, ConfigCommand, OutputFormat, PhoneArgs, RecordArgs, ViewCommand,
};

/// phonedesk - Keep user records keyed by phone number
///
/// Inserts, updates, deletes, and views user records in a document store.
#[derive(Debug, Parser)]
#[command(name = "phonedesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Document store backend (overrides configuration)
    #[arg(long, global = true, value_enum)]
    pub store: Option<BackendArg>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insert a user, replacing any user with the same phone number
    Insert(RecordArgs),

    /// Update the name and age of an existing user
    Update(RecordArgs),

    /// Delete a user by phone number
    Delete(PhoneArgs),

    /// Show a user by phone number
    View(ViewCommand),

    /// Edit the form interactively
    Shell,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Load configuration, apply the `--store` override, then validate.
    ///
    /// A config file that is only invalid because of its backend can be used
    /// with a `--store` override.
    ///
    /// # Errors
    ///
    /// Returns an error if loading fails or the resulting configuration is
    /// invalid.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = Config::extract_from(self.config.clone())?;
        if let Some(backend) = self.store {
            config.store.backend = backend.into();
        }
        config.validate()?;
        Ok(config)
    }

    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

/// Process exit status after a button press: `1` for an error alert.
#[must_use]
pub fn exit_status(alert: Option<&Alert>) -> u8 {
    u8::from(alert.is_some_and(Alert::is_error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn cli_with(verbose: u8, quiet: bool) -> Cli {
        Cli {
            config: None,
            store: None,
            verbose,
            quiet,
            command: Command::Shell,
        }
    }

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "phonedesk");
    }

    #[test]
    fn test_verbosity_levels() {
        use crate::logging::Verbosity;

        assert_eq!(cli_with(0, true).verbosity(), Verbosity::Quiet);
        assert_eq!(cli_with(0, false).verbosity(), Verbosity::Normal);
        assert_eq!(cli_with(1, false).verbosity(), Verbosity::Verbose);
        assert_eq!(cli_with(2, false).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insert() {
        let args = vec![
            "phonedesk", "insert", "--name", "Ada", "--phone", "5551234567", "--age", "36",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::Insert(record) = cli.command else {
            panic!("expected insert");
        };
        assert_eq!(record.name, "Ada");
        assert_eq!(record.phone, "5551234567");
        assert_eq!(record.age, "36");
    }

    #[test]
    fn test_parse_insert_requires_all_fields() {
        let args = vec!["phonedesk", "insert", "--name", "Ada"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_parse_update_short_flags() {
        let args = vec!["phonedesk", "update", "-n", "Ada", "-p", "1", "-a", "2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Update(_)));
    }

    #[test]
    fn test_parse_delete() {
        let args = vec!["phonedesk", "delete", "--phone", "5551234567"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(
            matches!(cli.command, Command::Delete(PhoneArgs { ref phone }) if phone == "5551234567")
        );
    }

    #[test]
    fn test_parse_view_json() {
        let args = vec!["phonedesk", "view", "-p", "42", "--format", "json"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Command::View(view) = cli.command else {
            panic!("expected view");
        };
        assert_eq!(view.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_store_override() {
        let args = vec!["phonedesk", "--store", "memory", "shell"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.store, Some(BackendArg::Memory));
    }

    #[test]
    fn test_parse_with_config() {
        let args = vec!["phonedesk", "-c", "/custom/config.toml", "config", "path"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    fn mongodb_without_uri() -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "phonedesk_cli_mongodb_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[store]\nbackend = \"mongodb\"\n").unwrap();
        path
    }

    #[test]
    fn test_resolve_config_applies_store_before_validating() {
        let path = mongodb_without_uri();
        let config_arg = path.to_string_lossy().into_owned();

        let cli = Cli::try_parse_from(["phonedesk", "-c", config_arg.as_str(), "shell"]).unwrap();
        assert!(cli.resolve_config().is_err());

        let cli = Cli::try_parse_from([
            "phonedesk", "-c", config_arg.as_str(), "--store", "memory", "shell",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.store.backend, crate::config::Backend::Memory);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_resolve_config_override_can_invalidate() {
        let cli = Cli::try_parse_from([
            "phonedesk", "-c", "/nonexistent/config.toml", "--store", "mongodb", "shell",
        ])
        .unwrap();
        assert!(cli.resolve_config().is_err());
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(None), 0);
        let added = Alert::info("User Added successfully");
        assert_eq!(exit_status(Some(&added)), 0);
        let missing = Alert::error("User not found");
        assert_eq!(exit_status(Some(&missing)), 1);
    }

    #[test]
    fn test_parse_with_verbose_and_quiet() {
        let cli = Cli::try_parse_from(vec!["phonedesk", "-vv", "shell"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let cli = Cli::try_parse_from(vec!["phonedesk", "-q", "shell"]).unwrap();
        assert!(cli.quiet);
    }
}
