//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::form::UserForm;

/// Fields for the insert and update buttons.
#[derive(Debug, Args)]
pub struct RecordArgs {
    /// User name
    #[arg(short, long)]
    pub name: String,

    /// Phone number (the record key)
    #[arg(short, long)]
    pub phone: String,

    /// Age in years
    #[arg(short, long)]
    pub age: String,
}

impl From<RecordArgs> for UserForm {
    fn from(args: RecordArgs) -> Self {
        Self::new(args.name, args.phone, args.age)
    }
}

/// Arguments for commands addressing a record by phone number.
#[derive(Debug, Args)]
pub struct PhoneArgs {
    /// Phone number (the record key)
    #[arg(short, long)]
    pub phone: String,
}

/// View command arguments.
#[derive(Debug, Args)]
pub struct ViewCommand {
    /// Phone number (the record key)
    #[arg(short, long)]
    pub phone: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Store backend argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    /// In-process store, discarded on exit
    Memory,
    /// Local `SQLite` file
    Sqlite,
    /// Remote `MongoDB` deployment
    Mongodb,
}

impl From<BackendArg> for crate::config::Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Memory => Self::Memory,
            BackendArg::Sqlite => Self::Sqlite,
            BackendArg::Mongodb => Self::Mongodb,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}
