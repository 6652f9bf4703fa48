//! `phonedesk` - CLI for phonedesk
//!
//! This binary fills the user form from command-line arguments, presses one
//! button, and prints the resulting alert.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use phonedesk::cli::{self, Cli, Command, ConfigCommand, OutputFormat, ViewCommand};
use phonedesk::{open_store, shell, Alert, Button, Config, Screen, UserForm};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    phonedesk::init_logging(cli.verbosity());

    // Config commands inspect files themselves and must work on a broken config
    if let Command::Config(config_cmd) = &cli.command {
        return handle_config(&cli, config_cmd);
    }

    let config = cli.resolve_config()?;

    match cli.command {
        Command::Insert(args) => press(&config, UserForm::from(args), Button::Insert).await,
        Command::Update(args) => press(&config, UserForm::from(args), Button::Update).await,
        Command::Delete(args) => {
            press(&config, UserForm::new("", args.phone, ""), Button::Delete).await
        }
        Command::View(view) => handle_view(&config, view).await,
        Command::Shell => handle_shell(&config).await,
        Command::Config(_) => Ok(ExitCode::SUCCESS),
    }
}

async fn open_screen(config: &Config) -> anyhow::Result<Screen> {
    let store = open_store(config).await?;
    Ok(Screen::from_config(store, config)?)
}

/// Print an alert; problems go to stderr.
fn report(alert: Option<&Alert>) -> ExitCode {
    match alert {
        Some(alert) if alert.is_error() => eprintln!("error: {alert}"),
        Some(alert) => println!("{alert}"),
        None => {}
    }
    ExitCode::from(cli::exit_status(alert))
}

async fn press(config: &Config, form: UserForm, button: Button) -> anyhow::Result<ExitCode> {
    let screen = open_screen(config).await?;
    screen.set_form(form);
    let alert = screen.press(button).await;
    Ok(report(alert.as_ref()))
}

async fn handle_view(config: &Config, cmd: ViewCommand) -> anyhow::Result<ExitCode> {
    let screen = open_screen(config).await?;
    screen.set_phone(cmd.phone);

    if let Some(alert) = screen.press(Button::View).await {
        return Ok(report(Some(&alert)));
    }

    let form = screen.form();
    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&form)?),
        OutputFormat::Plain => println!("{}", shell::render_form(&form)),
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_shell(config: &Config) -> anyhow::Result<ExitCode> {
    let screen = open_screen(config).await?;
    println!(
        "phonedesk shell ({} store). Type 'help' for commands.",
        config.store.backend
    );

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    shell::run(&screen, input, tokio::io::stdout()).await?;
    Ok(ExitCode::SUCCESS)
}

fn handle_config(cli: &Cli, cmd: &ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = &cli.resolve_config()?;
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Backend:            {}", config.store.backend);
                println!("  Collection:         {}", config.store.collection);
                println!("  Database path:      {}", config.database_path().display());
                println!(
                    "  MongoDB URI:        {}",
                    config.store.mongodb_uri.as_deref().unwrap_or("(not set)")
                );
                println!("  MongoDB database:   {}", config.store.mongodb_database);
                println!();
                println!("[Form]");
                println!("  Phone pattern:      {}", config.form.phone_pattern);
            }
        }
        ConfigCommand::Path => {
            let path = cli.config.clone().unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .clone()
                .or_else(|| cli.config.clone())
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => {
                    println!("Configuration error: {e}");
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
