pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use intake_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "intake",
    about = "Guided loan-application intake assistant",
    long_about = "Collect a loan application through a chat-guided dialogue or direct \
                  field edits, with shared validation over one record.",
    after_help = "Examples:\n  intake chat\n  intake schema\n  intake config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Start an interactive intake session (chat plus /set form edits)")]
    Chat,
    #[command(about = "Print the field schema: names, kinds, required-ness, dependencies")]
    Schema,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("config error: {error}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Chat => commands::chat::run(),
        Command::Schema => {
            println!("{}", commands::schema::run());
            Ok(())
        }
        Command::Config => {
            println!("{}", commands::config::run());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        LogFormat::Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        LogFormat::Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
