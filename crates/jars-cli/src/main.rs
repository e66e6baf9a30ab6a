//! jar-manager CLI
//!
//! The command-line interface for resolving a component's jar
//! dependencies into a generated loader script.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use jars_core::{Config, PropertiesSource};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::new();
    if let Some(properties) = &cli.properties {
        config.install_source(Box::new(PropertiesSource::from_file(properties)?));
    }

    // Setup tracing if verbose; the debug flag wins
    let level = if config.debug() {
        Some(Level::TRACE)
    } else if cli.verbose || config.verbose() {
        Some(Level::DEBUG)
    } else {
        None
    };
    if let Some(level) = level {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    let cwd = std::env::current_dir()?;
    match cli.command {
        Some(Commands::Install { spec }) => commands::run_install(&cwd, spec.as_deref()),
        Some(Commands::Vendor { spec }) => {
            commands::run_vendor(&cwd, spec.as_deref(), &mut config)
        }
        Some(Commands::Home) => commands::run_home(&mut config),
        None => {
            // No command provided - show help hint
            println!("{} jar dependency manager", "jars".green().bold());
            println!();
            println!("Run {} for available commands.", "jars --help".cyan());
            Ok(())
        }
    }
}
