//! SwapCon CLI
//!
//! Inspect the connections a project declares and check they resolve.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

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

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(dir = %cli.dir.display(), "Starting");

    match cli.command {
        Some(cmd) => execute_command(&cli.dir, cmd),
        None => {
            println!("{} connection manager", "swapcon".green().bold());
            println!();
            println!("Run {} for available commands.", "swapcon --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(dir: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Inspect { json } => commands::run_inspect(dir, json),
        Commands::Resolve {
            category,
            name,
            store,
            json,
        } => commands::run_resolve(dir, category, &name, store.as_deref(), json),
        Commands::Check { store, category } => commands::run_check(dir, store.as_deref(), category),
    }
}
