//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use swapcon_core::Category;

/// SwapCon - Inspect and resolve named connections
#[derive(Parser, Debug)]
#[command(name = "swapcon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory holding swapcon.toml and the env file
    #[arg(short = 'C', long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Show the groups, connections and fallbacks declared for the project
    Inspect {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve a connection name to a concrete connection
    ///
    /// Examples:
    ///   swapcon resolve database replica
    ///   swapcon resolve cache sessions --store config/app.toml
    Resolve {
        /// Connection category (database, cache, queue, filesystems, logging, broadcasting)
        category: Category,

        /// Name of the connection, group or fallback to resolve
        name: String,

        /// Application config (TOML or JSON) holding the concrete connections
        #[arg(long)]
        store: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Resolve every declared name and report the ones that fail
    Check {
        /// Application config (TOML or JSON) holding the concrete connections
        #[arg(long)]
        store: Option<PathBuf>,

        /// Only check this category
        #[arg(long)]
        category: Option<Category>,
    },
}
