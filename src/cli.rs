//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// HandLine - catalogue, content and back-office API
#[derive(Parser)]
#[command(name = "handline")]
#[command(version)]
#[command(about = "Catalogue, content and back-office API for the HandLine website", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands; without a subcommand the HTTP server starts
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve,

    /// Print an Argon2 hash for api.admin_password
    HashPassword {
        /// Plain-text password
        password: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
