//! CLI module
//!
//! Command-line interface for running migrations and maintenance tasks
//! without starting the HTTP server.

use clap::{Parser, Subcommand};

/// Rentfolio service
#[derive(Parser)]
#[command(name = "rentfolio")]
#[command(about = "Rental-property management backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server (default if no command specified)
    Serve,

    /// Run database migrations
    Migrate {
        /// Mark migrations as applied without running them (for existing
        /// databases). Use alone to fake all migrations, or with a version
        /// number to fake up to that version.
        #[arg(long)]
        fake: Option<Option<u32>>,
    },
}
