//! CLI module
//!
//! Subcommands:
//! - `serve`: run the HTTP API server
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// CRM campaign engine - segment customers and dispatch campaigns
#[derive(Parser)]
#[command(name = "crm-campaign-engine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply database migrations and exit
    Migrate,
}
