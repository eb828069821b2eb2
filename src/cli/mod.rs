//! CLI module for the Team Roster API
//!
//! Provides subcommands:
//! - `serve`: run the HTTP API
//! - `migrate`: apply or revert the PostgreSQL schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Team Roster API - users, teams, and join requests over JSON
#[derive(Parser)]
#[command(name = "team-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,

    /// Manage the PostgreSQL schema
    Migrate(migrate::MigrateArgs),
}
