//! Command-line interface for drakor.

mod commands;

use clap::{Parser, Subcommand};

/// Drakor - drama streaming catalog backend
#[derive(Parser)]
#[command(name = "drakor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API server (default)
    #[command(alias = "server")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Insert sample genres, a demo user and sample dramas
    Seed,

    /// Print one page of the drama catalog
    #[command(alias = "ls")]
    Dramas {
        /// Case-insensitive title search
        #[arg(long)]
        q: Option<String>,
        /// Genre id or slug
        #[arg(long)]
        genre: Option<String>,
        /// ongoing or completed
        #[arg(long)]
        status: Option<String>,
        /// popular, rating, oldest or latest
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value = "1")]
        page: String,
        #[arg(long)]
        limit: Option<String>,
    },
}

pub use commands::*;
