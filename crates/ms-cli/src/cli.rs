//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Start-list session assignment for weightlifting meets.
///
/// Takes the roster produced by the start-list scrapers plus the published
/// meet schedule and assigns every athlete to a scheduled session.
#[derive(Debug, Parser)]
#[command(name = "ms", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Assign every athlete on a start list to a scheduled session.
    Assign {
        /// Path to the start-list roster (JSON Lines).
        #[arg(long)]
        start_list: PathBuf,

        /// Path to the meet schedule (JSON Lines).
        #[arg(long)]
        schedule: PathBuf,

        /// Where the augmented roster is written.
        #[arg(long, default_value = "assigned_athletes.jsonl")]
        output: PathBuf,

        /// Print the run summary as JSON instead of the human report.
        #[arg(long)]
        json: bool,
    },

    /// Validate that every schedule row's eligibility specs parse.
    Check {
        /// Path to the meet schedule (JSON Lines).
        #[arg(long)]
        schedule: PathBuf,
    },
}
