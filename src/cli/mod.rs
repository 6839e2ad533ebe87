use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

#[derive(Parser)]
#[command(name = "triplink-lifecycle")]
#[command(about = "Query and validate the TripLink agent-application lifecycle")]
#[command(long_about = "Inspects the agent-application lifecycle table shared by the TripLink \
                       server and clients: list states, check transitions, export the JSON schema \
                       and replay recorded transition logs.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every lifecycle state with its label and outgoing transitions
    States,
    /// Show the states directly reachable from a state
    Transitions {
        /// State token, e.g. UNDER_REVIEW
        state: String,
    },
    /// Check whether a transition is allowed (exit status 1 when it is not)
    Check {
        /// Current state token
        from: String,
        /// Requested state token
        to: String,
    },
    /// Print the lifecycle table as a JSON schema
    Schema {
        /// Write to a file instead of stdout
        #[arg(long, help = "File path to write the schema (prints to stdout if not specified)")]
        output: Option<PathBuf>,
    },
    /// Replay a JSON Lines transition log and report each application's state
    Replay {
        /// Log file (defaults to the configured transition log path)
        path: Option<PathBuf>,
    },
}
