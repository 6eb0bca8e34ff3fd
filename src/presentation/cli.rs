//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--context-dir, --verbose) are inherited by all subcommands
//! - Logs go to stderr; stdout only carries command results

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// score-compose - generate Docker Compose projects from Score workloads
#[derive(Parser, Debug)]
#[command(name = "score-compose")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Context directory (default: nearest .score-compose)
    #[arg(long, global = true, env = "SCORE_COMPOSE_CONTEXT_DIR")]
    pub context_dir: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialise a new score-compose project in the current directory
    Init {
        /// Compose project name: lowercase alphanumerics, `-` and `_`
        project: String,
    },

    /// Add a Score workload to the project and write the compose file
    Generate {
        /// Score file to add
        #[arg(short, long, default_value = "score.yaml")]
        file: PathBuf,

        /// Override a property: PATH=VALUE sets, PATH alone removes
        #[arg(short = 'p', long = "property", value_name = "PATH[=VALUE]")]
        properties: Vec<String>,

        /// Build configuration (YAML) for containers with `image: .`; kept
        /// from earlier runs when omitted
        #[arg(long, value_name = "YAML")]
        build: Option<String>,

        /// File of overrides to apply to the Score file
        #[arg(long, alias = "overrides", value_name = "FILE")]
        overrides_file: Option<PathBuf>,

        /// Compose file to write
        #[arg(short, long, default_value = "compose.yaml")]
        output: PathBuf,
    },

    /// Display the version of score-compose
    Version,
}
