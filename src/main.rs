//! score-compose CLI - generate Docker Compose projects from Score workloads
//!
//! Usage: score-compose <COMMAND>
//!
//! Commands:
//!   init      Create a project context in the current directory
//!   generate  Add a Score workload and write the compose file
//!   version   Display the version

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

use score_compose::presentation::{Cli, Commands};

use commands::generate::GenerateArgs;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_line_number(verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("score-compose started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let context_dir = cli.context_dir.as_deref();
    match cli.command {
        Commands::Init { project } => commands::cmd_init(&project, context_dir),
        Commands::Generate {
            file,
            properties,
            build,
            overrides_file,
            output,
        } => commands::cmd_generate(
            GenerateArgs {
                file,
                properties,
                build,
                overrides_file,
                output,
            },
            context_dir,
        ),
        Commands::Version => {
            println!("score-compose version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
