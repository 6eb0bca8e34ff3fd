//! Init command - create a new project context

use std::path::Path;

use anyhow::{Context, Result};
use score_compose::config::Config;
use score_compose::presentation::create_init_use_case;

/// Create a project in the current directory (or `--context-dir`)
pub fn cmd_init(project: &str, context_dir: Option<&Path>) -> Result<()> {
    let current_dir = std::env::current_dir().context("determining current directory")?;
    let config = Config::local(context_dir, &current_dir);

    create_init_use_case().execute(project, &config.context_dir)?;
    println!(
        "Created score-compose project '{}' in {}",
        project,
        score_compose::config::display_path(&config.context_dir, &current_dir)
    );
    Ok(())
}
