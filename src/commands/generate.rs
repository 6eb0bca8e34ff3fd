//! Generate command - add a workload and write the compose file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use score_compose::application::GenerateOptions;
use score_compose::config::{display_path, Config};
use score_compose::presentation::create_generate_use_case;

/// Arguments of `score-compose generate`
#[derive(Debug, Clone)]
pub struct GenerateArgs {
    pub file: PathBuf,
    pub properties: Vec<String>,
    pub build: Option<String>,
    pub overrides_file: Option<PathBuf>,
    pub output: PathBuf,
}

pub fn cmd_generate(args: GenerateArgs, context_dir: Option<&Path>) -> Result<()> {
    let current_dir = std::env::current_dir().context("determining current directory")?;
    let config = Config::discover(context_dir, &current_dir);

    let score_file = current_dir.join(&args.file);
    let source_dir = score_file
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| current_dir.clone());

    let mut options = GenerateOptions::new(&config.context_dir, score_file)
        .with_overrides(args.properties)
        .with_output(current_dir.join(&args.output))
        .with_source_dir(source_dir)
        .with_paths(config.template_paths());
    options.build = args.build;
    options.overrides_file = args.overrides_file;

    let result = create_generate_use_case().execute(&options)?;
    println!(
        "Wrote {} ({} services) for workload '{}'",
        display_path(&result.manifest, &current_dir),
        result.services.len(),
        result.workload
    );
    Ok(())
}
