//! Generate Options
//!
//! Configuration types for generate operations.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Options for the generate use case
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Context directory holding `context.yaml`, side files and volumes
    pub context_dir: PathBuf,
    /// Score file to add
    pub score_file: PathBuf,
    /// `PATH[=VALUE]` property overrides
    pub overrides: Vec<String>,
    /// Override file (not supported)
    pub overrides_file: Option<PathBuf>,
    /// YAML build configuration for containers with `image: .`
    pub build: Option<String>,
    /// Compose file to write
    pub output: PathBuf,
    /// Directory file sources of this Score file are resolved against
    pub source_dir: PathBuf,
    /// `files` and `volumes` directories as referenced from the manifest and
    /// the provisioner templates
    pub paths: BTreeMap<String, String>,
}

impl GenerateOptions {
    pub fn new(context_dir: impl Into<PathBuf>, score_file: impl Into<PathBuf>) -> Self {
        let context_dir: PathBuf = context_dir.into();
        let paths = ["files", "volumes"]
            .into_iter()
            .map(|key| {
                let path = context_dir.join(key).to_string_lossy().into_owned();
                (key.to_string(), path)
            })
            .collect();
        Self {
            context_dir,
            score_file: score_file.into(),
            overrides: Vec::new(),
            overrides_file: None,
            build: None,
            output: PathBuf::from("compose.yaml"),
            source_dir: PathBuf::new(),
            paths,
        }
    }

    pub fn with_overrides(mut self, overrides: Vec<String>) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_paths(mut self, paths: BTreeMap<String, String>) -> Self {
        self.paths = paths;
        self
    }

    /// `files` directory as referenced from the manifest
    pub fn files_path(&self) -> &str {
        self.paths.get("files").map(String::as_str).unwrap_or("files")
    }

    /// Directory side files are written to
    pub fn files_dir(&self) -> PathBuf {
        self.context_dir.join("files")
    }

    /// Directory volume directories are created in
    pub fn volumes_dir(&self) -> PathBuf {
        self.context_dir.join("volumes")
    }
}
