//! Configuration type definitions

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::loader;

/// Default name of the context directory
pub const CONTEXT_DIR_NAME: &str = ".score-compose";

/// Environment variable overriding the context directory
pub const CONTEXT_DIR_ENV: &str = "SCORE_COMPOSE_CONTEXT_DIR";

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute path of the context directory
    pub context_dir: PathBuf,
    /// Directory the tool was invoked from
    pub current_dir: PathBuf,
}

impl Config {
    /// Resolve the configuration for commands working on an existing project.
    ///
    /// Searches upwards for a context directory when neither the flag nor the
    /// environment names one.
    pub fn discover(flag: Option<&Path>, current_dir: &Path) -> Self {
        let explicit = flag
            .map(Path::to_path_buf)
            .or_else(loader::env_context_dir);
        let context_dir = match explicit {
            Some(dir) => absolute(&dir, current_dir),
            None => loader::find_context_dir(current_dir)
                .unwrap_or_else(|| current_dir.join(CONTEXT_DIR_NAME)),
        };
        Self {
            context_dir,
            current_dir: current_dir.to_path_buf(),
        }
    }

    /// Resolve the configuration for creating a project in place.
    ///
    /// Same as [`Config::discover`] without the upward search.
    pub fn local(flag: Option<&Path>, current_dir: &Path) -> Self {
        let config = Self {
            context_dir: current_dir.join(CONTEXT_DIR_NAME),
            current_dir: current_dir.to_path_buf(),
        };
        let config = loader::with_env_overrides(config);
        match flag {
            Some(dir) => Self {
                context_dir: absolute(dir, current_dir),
                ..config
            },
            None => config,
        }
    }

    /// `files` directory as written into the manifest
    pub fn files_path(&self) -> String {
        loader::display_path(&self.context_dir.join("files"), &self.current_dir)
    }

    /// `volumes` directory as written into the manifest
    pub fn volumes_path(&self) -> String {
        loader::display_path(&self.context_dir.join("volumes"), &self.current_dir)
    }

    /// The `paths` variables handed to provisioner templates
    pub fn template_paths(&self) -> BTreeMap<String, String> {
        let mut paths = BTreeMap::new();
        paths.insert("files".to_string(), self.files_path());
        paths.insert("volumes".to_string(), self.volumes_path());
        paths
    }
}

fn absolute(dir: &Path, current_dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        current_dir.join(dir)
    }
}
