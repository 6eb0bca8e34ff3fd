//! Context directory discovery

use std::path::{Component, Path, PathBuf};

use tracing::debug;

use super::types::{Config, CONTEXT_DIR_ENV, CONTEXT_DIR_NAME};

/// Context directory named by the environment, if any
pub(super) fn env_context_dir() -> Option<PathBuf> {
    std::env::var_os(CONTEXT_DIR_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Apply environment variable overrides (SCORE_COMPOSE_* prefix)
pub fn with_env_overrides(mut config: Config) -> Config {
    // SCORE_COMPOSE_CONTEXT_DIR
    if let Some(dir) = env_context_dir() {
        config.context_dir = if dir.is_absolute() {
            dir
        } else {
            config.current_dir.join(dir)
        };
    }
    config
}

/// Walk up from `start` looking for an existing context directory
pub fn find_context_dir(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(CONTEXT_DIR_NAME);
        if candidate.is_dir() {
            debug!(context_dir = %candidate.display(), "found context directory");
            return Some(candidate);
        }
    }
    None
}

/// Render `path` for the manifest: `./relative` when it lies below
/// `current_dir`, absolute otherwise
pub fn display_path(path: &Path, current_dir: &Path) -> String {
    match path.strip_prefix(current_dir) {
        Ok(relative) => {
            let parts: Vec<String> = relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect();
            if parts.is_empty() {
                ".".to_string()
            } else {
                format!("./{}", parts.join("/"))
            }
        }
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
