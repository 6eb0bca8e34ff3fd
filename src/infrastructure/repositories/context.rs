//! YAML Context Repository
//!
//! Implements the ContextRepository port, storing the context as
//! `context.yaml` inside the context directory.

use std::path::Path;

use crate::domain::entities::Context;
use crate::domain::ports::context_repository::{ContextError, ContextRepository, ContextResult};
use crate::domain::ports::file_system::FileSystem;
use crate::infrastructure::fs::LocalFs;

/// File name of the persisted context
pub const CONTEXT_FILE: &str = "context.yaml";

/// YAML-based context repository
pub struct YamlContextRepository<F: FileSystem = LocalFs> {
    fs: F,
}

impl YamlContextRepository<LocalFs> {
    /// Create a new repository with the local file system
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for YamlContextRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> YamlContextRepository<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }
}

impl<F: FileSystem> ContextRepository for YamlContextRepository<F> {
    fn load(&self, context_dir: &Path) -> ContextResult<Context> {
        let path = context_dir.join(CONTEXT_FILE);
        if !self.fs.exists(&path) {
            return Err(ContextError::NotFound);
        }

        let content = self.fs.read(&path).map_err(|e| match e {
            e if e.is_not_found() => ContextError::NotFound,
            e => ContextError::Io(e.to_string()),
        })?;
        serde_yaml_ng::from_str(&content).map_err(|e| ContextError::InvalidFormat(e.to_string()))
    }

    fn save(&self, context: &Context, context_dir: &Path) -> ContextResult<()> {
        let content = serde_yaml_ng::to_string(context)
            .map_err(|e| ContextError::InvalidFormat(e.to_string()))?;
        self.fs
            .create_dir_all(context_dir)
            .map_err(|e| ContextError::Io(e.to_string()))?;
        self.fs
            .write(&context_dir.join(CONTEXT_FILE), &content)
            .map_err(|e| ContextError::Io(e.to_string()))
    }
}
