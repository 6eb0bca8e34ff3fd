//! Error types for score-compose
//!
//! Domain services have focused error types; everything converges on
//! [`ComposeError`] at the use-case boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::ports::context_repository::ContextError;
use crate::domain::ports::file_system::FsError;
use crate::domain::services::merge::MergeConflict;
use crate::domain::services::placeholder::PlaceholderError;
use crate::domain::services::provisioner::ProvisionError;

/// Result type alias for score-compose operations
pub type ComposeResult<T> = Result<T, ComposeError>;

/// Main error type for score-compose operations
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Malformed spec, missing name, invalid project id, invalid manifest
    #[error("{0}")]
    Validation(String),

    /// Resource provisioning failed
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// Two fragments disagree on a non-mapping value
    #[error(transparent)]
    MergeConflict(#[from] MergeConflict),

    /// A `${...}` token could not be resolved
    #[error(transparent)]
    Placeholder(#[from] PlaceholderError),

    /// File system operation failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// Context persistence failed
    #[error(transparent)]
    Context(#[from] ContextError),

    /// Feature is declared but not implemented
    #[error("{0}: not supported")]
    Unsupported(String),

    /// No project has been initialised at the context location
    #[error("no project found at '{path}'; have you run 'score-compose init'?")]
    ProjectNotFound { path: PathBuf },

    /// A project already exists at the context location
    #[error("there is already a score-compose project at '{path}'")]
    ProjectExists { path: PathBuf },

    /// YAML parsing or encoding error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON conversion error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An error qualified with where it happened
    #[error("{context}: {source}")]
    Wrapped {
        context: String,
        #[source]
        source: Box<ComposeError>,
    },
}

impl ComposeError {
    /// Build a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Qualify this error with a location or operation
    pub fn wrap(self, context: impl Into<String>) -> Self {
        Self::Wrapped {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any `Wrapped` layers
    pub fn root(&self) -> &ComposeError {
        match self {
            Self::Wrapped { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Extension for qualifying errors on `Result`s
pub trait ResultExt<T> {
    fn context_with<F, S>(self, f: F) -> ComposeResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ComposeError>,
{
    fn context_with<F, S>(self, f: F) -> ComposeResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| e.into().wrap(f()))
    }
}
