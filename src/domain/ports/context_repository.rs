//! ContextRepository port - abstraction for context persistence
//!
//! The domain loads and saves the project `Context` through this trait
//! without knowing where or in what format it is stored.

use std::path::Path;

use crate::domain::entities::Context;

/// Result type for context operations
pub type ContextResult<T> = Result<T, ContextError>;

/// Context operation errors
#[derive(Debug)]
pub enum ContextError {
    /// No context has been saved at the location
    NotFound,
    /// The stored context cannot be decoded
    InvalidFormat(String),
    /// I/O error
    Io(String),
}

impl std::fmt::Display for ContextError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContextError::NotFound => write!(f, "context not found"),
            ContextError::InvalidFormat(msg) => write!(f, "invalid context format: {}", msg),
            ContextError::Io(msg) => write!(f, "failed to access context: {}", msg),
        }
    }
}

impl std::error::Error for ContextError {}

/// Abstract repository for the persisted project context
pub trait ContextRepository {
    /// Load the context stored under a context directory
    fn load(&self, context_dir: &Path) -> ContextResult<Context>;

    /// Persist the context under a context directory
    fn save(&self, context: &Context, context_dir: &Path) -> ContextResult<()>;
}
