//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod context_repository;
pub mod file_system;

pub use context_repository::{ContextError, ContextRepository, ContextResult};
pub use file_system::{FileSystem, FsError, FsResult};
