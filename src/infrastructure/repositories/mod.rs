//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod context;

pub use context::{YamlContextRepository, CONTEXT_FILE};
