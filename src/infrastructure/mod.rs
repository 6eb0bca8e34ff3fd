//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `repositories/` - Repository implementations (Context)
//! - `catalog/` - Provisioner catalog loading

pub mod catalog;
pub mod fs;
pub mod repositories;

// Re-export for convenience
pub use catalog::{default_catalog, load_catalog};
pub use fs::{LocalFs, MemoryFs};
pub use repositories::YamlContextRepository;
