//! score-compose - generate Docker Compose projects from Score workloads
//!
//! Workloads described in the Score format are added to a persistent project
//! context. Each run provisions the resources the workloads depend on from a
//! template catalog, resolves `${resources.*}` placeholders and writes a
//! single compose file covering every workload in the project.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{GenerateOptions, GenerateResult, GenerateUseCase, InitUseCase};
pub use config::Config;
pub use domain::entities::{Context, Provisioned, Workload};
pub use domain::value_objects::{ContentHash, ResourceUid};
pub use error::{ComposeError, ComposeResult};
