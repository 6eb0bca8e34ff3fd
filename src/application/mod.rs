//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `InitUseCase` - Creates a project context
//! - `GenerateUseCase` - Adds a workload, provisions resources and writes the compose file
//!
//! ## Services
//!
//! - `load_spec` - Parse a Score file, apply overrides and validate it

pub mod generate;
pub mod init;
pub mod spec_loader;

pub use generate::{GenerateOptions, GenerateResult, GenerateUseCase};
pub use init::{is_valid_project_name, InitUseCase};
pub use spec_loader::{apply_override, load_spec};
