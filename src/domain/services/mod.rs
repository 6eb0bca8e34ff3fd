//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! Apart from reading workload file sources through the `FileSystem` port,
//! these services have no I/O dependencies.

pub mod compose;
pub mod converter;
pub mod manifest_check;
pub mod merge;
pub mod placeholder;
pub mod provisioner;

pub use compose::{generate_compose_project, ComposeProject, DEFAULT_PROJECT_NAME};
pub use converter::{service_name, WorkloadConverter};
pub use manifest_check::check_manifest;
pub use merge::{
    collate, escape_interpolation, merge_maps, merge_patch, value_kind, MergeConflict,
};
pub use placeholder::{PlaceholderError, PlaceholderResolver};
pub use provisioner::{ProvisionError, ProvisionRequest, ProvisionerEngine, Stage};
