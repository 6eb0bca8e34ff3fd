//! Domain Entities
//!
//! Core domain entities that have identity and lifecycle.
//! - `Workload` - A Score workload specification
//! - `Context` - Persistent project state (workloads, resources, provisioned results)
//! - `Provisioned` - Manifest fragments produced for a resource or workload
//! - `ProvisionerCatalog` - Per-type provisioning templates

mod catalog;
mod context;
mod provisioned;
mod workload;

/// Generic string-keyed mapping used for opaque, nested document data
pub type Mapping = serde_json::Map<String, serde_json::Value>;

pub use catalog::{ProvisionerCatalog, ProvisionerTemplates};
pub use context::{Context, Resource, ResourceState, WorkloadState};
pub use provisioned::Provisioned;
pub use workload::{
    Container, ContainerFile, ContainerVolume, FileContent, ResourceDecl, ServicePort, Workload,
    WorkloadService,
};
