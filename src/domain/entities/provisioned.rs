//! Provisioned entity - the uniform output of provisioning a resource or a workload

use serde::{Deserialize, Serialize};

use super::Mapping;

/// Manifest fragments and state produced for one resource or workload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provisioned {
    /// Entries for the manifest's `services` section
    #[serde(default)]
    pub services: Mapping,

    /// Entries for the manifest's `networks` section
    #[serde(default)]
    pub networks: Mapping,

    /// Side files: file name -> content
    #[serde(default)]
    pub files: Mapping,

    /// Directories that back volumes
    #[serde(default)]
    pub volume_dirs: Mapping,

    /// Opaque state fed back into the next provisioning cycle
    #[serde(default)]
    pub state: Mapping,

    /// Values exposed to workloads through `${resources.*}` placeholders
    #[serde(default)]
    pub outputs: Mapping,
}

impl Provisioned {
    pub fn new() -> Self {
        Self::default()
    }
}
