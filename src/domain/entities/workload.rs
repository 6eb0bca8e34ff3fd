//! Workload entity - a validated Score workload specification
//!
//! Field names follow the Score `score.dev/v1b1` schema. Unknown properties
//! inside `metadata` and opaque container sections (resources, health checks) are kept
//! verbatim so the spec round-trips through the persisted context.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Mapping;

/// A Score workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workload {
    pub api_version: String,

    #[serde(default)]
    pub metadata: Mapping,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<WorkloadService>,

    #[serde(default)]
    pub containers: BTreeMap<String, Container>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub resources: BTreeMap<String, ResourceDecl>,
}

impl Workload {
    /// The declared workload name (`metadata.name`)
    pub fn name(&self) -> Option<&str> {
        self.metadata.get("name").and_then(Value::as_str)
    }

    /// Container names in lexicographic order
    pub fn container_names(&self) -> impl Iterator<Item = &str> {
        self.containers.keys().map(String::as_str)
    }
}

/// Network service definition of a workload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkloadService {
    #[serde(default)]
    pub ports: BTreeMap<String, ServicePort>,
}

/// A named port exposed by the workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePort {
    pub port: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// One container of a workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<ContainerFile>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<ContainerVolume>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Value>,

    #[serde(
        default,
        rename = "livenessProbe",
        skip_serializing_if = "Option::is_none"
    )]
    pub liveness_check: Option<Value>,

    #[serde(
        default,
        rename = "readinessProbe",
        skip_serializing_if = "Option::is_none"
    )]
    pub readiness_check: Option<Value>,
}

impl Container {
    /// Image value meaning "build this container locally"
    pub const BUILD_IMAGE: &'static str = ".";

    pub fn needs_build(&self) -> bool {
        self.image == Self::BUILD_IMAGE
    }
}

/// A file mounted into a container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerFile {
    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    /// Path to a file whose content is mounted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<FileContent>,

    /// Skip placeholder expansion of the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_expand: Option<bool>,
}

impl ContainerFile {
    pub fn expands_placeholders(&self) -> bool {
        !self.no_expand.unwrap_or(false)
    }
}

/// Inline file content, either a single string or lines to be joined
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileContent {
    Text(String),
    Lines(Vec<String>),
}

impl FileContent {
    pub fn to_text(&self) -> String {
        match self {
            FileContent::Text(text) => text.clone(),
            FileContent::Lines(lines) => lines.join("\n"),
        }
    }
}

/// A named volume mounted into a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerVolume {
    pub source: String,

    /// Sub path inside the volume (not supported by compose named volumes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub target: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
}

/// A resource dependency declared by a workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDecl {
    #[serde(rename = "type")]
    pub res_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Mapping>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Mapping>,
}

impl ResourceDecl {
    pub fn new(res_type: impl Into<String>) -> Self {
        Self {
            res_type: res_type.into(),
            class: None,
            metadata: None,
            params: None,
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn with_params(mut self, params: Mapping) -> Self {
        self.params = Some(params);
        self
    }
}
