//! Provisioner catalog - per-type template bundles
//!
//! The catalog is loaded once per invocation and handed to the
//! `ProvisionerEngine` explicitly. It never changes while provisioning runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Template sources for one resource type
///
/// Every template must render to a YAML mapping. A missing or empty template
/// renders to an empty mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionerTemplates {
    #[serde(default)]
    pub init: String,
    #[serde(default)]
    pub outputs: String,
    #[serde(default)]
    pub services: String,
    #[serde(default)]
    pub networks: String,
    #[serde(default)]
    pub files: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub shared: String,
    #[serde(default)]
    pub volume_dirs: String,
}

/// All known provisioners plus the path variables injected into templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionerCatalog {
    #[serde(default)]
    pub types: BTreeMap<String, ProvisionerTemplates>,

    /// Injected as `paths` (e.g. `files`, `volumes`)
    #[serde(default, skip_serializing)]
    pub paths: BTreeMap<String, String>,
}

impl ProvisionerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Templates registered for a resource type
    pub fn get(&self, res_type: &str) -> Option<&ProvisionerTemplates> {
        self.types.get(res_type)
    }

    pub fn contains(&self, res_type: &str) -> bool {
        self.types.contains_key(res_type)
    }

    /// Registered type names in order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    pub fn with_type(mut self, res_type: impl Into<String>, templates: ProvisionerTemplates) -> Self {
        self.types.insert(res_type.into(), templates);
        self
    }

    pub fn with_paths<I, K, V>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.paths = paths
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Layer another catalog on top: a type defined in `other` replaces the
    /// whole definition of the same type here
    pub fn overlay(&mut self, other: ProvisionerCatalog) {
        self.types.extend(other.types);
        self.paths.extend(other.paths);
    }
}
