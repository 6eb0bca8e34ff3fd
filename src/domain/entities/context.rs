//! Context entity - persistent project state across invocations
//!
//! The context tracks every workload spec that has been added to the project,
//! the resource instances those workloads reference, and the provisioning
//! results of previous runs. It is a pure data structure; loading and saving
//! are handled by `ContextRepository`.
//!
//! Resources are never deleted. When no workload references a resource any
//! more it is only marked as not current, so its provisioned state survives a
//! temporary removal and is picked up again when the reference comes back.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::domain::value_objects::ResourceUid;
use crate::error::{ComposeError, ComposeResult};

use super::{Provisioned, ResourceDecl, Workload};

/// A tracked resource instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceUid,

    /// True iff some tracked workload still references this instance
    pub current: bool,

    /// Global name: `<workload>.<local name>`
    pub name: String,

    #[serde(flatten)]
    pub declaration: ResourceDecl,
}

impl Resource {
    /// Class of the resource, `default` when none was declared
    pub fn class(&self) -> &str {
        self.declaration
            .class
            .as_deref()
            .unwrap_or(ResourceUid::DEFAULT_CLASS)
    }

    pub fn res_type(&self) -> &str {
        &self.declaration.res_type
    }
}

/// Resource half of the context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// workload name -> (local resource name -> instance id)
    #[serde(default)]
    pub workloads: BTreeMap<String, BTreeMap<String, ResourceUid>>,

    #[serde(default)]
    pub resources: BTreeMap<ResourceUid, Resource>,

    #[serde(default)]
    pub provisioned: BTreeMap<ResourceUid, Provisioned>,
}

/// Workload half of the context
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkloadState {
    #[serde(default)]
    pub specs: BTreeMap<String, Workload>,

    #[serde(default)]
    pub provisioned: BTreeMap<String, Provisioned>,

    /// Build configuration used for containers with `image: .`
    #[serde(default)]
    pub build: BTreeMap<String, Value>,

    /// Directory each workload's file sources are resolved against
    #[serde(default, rename = "sourceDirs")]
    pub source_dirs: BTreeMap<String, PathBuf>,
}

/// The persisted project context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Context {
    #[serde(default)]
    resources: ResourceState,

    #[serde(default)]
    workloads: WorkloadState,

    /// Version of the tool that last wrote the context
    version: String,

    #[serde(default, rename = "composeProjectName")]
    project_name: String,
}

impl Default for Context {
    fn default() -> Self {
        Self::new("")
    }
}

impl Context {
    /// Create an empty context for a project
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            resources: ResourceState::default(),
            workloads: WorkloadState::default(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            project_name: project_name.into(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Stamp the context with the running tool version
    pub fn touch_version(&mut self) {
        self.version = env!("CARGO_PKG_VERSION").to_string();
    }

    /// Register or refresh a workload spec.
    ///
    /// Records the workload's resource bindings, upserts a `Resource` for
    /// each declared resource and recomputes every resource's `current` flag
    /// from the bindings of all tracked workloads.
    pub fn update(&mut self, spec: Workload) -> ComposeResult<()> {
        let workload_name = spec
            .name()
            .ok_or_else(|| {
                ComposeError::validation("workload metadata does not have a name property")
            })?
            .to_string();

        let mut bindings = BTreeMap::new();
        for (local_name, declaration) in &spec.resources {
            let global_name = ResourceUid::global_name(&workload_name, local_name);
            let id = ResourceUid::from_global_name(
                &global_name,
                &declaration.res_type,
                declaration.class.as_deref(),
            );
            debug!(workload = %workload_name, resource = %local_name, %id, "binding resource");

            bindings.insert(local_name.clone(), id.clone());
            self.resources.resources.insert(
                id.clone(),
                Resource {
                    id,
                    current: true,
                    name: global_name,
                    declaration: declaration.clone(),
                },
            );
        }

        self.resources
            .workloads
            .insert(workload_name.clone(), bindings);
        self.workloads.specs.insert(workload_name, spec);
        self.refresh_current();
        Ok(())
    }

    /// Recompute `current` for every resource from the full binding set
    fn refresh_current(&mut self) {
        let ResourceState {
            workloads,
            resources,
            ..
        } = &mut self.resources;

        let referenced: BTreeSet<&ResourceUid> =
            workloads.values().flat_map(|b| b.values()).collect();
        for (id, resource) in resources.iter_mut() {
            resource.current = referenced.contains(id);
        }
    }

    /// Instance id bound to a workload's local resource name
    pub fn resource_uid(&self, workload: &str, local_name: &str) -> Option<&ResourceUid> {
        self.resources.workloads.get(workload)?.get(local_name)
    }

    pub fn resource(&self, id: &ResourceUid) -> Option<&Resource> {
        self.resources.resources.get(id)
    }

    /// All tracked resources in instance-id order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.resources.values()
    }

    /// Resources still referenced by some workload, in instance-id order
    pub fn current_resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources().filter(|r| r.current)
    }

    pub fn provisioned_resource(&self, id: &ResourceUid) -> Option<&Provisioned> {
        self.resources.provisioned.get(id)
    }

    pub fn set_provisioned_resource(&mut self, id: ResourceUid, provisioned: Provisioned) {
        self.resources.provisioned.insert(id, provisioned);
    }

    /// Provisioned records of current resources, in instance-id order
    pub fn current_provisioned_resources(
        &self,
    ) -> impl Iterator<Item = (&ResourceUid, &Provisioned)> {
        self.resources
            .provisioned
            .iter()
            .filter(|(id, _)| self.resource(id).is_some_and(|r| r.current))
    }

    pub fn spec(&self, workload: &str) -> Option<&Workload> {
        self.workloads.specs.get(workload)
    }

    /// Tracked workload specs in name order
    pub fn specs(&self) -> impl Iterator<Item = (&str, &Workload)> {
        self.workloads.specs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn provisioned_workload(&self, workload: &str) -> Option<&Provisioned> {
        self.workloads.provisioned.get(workload)
    }

    pub fn set_provisioned_workload(
        &mut self,
        workload: impl Into<String>,
        provisioned: Provisioned,
    ) {
        self.workloads
            .provisioned
            .insert(workload.into(), provisioned);
    }

    /// Provisioned records of all tracked workloads, in name order
    pub fn provisioned_workloads(&self) -> impl Iterator<Item = (&str, &Provisioned)> {
        self.workloads
            .provisioned
            .iter()
            .map(|(k, v)| (k.as_str(), v))
    }

    pub fn build(&self, workload: &str) -> Option<&Value> {
        self.workloads.build.get(workload)
    }

    pub fn set_build(&mut self, workload: impl Into<String>, build: Value) {
        self.workloads.build.insert(workload.into(), build);
    }

    pub fn source_dir(&self, workload: &str) -> Option<&Path> {
        self.workloads.source_dirs.get(workload).map(PathBuf::as_path)
    }

    pub fn set_source_dir(&mut self, workload: impl Into<String>, dir: impl Into<PathBuf>) {
        self.workloads.source_dirs.insert(workload.into(), dir.into());
    }
}

#[cfg(test)]
mod tests;
