//! Workload converter
//!
//! Turns one workload spec into compose service fragments. Containers are
//! handled in name order; the first one is the primary service that owns the
//! workload's ports, every other container joins its network namespace.
//! Inline and sourced files are content-addressed: each distinct resolved
//! content becomes one entry in the fragment's file map, bind-mounted
//! read-only from `<files dir>/<hash>`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::{Container, Context, Mapping, Provisioned, Workload};
use crate::domain::ports::FileSystem;
use crate::domain::services::placeholder::PlaceholderResolver;
use crate::domain::value_objects::ContentHash;
use crate::error::{ComposeError, ComposeResult, ResultExt};

/// A compose service entry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComposeService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entrypoint: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub environment: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ports: Vec<ComposePort>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<ComposeVolume>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposePort {
    pub target: u16,
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposeVolume {
    #[serde(rename = "type")]
    pub kind: VolumeKind,
    pub source: String,
    pub target: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub read_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeKind {
    Volume,
    Bind,
}

impl VolumeKind {
    /// Paths (`/...`, `./...`, `../...`) are bind mounts, anything else is a named volume
    pub fn for_source(source: &str) -> Self {
        if source.starts_with('/') || source.starts_with('.') {
            VolumeKind::Bind
        } else {
            VolumeKind::Volume
        }
    }
}

/// Build context used for `image: .` when no build configuration was recorded
const DEFAULT_BUILD_CONTEXT: &str = ".";

/// Converts workloads using the context's resource outputs
pub struct WorkloadConverter<'a, F: FileSystem + ?Sized> {
    context: &'a Context,
    fs: &'a F,
    /// Directory file sources are resolved against when the context records
    /// none for the workload
    source_dir: PathBuf,
    /// Directory side files are mounted from, as written into the manifest
    files_dir: String,
}

impl<'a, F: FileSystem + ?Sized> WorkloadConverter<'a, F> {
    pub fn new(context: &'a Context, fs: &'a F, files_dir: impl Into<String>) -> Self {
        Self {
            context,
            fs,
            source_dir: PathBuf::new(),
            files_dir: files_dir.into(),
        }
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// Convert a workload into its manifest fragment
    pub fn convert(&self, workload: &Workload) -> ComposeResult<Provisioned> {
        let name = workload
            .name()
            .ok_or_else(|| ComposeError::validation("workload metadata is missing a name"))?;
        let primary = workload.container_names().next().ok_or_else(|| {
            ComposeError::validation(
                "workload does not have any containers to convert into a compose service",
            )
        })?;
        let primary_service = service_name(name, primary);
        let resolver = PlaceholderResolver::new(self.context, name);
        let ports = workload_ports(workload);

        let mut provisioned = Provisioned::new();
        for (container_name, container) in &workload.containers {
            let mut service = self.convert_container(
                name,
                container_name,
                container,
                &resolver,
                &mut provisioned.files,
            )?;

            if container_name == primary {
                service.ports = ports.clone();
            } else {
                service.network_mode = Some(format!("service:{}", primary_service));
            }

            debug!(workload = name, container = %container_name, "converted container");
            provisioned.services.insert(
                service_name(name, container_name),
                serde_json::to_value(service)?,
            );
        }
        Ok(provisioned)
    }

    fn convert_container(
        &self,
        workload: &str,
        container_name: &str,
        container: &Container,
        resolver: &PlaceholderResolver<'_>,
        files: &mut Mapping,
    ) -> ComposeResult<ComposeService> {
        let mut service = ComposeService {
            entrypoint: container.command.clone(),
            command: container.args.clone(),
            ..Default::default()
        };

        if container.needs_build() {
            let build = self
                .context
                .build(workload)
                .cloned()
                .unwrap_or_else(|| Value::String(DEFAULT_BUILD_CONTEXT.to_string()));
            service.build = Some(build);
        } else {
            service.image = Some(container.image.clone());
        }

        for (key, value) in &container.variables {
            let resolved = resolver.substitute(value).context_with(|| {
                format!(
                    "resolving placeholders .{}.containers.{}.variables.{}",
                    workload, container_name, key
                )
            })?;
            service.environment.insert(key.clone(), resolved);
        }

        for (idx, volume) in container.volumes.iter().enumerate() {
            if let Some(path) = volume.path.as_deref().filter(|p| !p.is_empty()) {
                return Err(ComposeError::Unsupported(format!(
                    "can't mount named volume with sub path '{}'",
                    path
                )));
            }
            let source = resolver.substitute(&volume.source).context_with(|| {
                format!(
                    "resolving placeholders .{}.containers.{}.volumes.{}",
                    workload, container_name, idx
                )
            })?;
            service.volumes.push(ComposeVolume {
                kind: VolumeKind::for_source(&source),
                source,
                target: volume.target.clone(),
                read_only: volume.read_only.unwrap_or(false),
            });
        }

        for (idx, file) in container.files.iter().enumerate() {
            let location = format!(
                ".{}.containers.{}.files.{} ({})",
                workload, container_name, idx, file.target
            );
            let content = match (&file.source, &file.content) {
                (Some(source), _) => {
                    let base = self
                        .context
                        .source_dir(workload)
                        .unwrap_or(self.source_dir.as_path());
                    let path = base.join(source);
                    self.fs.read(&path).context_with(|| {
                        format!(
                            "loading source file {}: unable to read file {}",
                            location, source
                        )
                    })?
                }
                (None, Some(content)) => content.to_text(),
                (None, None) => {
                    return Err(ComposeError::validation(format!(
                        "file {} has neither a source nor content",
                        location
                    )))
                }
            };
            let content = if file.expands_placeholders() {
                resolver
                    .substitute(&content)
                    .context_with(|| format!("resolving placeholders {}", location))?
            } else {
                content
            };

            let hash = ContentHash::of(&content);
            service.volumes.push(ComposeVolume {
                kind: VolumeKind::Bind,
                source: mount_path(&self.files_dir, hash.as_str()),
                target: file.target.clone(),
                read_only: true,
            });
            files.insert(hash.into_string(), Value::String(content));
        }

        service.volumes.sort_by(|a, b| a.target.cmp(&b.target));
        Ok(service)
    }
}

/// Compose service name for a container
pub fn service_name(workload: &str, container: &str) -> String {
    format!("{}-{}", workload, container)
}

/// Declared ports in published-port order; target defaults to the published port
fn workload_ports(workload: &Workload) -> Vec<ComposePort> {
    let Some(service) = &workload.service else {
        return Vec::new();
    };
    let mut ports: Vec<(u16, ComposePort)> = service
        .ports
        .values()
        .map(|p| {
            (
                p.port,
                ComposePort {
                    target: p.target_port.unwrap_or(p.port),
                    published: p.port.to_string(),
                    protocol: p.protocol.clone(),
                },
            )
        })
        .collect();
    ports.sort_by(|(a, pa), (b, pb)| a.cmp(b).then_with(|| pa.target.cmp(&pb.target)));
    ports.into_iter().map(|(_, p)| p).collect()
}

fn mount_path(files_dir: &str, name: &str) -> String {
    Path::new(files_dir).join(name).to_string_lossy().into_owned()
}
