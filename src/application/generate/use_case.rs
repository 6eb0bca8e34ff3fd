//! Generate Use Case
//!
//! Orchestrates the generate flow:
//! 1. Load the Score file and apply overrides
//! 2. Register the workload in the project context
//! 3. Provision every current resource
//! 4. Convert every tracked workload into compose services
//! 5. Collate the compose project and write it with its side files
//! 6. Save the context
//!
//! The context is saved last, so a failure at any step leaves the previous
//! state on disk untouched.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::application::spec_loader::load_spec;
use crate::domain::entities::{Context, Mapping, Provisioned};
use crate::domain::ports::{ContextError, ContextRepository, FileSystem};
use crate::domain::services::{
    check_manifest, generate_compose_project, ProvisionRequest, ProvisionerEngine,
    WorkloadConverter,
};
use crate::domain::value_objects::ResourceUid;
use crate::error::{ComposeError, ComposeResult, ResultExt};
use crate::infrastructure::catalog::load_catalog;

use super::options::GenerateOptions;
use super::result::GenerateResult;

/// Generate use case - adds a workload and regenerates the compose file
pub struct GenerateUseCase<CR, FS>
where
    CR: ContextRepository,
    FS: FileSystem,
{
    context_repo: CR,
    file_system: FS,
}

/// Owned copy of what the engine needs for one resource
struct PendingResource {
    id: ResourceUid,
    res_type: String,
    class: String,
    params: Option<Mapping>,
    state: Option<Mapping>,
}

impl<CR, FS> GenerateUseCase<CR, FS>
where
    CR: ContextRepository,
    FS: FileSystem,
{
    pub fn new(context_repo: CR, file_system: FS) -> Self {
        Self {
            context_repo,
            file_system,
        }
    }

    pub fn context_repo(&self) -> &CR {
        &self.context_repo
    }

    pub fn file_system(&self) -> &FS {
        &self.file_system
    }

    /// Execute the generate use case
    pub fn execute(&self, options: &GenerateOptions) -> ComposeResult<GenerateResult> {
        if let Some(path) = &options.overrides_file {
            return Err(ComposeError::Unsupported(format!(
                "override file '{}'",
                path.display()
            )));
        }

        let content = self
            .file_system
            .read(&options.score_file)
            .context_with(|| format!("reading score file {}", options.score_file.display()))?;
        let spec = load_spec(&content, &options.overrides)?;
        let workload_name = spec
            .name()
            .ok_or_else(|| {
                ComposeError::validation("workload metadata does not have a name property")
            })?
            .to_string();

        let mut context = self.load_context(&options.context_dir)?;
        context.update(spec)?;
        context.set_source_dir(&workload_name, &options.source_dir);
        if let Some(build) = &options.build {
            context.set_build(&workload_name, parse_build(build)?);
        }
        info!(workload = %workload_name, "added workload to project");

        self.provision_resources(&mut context, options)?;
        self.convert_workloads(&mut context, options)?;

        let project =
            generate_compose_project(&context).context_with(|| "generating compose project")?;
        check_manifest(&project.document)?;

        let mut result = GenerateResult {
            workload: workload_name,
            manifest: options.output.clone(),
            services: services_of(&project.document),
            ..GenerateResult::default()
        };

        let files_dir = options.files_dir();
        for (name, content) in &project.files {
            let path = files_dir.join(name);
            debug!(file = %path.display(), "writing side file");
            self.file_system.write(&path, content)?;
            result.files.push(path);
        }

        let volumes_dir = options.volumes_dir();
        for dir in &project.volume_dirs {
            let path = volumes_dir.join(dir);
            debug!(dir = %path.display(), "creating volume directory");
            self.file_system.create_dir_all(&path)?;
            result.volume_dirs.push(path);
        }

        let manifest = serde_yaml_ng::to_string(&project.document)?;
        self.file_system
            .write(&options.output, &manifest)
            .context_with(|| format!("writing compose file {}", options.output.display()))?;
        info!(
            output = %options.output.display(),
            services = result.services.len(),
            "wrote compose file"
        );

        context.touch_version();
        self.context_repo.save(&context, &options.context_dir)?;
        Ok(result)
    }

    fn load_context(&self, context_dir: &Path) -> ComposeResult<Context> {
        match self.context_repo.load(context_dir) {
            Ok(context) => Ok(context),
            Err(ContextError::NotFound) => Err(ComposeError::ProjectNotFound {
                path: context_dir.to_path_buf(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Provision current resources in instance-id order, threading the
    /// shared scratch space through them
    fn provision_resources(
        &self,
        context: &mut Context,
        options: &GenerateOptions,
    ) -> ComposeResult<()> {
        let catalog = load_catalog(
            &self.file_system,
            &options.context_dir,
            options.paths.clone(),
        )?;
        let engine = ProvisionerEngine::new(&catalog);

        let pending: Vec<PendingResource> = context
            .current_resources()
            .map(|resource| PendingResource {
                id: resource.id.clone(),
                res_type: resource.res_type().to_string(),
                class: resource.class().to_string(),
                params: resource.declaration.params.clone(),
                state: context
                    .provisioned_resource(&resource.id)
                    .map(|p| p.state.clone()),
            })
            .collect();

        let mut shared = Mapping::new();
        for resource in &pending {
            let request = ProvisionRequest {
                id: &resource.id,
                res_type: &resource.res_type,
                class: &resource.class,
                params: resource.params.as_ref(),
                state: resource.state.as_ref(),
            };
            let provisioned = engine
                .provision(&request, &mut shared)
                .context_with(|| format!("provisioning resource {}", resource.id))?;
            context.set_provisioned_resource(resource.id.clone(), provisioned);
        }
        debug!(count = pending.len(), "provisioned resources");
        Ok(())
    }

    /// Convert every tracked workload; earlier workloads are regenerated so
    /// their placeholders see the latest resource outputs. File sources
    /// resolve against the directory recorded for each workload.
    fn convert_workloads(&self, context: &mut Context, options: &GenerateOptions) -> ComposeResult<()> {
        let converted: Vec<(String, Provisioned)> = {
            let converter =
                WorkloadConverter::new(context, &self.file_system, options.files_path())
                    .with_source_dir(&options.source_dir);
            context
                .specs()
                .map(|(name, spec)| {
                    converter
                        .convert(spec)
                        .map(|provisioned| (name.to_string(), provisioned))
                        .context_with(|| format!("converting workload {}", name))
                })
                .collect::<ComposeResult<_>>()?
        };
        for (name, provisioned) in converted {
            context.set_provisioned_workload(name, provisioned);
        }
        Ok(())
    }
}

/// Parse the `--build` value as YAML; a bare string is a build context path
fn parse_build(raw: &str) -> ComposeResult<Value> {
    let value: Value = serde_yaml_ng::from_str(raw).context_with(|| "parsing build configuration")?;
    match value {
        Value::Null => Ok(Value::String(raw.to_string())),
        other => Ok(other),
    }
}

fn services_of(document: &Value) -> Vec<String> {
    document
        .get("services")
        .and_then(Value::as_object)
        .map(|services| services.keys().cloned().collect())
        .unwrap_or_default()
}
