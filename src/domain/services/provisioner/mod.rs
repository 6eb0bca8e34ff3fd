//! Provisioner engine
//!
//! Turns one resource instance into manifest fragments by rendering the
//! templates registered for its type. Templates are rendered with minijinja
//! and each must produce a YAML mapping. Stages run in a fixed order and
//! every stage sees the results of the stages before it:
//!
//! 1. `init`
//! 2. `outputs` (sees `init`)
//! 3. `services`, `networks`, `files`, `volumeDirs` (see `init`, `outputs`)
//! 4. `state`, `shared` (see everything above)
//!
//! Every stage also receives `id` (hashed instance id), `type`, `class`,
//! `params`, `paths`, `state` (the previous state) and `shared`.

mod functions;

use minijinja::Environment;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::entities::{Mapping, Provisioned, ProvisionerCatalog, ProvisionerTemplates};
use crate::domain::services::merge::{merge_patch, value_kind};
use crate::domain::value_objects::{hash_of_string, ResourceUid};

/// Provisioning errors
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("no implementation for type {0}")]
    UnknownType(String),

    /// A template failed to parse or render
    #[error("error rendering template {stage}: {source}")]
    Template {
        stage: Stage,
        #[source]
        source: minijinja::Error,
    },

    /// A template rendered to something other than a YAML mapping
    #[error("output of template {stage} was not a valid YAML mapping: {message}")]
    Output { stage: Stage, message: String },
}

/// One named template of a provisioner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Outputs,
    Services,
    Networks,
    Files,
    VolumeDirs,
    State,
    Shared,
}

impl Stage {
    /// Name of the stage, also the key its result is exposed under
    pub fn name(self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Outputs => "outputs",
            Stage::Services => "services",
            Stage::Networks => "networks",
            Stage::Files => "files",
            Stage::VolumeDirs => "volumeDirs",
            Stage::State => "state",
            Stage::Shared => "shared",
        }
    }

    fn source(self, templates: &ProvisionerTemplates) -> &str {
        match self {
            Stage::Init => &templates.init,
            Stage::Outputs => &templates.outputs,
            Stage::Services => &templates.services,
            Stage::Networks => &templates.networks,
            Stage::Files => &templates.files,
            Stage::VolumeDirs => &templates.volume_dirs,
            Stage::State => &templates.state,
            Stage::Shared => &templates.shared,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything known about one resource instance before provisioning
#[derive(Debug, Clone, Copy)]
pub struct ProvisionRequest<'a> {
    pub id: &'a ResourceUid,
    pub res_type: &'a str,
    pub class: &'a str,
    pub params: Option<&'a Mapping>,
    /// State persisted by the previous run
    pub state: Option<&'a Mapping>,
}

/// Renders provisioner templates from an immutable catalog
pub struct ProvisionerEngine<'c> {
    catalog: &'c ProvisionerCatalog,
    env: Environment<'static>,
}

impl<'c> ProvisionerEngine<'c> {
    pub fn new(catalog: &'c ProvisionerCatalog) -> Self {
        let mut env = Environment::new();
        functions::register(&mut env);
        Self { catalog, env }
    }

    /// Provision one resource instance.
    ///
    /// `shared` is the cross-resource scratch space; the rendered `shared`
    /// template is merge-patched into it.
    pub fn provision(
        &self,
        request: &ProvisionRequest<'_>,
        shared: &mut Mapping,
    ) -> Result<Provisioned, ProvisionError> {
        let templates = self
            .catalog
            .get(request.res_type)
            .ok_or_else(|| ProvisionError::UnknownType(request.res_type.to_string()))?;
        debug!(
            id = %request.id,
            res_type = request.res_type,
            class = request.class,
            "provisioning resource"
        );

        let mut inputs = self.base_inputs(request, shared);

        let init = self.render(Stage::Init, templates, &inputs)?;
        expose(&mut inputs, Stage::Init, &init);

        let outputs = self.render(Stage::Outputs, templates, &inputs)?;
        expose(&mut inputs, Stage::Outputs, &outputs);

        let services = self.render(Stage::Services, templates, &inputs)?;
        let networks = self.render(Stage::Networks, templates, &inputs)?;
        let files = self.render(Stage::Files, templates, &inputs)?;
        let volume_dirs = self.render(Stage::VolumeDirs, templates, &inputs)?;
        expose(&mut inputs, Stage::Services, &services);
        expose(&mut inputs, Stage::Networks, &networks);
        expose(&mut inputs, Stage::Files, &files);
        expose(&mut inputs, Stage::VolumeDirs, &volume_dirs);

        let state = self.render(Stage::State, templates, &inputs)?;
        let shared_update = self.render(Stage::Shared, templates, &inputs)?;
        merge_patch(shared, &shared_update);

        Ok(Provisioned {
            services,
            networks,
            files,
            volume_dirs,
            state,
            outputs,
        })
    }

    fn base_inputs(&self, request: &ProvisionRequest<'_>, shared: &Mapping) -> Mapping {
        let paths: Mapping = self
            .catalog
            .paths
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        let mut inputs = Mapping::new();
        inputs.insert("id".into(), Value::String(hash_of_string(request.id.as_str())));
        inputs.insert("type".into(), Value::String(request.res_type.to_string()));
        inputs.insert("class".into(), Value::String(request.class.to_string()));
        inputs.insert(
            "params".into(),
            Value::Object(request.params.cloned().unwrap_or_default()),
        );
        inputs.insert("paths".into(), Value::Object(paths));
        inputs.insert(
            "state".into(),
            Value::Object(request.state.cloned().unwrap_or_default()),
        );
        inputs.insert("shared".into(), Value::Object(shared.clone()));
        inputs
    }

    fn render(
        &self,
        stage: Stage,
        templates: &ProvisionerTemplates,
        inputs: &Mapping,
    ) -> Result<Mapping, ProvisionError> {
        let source = stage.source(templates);
        if source.trim().is_empty() {
            return Ok(Mapping::new());
        }

        let text = self
            .env
            .render_named_str(stage.name(), source, inputs)
            .map_err(|source| ProvisionError::Template { stage, source })?;
        parse_mapping(stage, &text)
    }
}

/// Make a stage result visible to the stages after it
fn expose(inputs: &mut Mapping, stage: Stage, result: &Mapping) {
    inputs.insert(stage.name().to_string(), Value::Object(result.clone()));
}

/// Parse rendered template text; blank or comment-only output and `null`
/// are empty mappings
fn parse_mapping(stage: Stage, text: &str) -> Result<Mapping, ProvisionError> {
    let blank = text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Mapping::new());
    }
    let value: Value = serde_yaml_ng::from_str(text).map_err(|e| ProvisionError::Output {
        stage,
        message: e.to_string(),
    })?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(ProvisionError::Output {
            stage,
            message: format!("expected a mapping, got {}", value_kind(&other)),
        }),
    }
}
