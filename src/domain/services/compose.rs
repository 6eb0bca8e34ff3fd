//! Compose project assembly
//!
//! Collates the provisioned fragments of all current resources and all
//! workloads, merges workload and resource sections, and produces the final
//! compose document plus the side files and volume directories it relies on.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use crate::domain::entities::{Context, Mapping, Provisioned};
use crate::domain::services::merge::{collate, escape_interpolation, merge_maps, value_kind};
use crate::error::{ComposeError, ComposeResult, ResultExt};

/// Project name used when the context does not carry one
pub const DEFAULT_PROJECT_NAME: &str = "score-compose";

/// The assembled compose project
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeProject {
    /// The compose document (`name`, `services`, `networks`)
    pub document: Value,
    /// Side files relative to the files directory: name -> content
    pub files: BTreeMap<String, String>,
    /// Volume directories relative to the volumes directory
    pub volume_dirs: Vec<String>,
}

#[derive(Clone, Copy)]
enum Section {
    Services,
    Networks,
    Files,
    VolumeDirs,
}

impl Section {
    fn name(self) -> &'static str {
        match self {
            Section::Services => "services",
            Section::Networks => "networks",
            Section::Files => "files",
            Section::VolumeDirs => "volumeDirs",
        }
    }

    fn select(self, provisioned: &Provisioned) -> &Mapping {
        match self {
            Section::Services => &provisioned.services,
            Section::Networks => &provisioned.networks,
            Section::Files => &provisioned.files,
            Section::VolumeDirs => &provisioned.volume_dirs,
        }
    }
}

/// Build the compose project from the context's provisioned state
pub fn generate_compose_project(context: &Context) -> ComposeResult<ComposeProject> {
    let services = merge_section(context, Section::Services)?;
    let networks = merge_section(context, Section::Networks)?;
    let merged_files = merge_section(context, Section::Files)?;
    let volume_dirs = merge_section(context, Section::VolumeDirs)?;

    let mut files = BTreeMap::new();
    for (name, content) in merged_files {
        match content {
            Value::String(text) => {
                files.insert(name, text);
            }
            other => {
                return Err(ComposeError::validation(format!(
                    "content of file {} is not a string: got {}",
                    name,
                    value_kind(&other)
                )))
            }
        }
    }

    let name = match context.project_name() {
        "" => DEFAULT_PROJECT_NAME,
        name => name,
    };
    let mut document = serde_json::json!({
        "name": name,
        "services": services,
        "networks": networks,
    });
    escape_interpolation(&mut document);

    debug!(
        services = document["services"].as_object().map_or(0, |m| m.len()),
        files = files.len(),
        volume_dirs = volume_dirs.len(),
        "assembled compose project"
    );

    Ok(ComposeProject {
        document,
        files,
        volume_dirs: volume_dirs.into_iter().map(|(k, _)| k).collect(),
    })
}

/// Collate one section for workloads and for current resources, then merge
fn merge_section(context: &Context, section: Section) -> ComposeResult<Mapping> {
    let name = section.name();

    let from_workloads = collate(
        context
            .provisioned_workloads()
            .map(|(workload, p)| (workload, section.select(p))),
        name,
    )?;
    let from_resources = collate(
        context
            .current_provisioned_resources()
            .map(|(id, p)| (id.as_str(), section.select(p))),
        name,
    )?;

    merge_maps(&from_workloads, &from_resources, name)
        .context_with(|| format!("merging {}", name))
}
