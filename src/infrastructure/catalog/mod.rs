//! Provisioner catalog loading
//!
//! The built-in catalog is compiled into the binary. A project can extend or
//! replace types with `<context>/provisioners.yaml`. Unknown keys in either
//! document are reported as warnings, not errors.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::entities::ProvisionerCatalog;
use crate::domain::ports::FileSystem;
use crate::error::{ComposeError, ComposeResult, ResultExt};

/// Built-in provisioner definitions
pub const DEFAULT_PROVISIONERS: &str = include_str!("default_provisioners.yaml");

/// File name of the project-level catalog inside the context directory
pub const PROJECT_PROVISIONERS_FILE: &str = "provisioners.yaml";

/// Parse a catalog document, returning the paths of unknown keys
pub fn parse_catalog(content: &str) -> ComposeResult<(ProvisionerCatalog, Vec<String>)> {
    let mut unknown = Vec::new();
    let deserializer = serde_yaml_ng::Deserializer::from_str(content);
    let catalog: ProvisionerCatalog = serde_ignored::deserialize(deserializer, |path| {
        unknown.push(path.to_string());
    })?;
    Ok((catalog, unknown))
}

/// The built-in catalog
pub fn default_catalog() -> ComposeResult<ProvisionerCatalog> {
    let (catalog, _) = parse_catalog(DEFAULT_PROVISIONERS)
        .context_with(|| "loading built-in provisioners")?;
    Ok(catalog)
}

/// Load the catalog for a project: built-ins, overlaid with the project file
/// when present, with `paths` injected
pub fn load_catalog<F: FileSystem + ?Sized>(
    fs: &F,
    context_dir: &Path,
    paths: BTreeMap<String, String>,
) -> ComposeResult<ProvisionerCatalog> {
    let mut catalog = default_catalog()?;

    let project_file = context_dir.join(PROJECT_PROVISIONERS_FILE);
    if fs.exists(&project_file) {
        let content = fs.read(&project_file)?;
        let (custom, unknown) = parse_catalog(&content).context_with(|| {
            format!("loading provisioners from {}", project_file.display())
        })?;
        for key in unknown {
            warn!(file = %project_file.display(), %key, "ignoring unknown key in provisioners file");
        }
        debug!(
            file = %project_file.display(),
            types = ?custom.type_names().collect::<Vec<_>>(),
            "layering project provisioners"
        );
        catalog.overlay(custom);
    }

    if catalog.types.is_empty() {
        return Err(ComposeError::validation("no provisioners are defined"));
    }
    catalog.paths = paths;
    Ok(catalog)
}
