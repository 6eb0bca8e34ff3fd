//! Init Use Case
//!
//! Creates a new project: an empty context carrying the compose project name,
//! saved into the context directory.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::info;

use crate::domain::entities::Context;
use crate::domain::ports::{ContextError, ContextRepository};
use crate::error::{ComposeError, ComposeResult};

/// Compose project names: lowercase alphanumerics, `-` and `_`, not leading
static PROJECT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("project name pattern is valid")
});

pub fn is_valid_project_name(name: &str) -> bool {
    PROJECT_NAME.is_match(name)
}

/// Init use case
pub struct InitUseCase<CR: ContextRepository> {
    context_repo: CR,
}

impl<CR: ContextRepository> InitUseCase<CR> {
    pub fn new(context_repo: CR) -> Self {
        Self { context_repo }
    }

    /// Create the project in `context_dir`
    pub fn execute(&self, project: &str, context_dir: &Path) -> ComposeResult<Context> {
        if !is_valid_project_name(project) {
            return Err(ComposeError::validation(format!(
                "not a valid compose project id: {}",
                project
            )));
        }

        match self.context_repo.load(context_dir) {
            Ok(_) => {
                return Err(ComposeError::ProjectExists {
                    path: context_dir.to_path_buf(),
                })
            }
            Err(ContextError::NotFound) => {}
            Err(e) => return Err(e.into()),
        }

        let context = Context::new(project);
        self.context_repo.save(&context, context_dir)?;
        info!(project, context_dir = %context_dir.display(), "initialised project");
        Ok(context)
    }
}
