//! Generate Result

use std::path::PathBuf;

/// Result of a generate operation
#[derive(Debug, Clone, Default)]
pub struct GenerateResult {
    /// Name of the workload that was added
    pub workload: String,
    /// Compose file that was written
    pub manifest: PathBuf,
    /// Compose services in the manifest
    pub services: Vec<String>,
    /// Side files that were written
    pub files: Vec<PathBuf>,
    /// Volume directories that were created
    pub volume_dirs: Vec<PathBuf>,
}
