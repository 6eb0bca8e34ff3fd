//! Test environment for isolated score-compose runs.
//!
//! Provides `TestEnv` - a temp project directory plus helpers to run the
//! CLI inside it without picking up the caller's environment.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a score-compose command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory
pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// An environment with `init demo` already run
    pub fn initialised() -> Self {
        let env = Self::new();
        let result = env.run(&["init", "demo"]);
        assert!(result.success, "init failed:\n{}", result.combined_output());
        env
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }

    /// Parsed compose file at `relative`
    pub fn manifest(&self, relative: &str) -> serde_json::Value {
        serde_yaml_ng::from_str(&self.read(relative)).unwrap()
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_in(self.root(), args)
    }

    pub fn run_in(&self, dir: &Path, args: &[&str]) -> TestResult {
        let output = Command::new(env!("CARGO_BIN_EXE_score-compose"))
            .current_dir(dir)
            .args(args)
            .env_remove("SCORE_COMPOSE_CONTEXT_DIR")
            .env_remove("RUST_LOG")
            .output()
            .unwrap();
        TestResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
