//! Configuration module for score-compose
//!
//! The context directory is resolved with this precedence:
//! 1. `--context-dir` CLI flag (highest priority)
//! 2. `SCORE_COMPOSE_CONTEXT_DIR` environment variable
//! 3. Nearest `.score-compose` directory above the current directory
//! 4. `<current dir>/.score-compose` (lowest priority)

mod loader;
mod types;

pub use loader::{display_path, find_context_dir, with_env_overrides};
pub use types::{Config, CONTEXT_DIR_ENV, CONTEXT_DIR_NAME};
