//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{GenerateUseCase, InitUseCase};
use crate::infrastructure::{LocalFs, YamlContextRepository};

/// Type alias for the concrete InitUseCase
pub type ConcreteInitUseCase = InitUseCase<YamlContextRepository>;

/// Type alias for the concrete GenerateUseCase
pub type ConcreteGenerateUseCase = GenerateUseCase<YamlContextRepository, LocalFs>;

/// Create an init use case backed by the local disk
pub fn create_init_use_case() -> ConcreteInitUseCase {
    InitUseCase::new(YamlContextRepository::new())
}

/// Create a generate use case backed by the local disk
pub fn create_generate_use_case() -> ConcreteGenerateUseCase {
    GenerateUseCase::new(YamlContextRepository::new(), LocalFs::new())
}
