//! Generate Use Case
//!
//! Adds a Score workload to the project and regenerates the compose file.

mod options;
mod result;
mod use_case;

pub use options::GenerateOptions;
pub use result::GenerateResult;
pub use use_case::GenerateUseCase;
