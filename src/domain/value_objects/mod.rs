//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod hash;
pub mod key_path;
mod resource_uid;

pub use hash::{hash_of_string, ContentHash};
pub use resource_uid::ResourceUid;
