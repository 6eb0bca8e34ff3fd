//! Domain Layer
//!
//! The core of score-compose: turning workloads and their resource
//! dependencies into compose fragments, without direct I/O.
//!
//! ## Structure
//!
//! - `entities/` - Core domain entities (Workload, Context, Provisioned, ProvisionerCatalog)
//! - `value_objects/` - Immutable value types (ResourceUid, ContentHash, key paths)
//! - `services/` - Domain services (provisioner engine, converter, merge, compose assembly)
//! - `ports/` - Interface definitions for infrastructure

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
