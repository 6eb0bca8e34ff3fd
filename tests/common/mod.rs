//! Shared helpers for score-compose integration tests.
#![allow(dead_code)]

pub mod env;

pub use env::{TestEnv, TestResult};
