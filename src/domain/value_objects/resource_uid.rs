//! Resource identity
//!
//! A resource declared by a workload is identified by the triple
//! (type, class, global name). The global name is `<workload>.<local name>`,
//! and the instance id is `<type>::<class>::<global name>` with a missing
//! class spelled `default`.
//!
//! The instance id is the join key between a workload's reference and the
//! provisioned record stored in the context, so its format must never change.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable instance id of one concrete resource occurrence
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceUid(String);

impl ResourceUid {
    /// Class used when a declaration omits one
    pub const DEFAULT_CLASS: &'static str = "default";

    const SEPARATOR: &'static str = "::";

    /// Build the instance id for a workload's resource declaration
    pub fn new(workload: &str, local_name: &str, res_type: &str, class: Option<&str>) -> Self {
        Self::from_global_name(&Self::global_name(workload, local_name), res_type, class)
    }

    /// Build the instance id from an already-computed global name
    pub fn from_global_name(global_name: &str, res_type: &str, class: Option<&str>) -> Self {
        Self(format!(
            "{}{sep}{}{sep}{}",
            res_type,
            class.unwrap_or(Self::DEFAULT_CLASS),
            global_name,
            sep = Self::SEPARATOR
        ))
    }

    /// Global name of a workload-local resource binding.
    ///
    /// Independent of type and class, so renaming the binding changes identity.
    pub fn global_name(workload: &str, local_name: &str) -> String {
        format!("{}.{}", workload, local_name)
    }

    /// Split an instance id into (type, class, global name)
    pub fn parts(&self) -> Option<(&str, &str, &str)> {
        let mut parts = self.0.splitn(3, Self::SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(c), Some(n)) => Some((t, c, n)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceUid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ResourceUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
