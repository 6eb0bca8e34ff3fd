//! Structural checks on the assembled compose document
//!
//! Only the invariants the generator itself depends on are checked here;
//! this is not a full compose schema validation.

use serde_json::Value;

use crate::error::{ComposeError, ComposeResult};

/// Validate a compose document
pub fn check_manifest(document: &Value) -> ComposeResult<()> {
    let root = document
        .as_object()
        .ok_or_else(|| invalid("the compose document must be a mapping"))?;

    let services = match root.get("services") {
        None => None,
        Some(Value::Object(services)) => Some(services),
        Some(_) => return Err(invalid("services must be a mapping")),
    };
    if let Some(networks) = root.get("networks") {
        if !networks.is_object() {
            return Err(invalid("networks must be a mapping"));
        }
    }

    let Some(services) = services else {
        return Ok(());
    };
    for (name, service) in services {
        let service = service
            .as_object()
            .ok_or_else(|| invalid(format!("services.{}: must be a mapping", name)))?;

        if !service.contains_key("image") && !service.contains_key("build") {
            return Err(invalid(format!(
                "services.{}: must have either an image or a build",
                name
            )));
        }

        if let Some(mode) = service.get("network_mode").and_then(Value::as_str) {
            if let Some(target) = mode.strip_prefix("service:") {
                if !services.contains_key(target) {
                    return Err(invalid(format!(
                        "services.{}: network_mode refers to unknown service '{}'",
                        name, target
                    )));
                }
            }
        }
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> ComposeError {
    ComposeError::validation(format!("invalid compose project: {}", message.into()))
}
