//! Score spec loading
//!
//! Parses a Score file into a generic tree, applies `-p PATH[=VALUE]`
//! property overrides, runs the structural checks the rest of the pipeline
//! depends on and finally maps the tree onto a typed `Workload`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::{Mapping, Workload};
use crate::error::{ComposeError, ComposeResult, ResultExt};

/// RFC 1123 label, the format Score requires for workload names
static WORKLOAD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("workload name pattern is valid")
});

/// Parse, override and validate a Score spec
pub fn load_spec(content: &str, overrides: &[String]) -> ComposeResult<Workload> {
    let mut raw: Value = serde_yaml_ng::from_str(content).context_with(|| "parsing score spec")?;

    for expr in overrides {
        apply_override(&mut raw, expr)?;
    }

    validate(&raw).context_with(|| "validating workload spec")?;
    let workload: Workload =
        serde_json::from_value(raw).context_with(|| "validating workload spec")?;
    debug!(workload = workload.name().unwrap_or_default(), "loaded score spec");
    Ok(workload)
}

/// Apply one `PATH[=VALUE]` override.
///
/// VALUE is parsed as YAML and falls back to the raw string when it is not
/// valid YAML. Without `=VALUE` the property is removed.
pub fn apply_override(raw: &mut Value, expr: &str) -> ComposeResult<()> {
    match expr.split_once('=') {
        Some((path, value)) => {
            let value: Value = serde_yaml_ng::from_str(value)
                .unwrap_or_else(|_| Value::String(value.to_string()));
            let segments = split_path(path)?;
            set_path(raw, &segments, value)
                .map_err(|e| ComposeError::validation(format!("overriding '{}': {}", path, e)))
        }
        None => {
            let segments = split_path(expr)?;
            delete_path(raw, &segments)
                .map_err(|e| ComposeError::validation(format!("removing '{}': {}", expr, e)))
        }
    }
}

/// Split a dotted path; `\.` escapes a literal dot
fn split_path(path: &str) -> ComposeResult<Vec<String>> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next) => current.push(next),
                None => current.push('\\'),
            },
            '.' => segments.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    segments.push(current);

    if segments.iter().any(String::is_empty) {
        return Err(ComposeError::validation(format!(
            "invalid property path '{}'",
            path
        )));
    }
    Ok(segments)
}

fn set_path(node: &mut Value, segments: &[String], value: Value) -> Result<(), String> {
    let Some((head, rest)) = segments.split_first() else {
        *node = value;
        return Ok(());
    };

    if node.is_null() {
        *node = Value::Object(Mapping::new());
    }
    match node {
        Value::Object(map) => {
            let child = map.entry(head.clone()).or_insert(Value::Null);
            set_path(child, rest, value)
        }
        Value::Array(items) => {
            let index = array_index(head, items.len())?;
            if index == items.len() {
                items.push(Value::Null);
            }
            set_path(&mut items[index], rest, value)
        }
        _ => Err(format!("cannot set '{}' on a scalar value", head)),
    }
}

fn delete_path(node: &mut Value, segments: &[String]) -> Result<(), String> {
    let Some((head, rest)) = segments.split_first() else {
        return Ok(());
    };

    match node {
        Value::Object(map) if rest.is_empty() => {
            map.remove(head);
            Ok(())
        }
        Value::Object(map) => match map.get_mut(head) {
            Some(child) => delete_path(child, rest),
            None => Ok(()),
        },
        Value::Array(items) => {
            let index = array_index(head, items.len())?;
            if index >= items.len() {
                return Ok(());
            }
            if rest.is_empty() {
                items.remove(index);
                Ok(())
            } else {
                delete_path(&mut items[index], rest)
            }
        }
        _ => Ok(()),
    }
}

/// Parse a sequence index; `-1` and `len` address a new trailing element
fn array_index(segment: &str, len: usize) -> Result<usize, String> {
    if segment == "-1" {
        return Ok(len);
    }
    let index: usize = segment
        .parse()
        .map_err(|_| format!("cannot index a sequence with non-integer '{}'", segment))?;
    if index > len {
        return Err(format!("index {} is out of bounds", index));
    }
    Ok(index)
}

fn validate(raw: &Value) -> ComposeResult<()> {
    let root = raw
        .as_object()
        .ok_or_else(|| ComposeError::validation("the score spec must be a mapping"))?;

    match root.get("apiVersion") {
        Some(Value::String(v)) if !v.is_empty() => {}
        _ => return Err(ComposeError::validation("apiVersion is required")),
    }

    let name = root
        .get("metadata")
        .and_then(|m| m.get("name"))
        .ok_or_else(|| ComposeError::validation("metadata.name is required"))?;
    match name.as_str() {
        Some(name) if WORKLOAD_NAME.is_match(name) => {}
        _ => {
            return Err(ComposeError::validation(format!(
                "metadata.name {} is not a valid workload name",
                name
            )))
        }
    }

    match root.get("containers") {
        Some(Value::Object(_)) => Ok(()),
        _ => Err(ComposeError::validation("containers must be a mapping")),
    }
}
