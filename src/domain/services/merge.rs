//! Structural merge of manifest fragments
//!
//! Two merge flavours live here:
//! - [`merge_maps`] is additive and conflict-detecting. It is used to collate
//!   the fragments of every resource and workload into one manifest tree.
//! - [`merge_patch`] is RFC 7386 JSON Merge Patch. It is used to apply the
//!   `shared` template of a provisioner to the cross-resource scratch space.

use serde_json::Value;
use thiserror::Error;

use crate::domain::entities::Mapping;
use crate::domain::value_objects::key_path;

/// Two fragments hold different non-mapping values for the same key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("conflict when merging maps for key {path}")]
pub struct MergeConflict {
    pub path: String,
}

impl MergeConflict {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Additively merge `b` into `a`.
///
/// Keys present in only one side are kept. For keys present in both:
/// mappings recurse, a null on one side yields the other side, deeply equal
/// values are kept once, and anything else is a [`MergeConflict`] naming the
/// key path below `path`.
pub fn merge_maps(a: &Mapping, b: &Mapping, path: &str) -> Result<Mapping, MergeConflict> {
    let mut out = a.clone();
    for (key, right) in b {
        let Some(left) = a.get(key) else {
            out.insert(key.clone(), right.clone());
            continue;
        };

        let merged = match (left, right) {
            (Value::Object(l), Value::Object(r)) => {
                Value::Object(merge_maps(l, r, &key_path::join(path, key))?)
            }
            (Value::Null, other) | (other, Value::Null) => other.clone(),
            (l, r) if l == r => l.clone(),
            _ => return Err(MergeConflict::new(key_path::join(path, key))),
        };
        out.insert(key.clone(), merged);
    }
    Ok(out)
}

/// Merge one section of many fragments into a single mapping.
///
/// `fragments` yields `(id, section)` pairs; the id qualifies the key path of
/// any conflict below `name`.
pub fn collate<'a, I>(fragments: I, name: &str) -> Result<Mapping, MergeConflict>
where
    I: IntoIterator<Item = (&'a str, &'a Mapping)>,
{
    let mut collated = Mapping::new();
    for (id, section) in fragments {
        collated = merge_maps(section, &collated, &key_path::join(name, id))?;
    }
    Ok(collated)
}

/// Apply `patch` to `target` in place following RFC 7386.
///
/// Null deletes a key, mappings merge recursively, every other value
/// replaces what was there.
pub fn merge_patch(target: &mut Mapping, patch: &Mapping) {
    for (key, value) in patch {
        match value {
            Value::Null => {
                target.remove(key);
            }
            Value::Object(nested) => {
                let slot = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Mapping::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Mapping::new());
                }
                if let Value::Object(existing) = slot {
                    merge_patch(existing, nested);
                }
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}

/// Escape compose variable interpolation in every string leaf (`$` -> `$$`)
pub fn escape_interpolation(value: &mut Value) {
    match value {
        Value::String(s) if s.contains('$') => *s = s.replace('$', "$$"),
        Value::Array(items) => items.iter_mut().for_each(escape_interpolation),
        Value::Object(map) => map.values_mut().for_each(escape_interpolation),
        _ => {}
    }
}

/// Short name of a value's YAML kind, for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
