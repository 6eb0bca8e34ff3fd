//! Key paths used in error messages
//!
//! Paths are rendered JavaScript-style: `.services.web` for bare identifiers,
//! `["one.ONE"]` for anything else, so every path is unambiguous.

use std::sync::LazyLock;

use regex::Regex;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_$][0-9a-zA-Z_$]*$").expect("identifier pattern is valid")
});

/// Render one path segment for `key`
pub fn path_segment(key: &str) -> String {
    if IDENTIFIER.is_match(key) {
        format!(".{}", key)
    } else {
        format!("[\"{}\"]", key.replace('"', "\\\""))
    }
}

/// Append the segment for `key` to `path`
pub fn join(path: &str, key: &str) -> String {
    let mut out = String::with_capacity(path.len() + key.len() + 4);
    out.push_str(path);
    out.push_str(&path_segment(key));
    out
}
