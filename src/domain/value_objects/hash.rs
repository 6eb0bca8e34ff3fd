//! Content Hash Value Object
//!
//! A fixed-length, filename-safe token derived from arbitrary text.
//! Used to name side files (content-addressed) and to turn raw resource
//! instance ids into identifiers templates can embed anywhere.

use std::fmt;

use sha1::{Digest, Sha1};

/// Content hash value object
///
/// Lowercase hex of a SHA-1 digest. The token is always [`ContentHash::LEN`]
/// characters long, which keeps it a valid RFC 1123 label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    /// Number of hex characters in a token
    pub const LEN: usize = 40;

    /// Compute the hash of some content
    pub fn of(content: &str) -> Self {
        let digest = Sha1::digest(content.as_bytes());
        Self(format!("{:x}", digest))
    }

    /// Get the hex token
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the hex token
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Shorthand for `ContentHash::of(content).into_string()`
pub fn hash_of_string(content: &str) -> String {
    ContentHash::of(content).into_string()
}
