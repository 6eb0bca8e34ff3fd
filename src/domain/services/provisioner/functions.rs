//! Template function library
//!
//! minijinja built-ins (`default`, `tojson`, `upper`, ...) plus:
//! - `b64enc` / `b64dec`: base64 encode and decode
//! - `sha256`: lowercase hex SHA-256 digest
//! - `quote`: double-quoted, escaped string safe to embed in YAML
//! - `random_alphanum(n)`: `n` random ASCII letters and digits

use base64::{engine::general_purpose::STANDARD, Engine};
use minijinja::{Environment, Error, ErrorKind};
use rand::distr::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Upper bound for `random_alphanum`
const MAX_RANDOM_LEN: usize = 4096;

pub(super) fn register(env: &mut Environment<'static>) {
    env.add_filter("b64enc", b64enc);
    env.add_filter("b64dec", b64dec);
    env.add_filter("sha256", sha256);
    env.add_filter("quote", quote);
    env.add_function("random_alphanum", random_alphanum);
}

fn b64enc(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

fn b64dec(value: &str) -> Result<String, Error> {
    let bytes = STANDARD.decode(value).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("base64 decode error: {}", e),
        )
    })?;
    String::from_utf8(bytes).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("base64 decode produced invalid UTF-8: {}", e),
        )
    })
}

fn sha256(value: &str) -> String {
    let digest = Sha256::digest(value.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

fn random_alphanum(len: usize) -> Result<String, Error> {
    if len > MAX_RANDOM_LEN {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("random_alphanum length {} exceeds {}", len, MAX_RANDOM_LEN),
        ));
    }
    Ok(rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment<'static> {
        let mut env = Environment::new();
        register(&mut env);
        env
    }

    fn render(source: &str) -> String {
        env().render_str(source, ()).unwrap()
    }

    #[test]
    fn base64_round_trip() {
        assert_eq!(render("{{ 'hello' | b64enc }}"), "aGVsbG8=");
        assert_eq!(render("{{ 'aGVsbG8=' | b64dec }}"), "hello");
    }

    #[test]
    fn b64dec_rejects_garbage() {
        let err = env().render_str("{{ '!!!' | b64dec }}", ()).unwrap_err();
        assert!(err.to_string().contains("base64 decode error"));
    }

    #[test]
    fn sha256_is_hex_digest() {
        assert_eq!(
            render("{{ 'hello' | sha256 }}"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn quote_escapes_for_yaml() {
        let quoted = quote("say \"hi\"\n");
        assert_eq!(quoted, "\"say \\\"hi\\\"\\n\"");
        let parsed: String = serde_yaml_ng::from_str(&quoted).unwrap();
        assert_eq!(parsed, "say \"hi\"\n");
    }

    #[test]
    fn random_alphanum_has_requested_length() {
        let value = render("{{ random_alphanum(16) }}");
        assert_eq!(value.len(), 16);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(value, render("{{ random_alphanum(16) }}"));
    }

    #[test]
    fn random_alphanum_is_bounded() {
        assert!(random_alphanum(MAX_RANDOM_LEN + 1).is_err());
    }

    #[test]
    fn tojson_builtin_is_available() {
        let out = env()
            .render_str("{{ value | tojson }}", minijinja::context! { value => vec![1, 2] })
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, serde_json::json!([1, 2]));
    }
}
