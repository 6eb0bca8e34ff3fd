//! Placeholder resolution
//!
//! Workload strings may embed `${resources.<name>.<output>[.<nested>...]}`
//! tokens. Each token is looked up through the workload's resource bindings
//! in the context and replaced with the provisioned output value. Replacement
//! is a single pass: substituted text is never scanned again.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

use crate::domain::entities::Context;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([a-zA-Z0-9.\-_]+)\}").expect("placeholder pattern is valid")
});

/// A placeholder could not be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to resolve placeholder \"{placeholder}\"")]
pub struct PlaceholderError {
    /// Token text without the surrounding `${` `}`
    pub placeholder: String,
}

impl PlaceholderError {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }
}

/// Resolves placeholders for one workload against the context
pub struct PlaceholderResolver<'a> {
    context: &'a Context,
    workload: &'a str,
}

impl<'a> PlaceholderResolver<'a> {
    pub fn new(context: &'a Context, workload: &'a str) -> Self {
        Self { context, workload }
    }

    /// Resolve a single placeholder expression (without `${` `}`)
    pub fn resolve(&self, placeholder: &str) -> Result<String, PlaceholderError> {
        let fail = || PlaceholderError::new(placeholder);

        let mut parts = placeholder.split('.');
        if parts.next() != Some("resources") {
            return Err(fail());
        }
        let local_name = parts.next().ok_or_else(fail)?;
        let output_key = parts.next().ok_or_else(fail)?;

        let id = self
            .context
            .resource_uid(self.workload, local_name)
            .ok_or_else(fail)?;
        let provisioned = self.context.provisioned_resource(id).ok_or_else(fail)?;
        let mut value = provisioned.outputs.get(output_key).ok_or_else(fail)?;

        for segment in parts {
            value = match value {
                Value::Object(map) => map.get(segment).ok_or_else(fail)?,
                _ => return Err(fail()),
            };
        }

        trace!(workload = %self.workload, %placeholder, "resolved placeholder");
        Ok(stringify(value))
    }

    /// Replace every placeholder in `text`
    pub fn substitute(&self, text: &str) -> Result<String, PlaceholderError> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for captures in PLACEHOLDER.captures_iter(text) {
            let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            out.push_str(&text[last..whole.start()]);
            out.push_str(&self.resolve(inner.as_str())?);
            last = whole.end();
        }
        out.push_str(&text[last..]);
        Ok(out)
    }
}

/// Strings are used verbatim, everything else as JSON text
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Mapping, Provisioned, ResourceDecl, Workload};
    use serde_json::json;

    fn context_with_db(outputs: Value) -> Context {
        let mut workload: Workload = serde_yaml_ng::from_str(
            "apiVersion: score.dev/v1b1\nmetadata: {name: web}\ncontainers: {}\n",
        )
        .unwrap();
        workload
            .resources
            .insert("db".to_string(), ResourceDecl::new("postgres"));

        let mut ctx = Context::new("demo");
        ctx.update(workload).unwrap();
        let id = ctx.resource_uid("web", "db").cloned().unwrap();
        let outputs: Mapping = serde_json::from_value(outputs).unwrap();
        ctx.set_provisioned_resource(
            id,
            Provisioned {
                outputs,
                ..Default::default()
            },
        );
        ctx
    }

    #[test]
    fn resolves_output_values() {
        let ctx = context_with_db(json!({"host": "pg", "port": 5432}));
        let resolver = PlaceholderResolver::new(&ctx, "web");
        assert_eq!(resolver.resolve("resources.db.host").unwrap(), "pg");
        assert_eq!(resolver.resolve("resources.db.port").unwrap(), "5432");
    }

    #[test]
    fn walks_nested_outputs() {
        let ctx = context_with_db(json!({"conn": {"primary": {"host": "pg-0"}}}));
        let resolver = PlaceholderResolver::new(&ctx, "web");
        assert_eq!(
            resolver.resolve("resources.db.conn.primary.host").unwrap(),
            "pg-0"
        );
    }

    #[test]
    fn substitutes_multiple_tokens() {
        let ctx = context_with_db(json!({"host": "pg", "port": 5432}));
        let resolver = PlaceholderResolver::new(&ctx, "web");
        assert_eq!(
            resolver
                .substitute("postgres://${resources.db.host}:${resources.db.port}/app")
                .unwrap(),
            "postgres://pg:5432/app"
        );
    }

    #[test]
    fn substituted_values_are_not_rescanned() {
        let ctx = context_with_db(json!({"tricky": "${resources.db.other}"}));
        let resolver = PlaceholderResolver::new(&ctx, "web");
        assert_eq!(
            resolver.substitute("x=${resources.db.tricky}").unwrap(),
            "x=${resources.db.other}"
        );
    }

    #[test]
    fn text_without_tokens_is_unchanged() {
        let ctx = Context::new("demo");
        let resolver = PlaceholderResolver::new(&ctx, "web");
        assert_eq!(resolver.substitute("plain $HOME").unwrap(), "plain $HOME");
    }

    #[test]
    fn unbound_resource_fails_with_token_text() {
        let ctx = Context::new("demo");
        let resolver = PlaceholderResolver::new(&ctx, "web");
        let err = resolver.substitute("${resources.db.name}").unwrap_err();
        assert_eq!(err.placeholder, "resources.db.name");
        assert!(err.to_string().contains("resources.db.name"));
    }

    #[test]
    fn broken_links_all_fail() {
        let ctx = context_with_db(json!({"host": "pg"}));
        let resolver = PlaceholderResolver::new(&ctx, "web");
        for placeholder in [
            "resources.db",
            "resources.db.missing",
            "resources.db.host.deeper",
            "metadata.name",
            "resources.cache.host",
        ] {
            assert_eq!(
                resolver.resolve(placeholder).unwrap_err(),
                PlaceholderError::new(placeholder)
            );
        }
    }

    #[test]
    fn unprovisioned_resource_fails() {
        let mut ctx = Context::new("demo");
        let mut workload: Workload = serde_yaml_ng::from_str(
            "apiVersion: score.dev/v1b1\nmetadata: {name: web}\ncontainers: {}\n",
        )
        .unwrap();
        workload
            .resources
            .insert("db".to_string(), ResourceDecl::new("postgres"));
        ctx.update(workload).unwrap();

        let resolver = PlaceholderResolver::new(&ctx, "web");
        assert!(resolver.resolve("resources.db.host").is_err());
    }
}
