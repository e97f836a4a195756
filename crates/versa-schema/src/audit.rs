//! # Closure Audit
//!
//! Checks that VERSA schemas reject unknown keys wherever they should.
//!
//! ## Policy
//!
//! 1. **Object subschemas with `properties`:** `additionalProperties: false`.
//!    A typo in a config key must surface as a validation error, not be
//!    silently ignored.
//! 2. **Map-shaped objects** (no `properties`, `additionalProperties` is a
//!    schema, e.g. `env`, `secrets.bindings`): not findings.
//! 3. **Documented open objects** ([`OPEN_OBJECTS`]): Profile `settings`
//!    stays open so tool-specific profiles can carry arbitrary settings.
//!
//! The shipped registry must audit clean; a finding means a schema edit
//! loosened the format.

use std::fmt;

use serde_json::Value;
use versa_core::SchemaKind;

use crate::registry::SchemaRegistry;

/// Subschemas that are deliberately open to unknown keys.
pub const OPEN_OBJECTS: &[(SchemaKind, &str)] = &[(SchemaKind::Profile, "/properties/settings")];

/// An object subschema that accepts unknown keys without being on the
/// open list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureFinding {
    /// Schema the subschema belongs to.
    pub kind: SchemaKind,
    /// JSON Pointer to the subschema within the schema document.
    pub path: String,
    /// The offending `additionalProperties` value, or `None` if absent
    /// (which JSON Schema treats as `true`).
    pub actual: Option<Value>,
}

impl fmt::Display for ClosureFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "(root)" } else { self.path.as_str() };
        match &self.actual {
            Some(value) => write!(f, "{}:{path}: additionalProperties is {value}", self.kind),
            None => write!(f, "{}:{path}: additionalProperties is absent", self.kind),
        }
    }
}

/// Audit one schema document.
pub fn audit_closure(kind: SchemaKind, schema: &Value) -> Vec<ClosureFinding> {
    let mut findings = Vec::new();
    walk(kind, schema, String::new(), &mut findings);
    findings
}

/// Audit every schema in the registry, in registry order.
pub fn audit_registry(registry: &SchemaRegistry) -> Vec<ClosureFinding> {
    registry
        .iter()
        .flat_map(|(kind, schema)| audit_closure(kind, schema))
        .collect()
}

fn is_open_by_policy(kind: SchemaKind, path: &str) -> bool {
    OPEN_OBJECTS
        .iter()
        .any(|(open_kind, open_path)| *open_kind == kind && *open_path == path)
}

fn walk(kind: SchemaKind, node: &Value, path: String, findings: &mut Vec<ClosureFinding>) {
    let Some(obj) = node.as_object() else {
        return;
    };

    if let Some(properties) = obj.get("properties").and_then(Value::as_object) {
        match obj.get("additionalProperties") {
            Some(Value::Bool(false)) => {}
            _ if is_open_by_policy(kind, &path) => {}
            other => findings.push(ClosureFinding {
                kind,
                path: path.clone(),
                actual: other.cloned(),
            }),
        }

        for (name, child) in properties {
            walk(kind, child, format!("{path}/properties/{name}"), findings);
        }
    }

    if let Some(items) = obj.get("items") {
        walk(kind, items, format!("{path}/items"), findings);
    }

    for combinator in ["oneOf", "anyOf", "allOf"] {
        if let Some(branches) = obj.get(combinator).and_then(Value::as_array) {
            for (i, branch) in branches.iter().enumerate() {
                walk(kind, branch, format!("{path}/{combinator}/{i}"), findings);
            }
        }
    }

    if let Some(additional) = obj.get("additionalProperties").filter(|v| v.is_object()) {
        walk(kind, additional, format!("{path}/additionalProperties"), findings);
    }
}
