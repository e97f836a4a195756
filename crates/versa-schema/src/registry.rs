//! # Schema Registry
//!
//! The eight VERSA schema documents, embedded at compile time from the
//! workspace `schemas/` directory and parsed once into [`Value`]s.
//!
//! The registry is pure data: it knows each document's logical name
//! ([`SchemaKind::name`]) and its `$id`. Compiling the documents into
//! validators is the job of [`SchemaValidator`](crate::SchemaValidator).
//!
//! ## Schema identity
//!
//! Every document declares a unique `$id` under
//! `https://schemas.versa.dev/1.0/`. The `$id` must never change without
//! a format version bump; editors and external engines key on it.

use std::collections::BTreeMap;

use serde_json::Value;
use versa_core::SchemaKind;

use crate::error::SchemaError;

const CONTEXT_SCHEMA: &str = include_str!("../../../schemas/context.schema.json");
const PROFILE_SCHEMA: &str = include_str!("../../../schemas/profile.schema.json");
const AGENT_SCHEMA: &str = include_str!("../../../schemas/agent.schema.json");
const RULE_METADATA_SCHEMA: &str = include_str!("../../../schemas/rule-metadata.schema.json");
const TOOL_SCHEMA: &str = include_str!("../../../schemas/tool.schema.json");
const KNOWLEDGE_SCHEMA: &str = include_str!("../../../schemas/knowledge.schema.json");
const MEMORY_SCHEMA: &str = include_str!("../../../schemas/memory.schema.json");
const PERMISSIONS_SCHEMA: &str = include_str!("../../../schemas/permissions.schema.json");

/// Returns the embedded JSON text of the schema for `kind`.
pub fn embedded_source(kind: SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Context => CONTEXT_SCHEMA,
        SchemaKind::Profile => PROFILE_SCHEMA,
        SchemaKind::Agent => AGENT_SCHEMA,
        SchemaKind::RuleMeta => RULE_METADATA_SCHEMA,
        SchemaKind::Tool => TOOL_SCHEMA,
        SchemaKind::Knowledge => KNOWLEDGE_SCHEMA,
        SchemaKind::Memory => MEMORY_SCHEMA,
        SchemaKind::Permissions => PERMISSIONS_SCHEMA,
    }
}

/// Parsed schema documents indexed by kind.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: BTreeMap<SchemaKind, Value>,
}

impl SchemaRegistry {
    /// Parse the embedded schema documents.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaLoad`] if a document is not valid JSON,
    /// is not an object, or has no string `$id`.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::from_documents(
            SchemaKind::ALL
                .iter()
                .map(|&kind| (kind, embedded_source(kind))),
        )
    }

    /// Build a registry from `(kind, json_text)` pairs. Later entries for
    /// the same kind replace earlier ones.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaRegistry::embedded`].
    pub fn from_documents<'a>(
        documents: impl IntoIterator<Item = (SchemaKind, &'a str)>,
    ) -> Result<Self, SchemaError> {
        let mut schemas = BTreeMap::new();
        for (kind, source) in documents {
            let schema: Value =
                serde_json::from_str(source).map_err(|e| SchemaError::SchemaLoad {
                    schema: kind.file_name().to_string(),
                    reason: format!("invalid JSON: {e}"),
                })?;

            if !schema.is_object() {
                return Err(SchemaError::SchemaLoad {
                    schema: kind.file_name().to_string(),
                    reason: "schema document is not a JSON object".to_string(),
                });
            }
            if schema.get("$id").and_then(Value::as_str).is_none() {
                return Err(SchemaError::SchemaLoad {
                    schema: kind.file_name().to_string(),
                    reason: "missing string $id".to_string(),
                });
            }

            schemas.insert(kind, schema);
        }
        Ok(Self { schemas })
    }

    /// Look up a schema by kind.
    pub fn get(&self, kind: SchemaKind) -> Option<&Value> {
        self.schemas.get(&kind)
    }

    /// Look up a schema by logical name (`context`, `ruleMeta`, ...).
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        name.parse::<SchemaKind>().ok().and_then(|kind| self.get(kind))
    }

    /// Returns the `$id` of the schema for `kind`.
    pub fn schema_id(&self, kind: SchemaKind) -> Option<&str> {
        self.get(kind)
            .and_then(|schema| schema.get("$id"))
            .and_then(Value::as_str)
    }

    /// Iterate over `(kind, schema)` in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemaKind, &Value)> {
        self.schemas.iter().map(|(kind, schema)| (*kind, schema))
    }

    /// Returns the number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if no schemas are registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
