//! # Schema Kind: The VERSA Document Taxonomy
//!
//! Defines `SchemaKind`, the single closed set of document kinds the
//! registry knows about. The logical names returned by
//! [`SchemaKind::name`] are the registry keys; the file names returned by
//! [`SchemaKind::file_name`] locate the shipped schema documents.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::VersaError;

/// A VERSA document kind.
///
/// | Kind | Logical name | Schema file |
/// |------|--------------|-------------|
/// | Context | `context` | `context.schema.json` |
/// | Profile | `profile` | `profile.schema.json` |
/// | Agent | `agent` | `agent.schema.json` |
/// | RuleMeta | `ruleMeta` | `rule-metadata.schema.json` |
/// | Tool | `tool` | `tool.schema.json` |
/// | Knowledge | `knowledge` | `knowledge.schema.json` |
/// | Memory | `memory` | `memory.schema.json` |
/// | Permissions | `permissions` | `permissions.schema.json` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SchemaKind {
    /// Root project configuration.
    #[serde(rename = "context")]
    Context,
    /// Tool-specific override of a context.
    #[serde(rename = "profile")]
    Profile,
    /// Declarative agent definition.
    #[serde(rename = "agent")]
    Agent,
    /// Front matter of a rule document.
    #[serde(rename = "ruleMeta")]
    RuleMeta,
    /// Tool and server descriptors.
    #[serde(rename = "tool")]
    Tool,
    /// Knowledge ingestion sources.
    #[serde(rename = "knowledge")]
    Knowledge,
    /// Memory retention policy.
    #[serde(rename = "memory")]
    Memory,
    /// Access-control grants.
    #[serde(rename = "permissions")]
    Permissions,
}

/// Total number of schema kinds.
pub const SCHEMA_KIND_COUNT: usize = 8;

impl SchemaKind {
    /// Every kind, in registry order.
    pub const ALL: [SchemaKind; SCHEMA_KIND_COUNT] = [
        Self::Context,
        Self::Profile,
        Self::Agent,
        Self::RuleMeta,
        Self::Tool,
        Self::Knowledge,
        Self::Memory,
        Self::Permissions,
    ];

    /// Returns the logical registry name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Context => "context",
            Self::Profile => "profile",
            Self::Agent => "agent",
            Self::RuleMeta => "ruleMeta",
            Self::Tool => "tool",
            Self::Knowledge => "knowledge",
            Self::Memory => "memory",
            Self::Permissions => "permissions",
        }
    }

    /// Returns the file name of the schema document under `schemas/`.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Context => "context.schema.json",
            Self::Profile => "profile.schema.json",
            Self::Agent => "agent.schema.json",
            Self::RuleMeta => "rule-metadata.schema.json",
            Self::Tool => "tool.schema.json",
            Self::Knowledge => "knowledge.schema.json",
            Self::Memory => "memory.schema.json",
            Self::Permissions => "permissions.schema.json",
        }
    }
}

impl std::fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchemaKind {
    type Err = VersaError;

    /// Parse a kind from its logical name (case-sensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| VersaError::UnknownSchema(s.to_string()))
    }
}

/// A root VERSA document type bound to the schema that describes it.
pub trait VersaDocument: serde::de::DeserializeOwned {
    /// The schema this document is validated against.
    const KIND: SchemaKind;
}
