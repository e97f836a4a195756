//! # Memory Retention Policy
//!
//! Durations (`24h`, `30d`) and sizes (`10MB`) are kept as the strings the
//! schema validated; their grammar is enforced by the schema patterns.

use serde::{Deserialize, Serialize};

use crate::kind::{SchemaKind, VersaDocument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    pub version: String,
    pub retention: Retention,
}

impl VersaDocument for MemoryConfig {
    const KIND: SchemaKind = SchemaKind::Memory;
}

/// Retention settings per scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Retention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<MemoryRetention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectMemoryRetention>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent: Option<PersistentMemoryRetention>,
}

/// Session-scoped retention.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MemoryRetention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
}

/// Project-scoped retention; adds the categories to persist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProjectMemoryRetention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persist: Vec<PersistCategory>,
}

/// Indefinite retention; has no duration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PersistentMemoryRetention {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistCategory {
    Decisions,
    Patterns,
    Conventions,
    Preferences,
    Corrections,
}
