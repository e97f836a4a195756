//! # Rule Metadata
//!
//! Front matter carried at the top of Markdown rule documents. Extracting
//! the front matter from Markdown is left to the caller; this module only
//! describes its shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::kind::{SchemaKind, VersaDocument};

/// Front matter for a rule document. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attach: Option<Attach>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<RuleScope>,
    /// Globs of files the rule applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applies_to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<VariableDefinition>,
}

impl RuleMeta {
    /// Effective priority; the schema default is `medium`.
    pub fn priority(&self) -> Priority {
        self.priority.unwrap_or(Priority::Medium)
    }

    /// Effective attach mode; the schema default is `always`.
    pub fn attach(&self) -> Attach {
        self.attach.unwrap_or(Attach::Always)
    }
}

impl VersaDocument for RuleMeta {
    const KIND: SchemaKind = SchemaKind::RuleMeta;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// When a rule is attached to a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Attach {
    Always,
    OnDemand,
    Never,
}

/// A single scope label or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleScope {
    One(String),
    Many(Vec<String>),
}

impl RuleScope {
    /// The scope labels as a slice-like list.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::One(label) => vec![label.as_str()],
            Self::Many(labels) => labels.iter().map(String::as_str).collect(),
        }
    }
}

/// A template variable used in the rule body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub var_type: VariableType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableType {
    String,
    Number,
    Boolean,
    Array,
    Object,
}
