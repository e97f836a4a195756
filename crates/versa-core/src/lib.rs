//! # versa-core: Foundational Types for VERSA Configuration
//!
//! Defines the vocabulary shared by every consumer of the VERSA
//! configuration format: which documents exist, what a validation
//! outcome looks like, and typed Rust views of each document.
//!
//! ## Key Design Principles
//!
//! 1. **Single `SchemaKind` enum.** The eight document kinds are one
//!    closed enum. Every `match` on it is exhaustive, so a new kind forces
//!    every consumer to handle it.
//!
//! 2. **`ValidationResult` cannot lie.** `valid` is derived from the error
//!    list at construction; there is no way to build a result that is
//!    both valid and carries errors.
//!
//! 3. **Typed model is a view, not a validator.** The structs in
//!    [`context`], [`agent`], [`rule`], [`tool`], [`knowledge`],
//!    [`memory`] and [`permissions`] mirror the JSON schemas. Schema
//!    validation lives in `versa-schema`; deserialize only what it
//!    accepted.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `versa-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod agent;
pub mod context;
pub mod error;
mod integral;
pub mod kind;
pub mod knowledge;
pub mod memory;
pub mod permissions;
pub mod result;
pub mod rule;
pub mod tool;

// Re-export primary types for ergonomic imports.
pub use agent::Agent;
pub use context::{Context, MergeStrategy, Metadata, Profile, ProfileSettings, Settings};
pub use error::VersaError;
pub use kind::{SchemaKind, VersaDocument, SCHEMA_KIND_COUNT};
pub use knowledge::{KnowledgeConfig, KnowledgeSource, RefreshInterval, Redaction, SourceType};
pub use memory::{
    MemoryConfig, MemoryRetention, PersistCategory, PersistentMemoryRetention,
    ProjectMemoryRetention, Retention,
};
pub use permissions::{
    CommandPermissions, FilePermissions, NetworkPermissions, Permissions, SecretPermissions,
};
pub use result::{ValidationError, ValidationResult};
pub use rule::{Attach, Priority, RuleMeta, RuleScope, VariableDefinition, VariableType};
pub use tool::{AuthType, Server, ServerAuth, ServerType, ToolConfig};

/// The only format version accepted by the `version` field of VERSA documents.
pub const VERSA_VERSION: &str = "1.0";
