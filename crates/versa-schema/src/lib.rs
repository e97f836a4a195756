//! # versa-schema: Schema Validation for VERSA Configuration
//!
//! Validates VERSA documents (contexts, profiles, agents, rule front
//! matter, tools, knowledge, memory, permissions) against the JSON
//! Schemas shipped in the workspace `schemas/` directory.
//!
//! ## Runtime Validation (`validate`)
//!
//! The [`validate`] module compiles all eight schemas once per process and
//! returns a [`ValidationResult`] for any JSON value:
//!
//! - [`validate_context`], [`validate_agent`], ... validate one document
//!   kind through the process-wide [`engine()`].
//! - [`SchemaValidator::decode`] validates and then deserializes into the
//!   typed model from `versa-core`.
//!
//! ## Supporting modules
//!
//! - [`registry`]: the embedded schema documents and their `$id`s.
//! - [`formats`]: the `glob-pattern`, `model-name` and `file-path` format
//!   predicates.
//! - [`document`]: JSON/YAML text to JSON value.
//! - [`audit`]: checks that schemas reject unknown keys.
//!
//! ## Crate Policy
//!
//! - Depends only on `versa-core` internally.
//! - Schema `$id`s must never change without a format version bump.
//! - Invalid documents are data, not errors: validation always returns a
//!   result. Only a broken installation surfaces as [`SchemaError`].

pub mod audit;
pub mod document;
pub mod error;
pub mod formats;
pub mod registry;
pub mod validate;

pub use audit::{audit_closure, audit_registry, ClosureFinding, OPEN_OBJECTS};
pub use document::{parse_document, DocumentFormat};
pub use error::SchemaError;
pub use formats::{matches_format, CUSTOM_FORMATS};
pub use registry::{embedded_source, SchemaRegistry};
pub use validate::{
    decode, engine, schemas, try_engine, validate_agent, validate_context, validate_knowledge,
    validate_memory, validate_named, validate_permissions, validate_profile, validate_rule_meta,
    validate_tool, EngineOptions, SchemaValidator,
};

pub use versa_core::{SchemaKind, ValidationError, ValidationResult};
