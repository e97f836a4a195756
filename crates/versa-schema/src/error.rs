//! # Schema Errors
//!
//! Failures of the validation machinery itself. A document that merely
//! breaks its schema is not an error here: it produces a
//! [`ValidationResult`] with `valid == false`. The one exception is
//! [`SchemaError::Invalid`], used by typed decoding, which has to return
//! either a value or the reasons there is none.

use thiserror::Error;
use versa_core::{ValidationResult, VersaError};

/// Errors returned by registry, parsing and validator operations.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An embedded schema document could not be parsed.
    #[error("failed to load schema {schema}: {reason}")]
    SchemaLoad {
        /// Schema file name.
        schema: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A schema could not be compiled into a validator.
    #[error("failed to compile schema {schema_id}: {reason}")]
    SchemaCompile {
        /// The schema `$id`.
        schema_id: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The requested logical schema name is not registered.
    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    /// Document text could not be parsed into a JSON value.
    #[error("failed to parse {format} document: {reason}")]
    DocumentParse {
        /// `JSON` or `YAML`.
        format: &'static str,
        /// Parser message.
        reason: String,
    },

    /// The document was rejected by its schema.
    #[error("document failed validation:\n{0}")]
    Invalid(ValidationResult),

    /// Error from the core vocabulary.
    #[error(transparent)]
    Core(#[from] VersaError),
}
