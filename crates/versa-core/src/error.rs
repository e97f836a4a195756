//! # Error Types
//!
//! Errors raised by the core vocabulary. Data-validation failures are not
//! errors here: they are carried by [`ValidationResult`](crate::ValidationResult).

use thiserror::Error;

/// Top-level error type for `versa-core`.
#[derive(Error, Debug)]
pub enum VersaError {
    /// A logical schema name that is not part of the VERSA registry.
    #[error("unknown schema: {0:?}")]
    UnknownSchema(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
