//! # Validation Result
//!
//! The stable, machine-readable outcome of validating one document.
//!
//! A [`ValidationResult`] is `valid` exactly when it carries no errors.
//! The only way to attach errors is [`ValidationResult::from_errors`],
//! which derives `valid` from the list, so the two can never disagree.
//!
//! Serialized field names match the wire shape consumed by editors and
//! other tooling: `instancePath`, `schemaPath`, `keyword`, `params`,
//! `message`.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Instance path reported for violations at the document root.
pub const ROOT_INSTANCE_PATH: &str = "/";

/// Keyword reported when the engine does not name one.
pub const UNKNOWN_KEYWORD: &str = "unknown";

/// One constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// JSON Pointer to the offending value; `/` for the document root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected the value.
    pub schema_path: String,
    /// The rejecting keyword (`required`, `maximum`, `format`, ...).
    pub keyword: String,
    /// Keyword-specific details, e.g. `{"missingProperty": "version"}`.
    pub params: Map<String, Value>,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationError {
    /// Build an error, applying the defaults for missing engine fields:
    /// an empty instance path becomes `/` and an empty keyword becomes
    /// `unknown`.
    pub fn new(
        instance_path: impl Into<String>,
        schema_path: impl Into<String>,
        keyword: impl Into<String>,
    ) -> Self {
        let instance_path = instance_path.into();
        let keyword = keyword.into();
        Self {
            instance_path: if instance_path.is_empty() {
                ROOT_INSTANCE_PATH.to_string()
            } else {
                instance_path
            },
            schema_path: schema_path.into(),
            keyword: if keyword.is_empty() {
                UNKNOWN_KEYWORD.to_string()
            } else {
                keyword
            },
            params: Map::new(),
            message: None,
        }
    }

    /// Attach keyword parameters.
    pub fn with_params(mut self, params: Map<String, Value>) -> Self {
        self.params = params;
        self
    }

    /// Attach a human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{} [{}]: {}", self.instance_path, self.keyword, message),
            None => write!(f, "{} [{}]", self.instance_path, self.keyword),
        }
    }
}

/// Outcome of one validation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A successful result with no errors.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from collected errors; valid iff `errors` is empty.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Whether the document satisfied its schema.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Violations in the order the engine reported them.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Consumes self and returns the inner error list.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Returns true if any violation was raised by `keyword`.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.errors.iter().any(|e| e.keyword == keyword)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return f.write_str("valid");
        }
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {error}")?;
        }
        Ok(())
    }
}
