//! # Schema Validation
//!
//! Runs VERSA documents through the `jsonschema` engine and normalizes its
//! errors into [`ValidationResult`]s.
//!
//! ## Design
//!
//! A [`SchemaValidator`] owns a [`SchemaRegistry`] and one compiled
//! `jsonschema::Validator` per kind. All documents are compiled eagerly
//! at construction, with:
//!
//! - every violation collected (the engine's error iterator is drained,
//!   never short-circuited),
//! - format validation on, with the three [custom formats](crate::formats)
//!   registered next to the engine's standard ones.
//!
//! After construction the validator is immutable; `validate` is a pure
//! read and can be called from any number of threads.
//!
//! ## Process-wide engine
//!
//! [`engine()`] builds the shipped registry once, through a `OnceLock`,
//! on first use. The free functions ([`validate_context`] and friends)
//! all go through it.
//!
//! ## Failure classes
//!
//! - Bad *data* is never an error: callers always get a
//!   [`ValidationResult`], including for `null`, numbers and strings.
//! - A broken *installation* (schemas that fail to build, a kind that was
//!   never registered) panics in the infallible API and is a
//!   [`SchemaError`] in the `try_*` API. It is never folded into
//!   `valid: false`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, Validator};
use serde_json::{Map, Value};
use versa_core::{SchemaKind, ValidationError, ValidationResult, VersaDocument, VersaError};

use crate::document::{parse_document, DocumentFormat};
use crate::error::SchemaError;
use crate::formats::{self, FILE_PATH, GLOB_PATTERN, MODEL_NAME};
use crate::registry::SchemaRegistry;

// ---------------------------------------------------------------------------
// Engine options
// ---------------------------------------------------------------------------

/// Engine configuration applied to every compiled schema.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// JSON Schema draft used to interpret the documents.
    pub draft: Draft,
    /// Whether `format` keywords are enforced. Custom formats are always
    /// registered; this switch decides whether any format is checked.
    pub validate_formats: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            draft: Draft::Draft7,
            validate_formats: true,
        }
    }
}

// ---------------------------------------------------------------------------
// SchemaValidator
// ---------------------------------------------------------------------------

/// Compiled validators for every schema in a registry.
pub struct SchemaValidator {
    registry: SchemaRegistry,
    options: EngineOptions,
    compiled: BTreeMap<SchemaKind, Validator>,
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("options", &self.options)
            .field("kinds", &self.compiled.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl SchemaValidator {
    /// Compile every schema in `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaCompile`] if the engine rejects a
    /// schema document.
    pub fn new(registry: SchemaRegistry, options: EngineOptions) -> Result<Self, SchemaError> {
        let mut compiled = BTreeMap::new();

        for (kind, schema) in registry.iter() {
            let validator = jsonschema::options()
                .with_draft(options.draft)
                .should_validate_formats(options.validate_formats)
                .with_format(GLOB_PATTERN, formats::glob_pattern)
                .with_format(MODEL_NAME, formats::model_name)
                .with_format(FILE_PATH, formats::file_path)
                .build(schema)
                .map_err(|e| SchemaError::SchemaCompile {
                    schema_id: registry
                        .schema_id(kind)
                        .unwrap_or_else(|| kind.file_name())
                        .to_string(),
                    reason: e.to_string(),
                })?;
            compiled.insert(kind, validator);
        }

        tracing::debug!(
            draft = ?options.draft,
            validate_formats = options.validate_formats,
            schemas = compiled.len(),
            "compiled VERSA schema registry"
        );

        Ok(Self {
            registry,
            options,
            compiled,
        })
    }

    /// Build a validator over the embedded schemas with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded schemas fail to parse or compile.
    pub fn embedded() -> Result<Self, SchemaError> {
        Self::new(SchemaRegistry::embedded()?, EngineOptions::default())
    }

    /// The registry this validator was built from.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The options every schema was compiled with.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The compiled engine validator for `kind`, for embedders that need
    /// the raw `jsonschema` API.
    pub fn compiled(&self, kind: SchemaKind) -> Option<&Validator> {
        self.compiled.get(&kind)
    }

    /// Validate `instance` against the schema for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is not registered. With the embedded registry
    /// every kind is registered, so this indicates a broken build.
    pub fn validate(&self, kind: SchemaKind, instance: &Value) -> ValidationResult {
        match self.try_validate(kind, instance) {
            Ok(result) => result,
            Err(e) => panic!("VERSA schema registry is incomplete: {e}"),
        }
    }

    /// Validate `instance` against the schema for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] if `kind` is not registered.
    pub fn try_validate(
        &self,
        kind: SchemaKind,
        instance: &Value,
    ) -> Result<ValidationResult, SchemaError> {
        let (validator, schema) = self
            .compiled
            .get(&kind)
            .zip(self.registry.get(kind))
            .ok_or_else(|| SchemaError::SchemaNotFound(kind.name().to_string()))?;

        let errors = validator
            .iter_errors(instance)
            .flat_map(|error| normalize_error(schema, &error))
            .collect();

        Ok(ValidationResult::from_errors(errors))
    }

    /// Validate against a schema identified by its logical name
    /// (`context`, `ruleMeta`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] for a name that is not
    /// registered.
    pub fn validate_named(
        &self,
        name: &str,
        instance: &Value,
    ) -> Result<ValidationResult, SchemaError> {
        let kind = name
            .parse::<SchemaKind>()
            .map_err(|_| SchemaError::SchemaNotFound(name.to_string()))?;
        self.try_validate(kind, instance)
    }

    /// Parse document text and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DocumentParse`] if the text does not parse,
    /// or [`SchemaError::SchemaNotFound`] if `kind` is not registered.
    pub fn validate_text(
        &self,
        kind: SchemaKind,
        text: &str,
        format: DocumentFormat,
    ) -> Result<ValidationResult, SchemaError> {
        let instance = parse_document(text, format)?;
        self.try_validate(kind, &instance)
    }

    /// Returns true if `instance` satisfies the schema for `kind`, without
    /// collecting errors.
    pub fn is_valid(&self, kind: SchemaKind, instance: &Value) -> bool {
        self.compiled
            .get(&kind)
            .is_some_and(|validator| validator.is_valid(instance))
    }

    /// Validate `instance` against `T`'s schema, then deserialize it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Invalid`] carrying every violation if the
    /// document is rejected, or a serialization error if a valid document
    /// does not fit the typed model.
    pub fn decode<T: VersaDocument>(&self, instance: &Value) -> Result<T, SchemaError> {
        let result = self.try_validate(T::KIND, instance)?;
        if !result.is_valid() {
            return Err(SchemaError::Invalid(result));
        }
        serde_json::from_value(instance.clone())
            .map_err(|e| SchemaError::Core(VersaError::Serialization(e)))
    }
}

// ---------------------------------------------------------------------------
// Error normalization
// ---------------------------------------------------------------------------

/// Map one engine error to one or more [`ValidationError`]s.
///
/// An `additionalProperties` error naming several keys becomes one error
/// per key, so every entry names exactly one offending property.
fn normalize_error(schema: &Value, error: &jsonschema::ValidationError<'_>) -> Vec<ValidationError> {
    let instance_path = error.instance_path.to_string();
    let schema_path = error.schema_path.to_string();
    let keyword = schema_path.rsplit('/').next().unwrap_or_default().to_string();

    match &error.kind {
        ValidationErrorKind::AdditionalProperties { unexpected } if unexpected.len() > 1 => {
            unexpected
                .iter()
                .map(|name| {
                    let mut params = Map::new();
                    params.insert("additionalProperty".into(), Value::String(name.clone()));
                    ValidationError::new(instance_path.as_str(), schema_path.as_str(), keyword.as_str())
                        .with_params(params)
                        .with_message(format!(
                            "Additional properties are not allowed ('{name}' was unexpected)"
                        ))
                })
                .collect()
        }
        kind => {
            let params = match kind {
                ValidationErrorKind::Required { property } => {
                    single_param("missingProperty", property.clone())
                }
                ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
                    .first()
                    .map(|name| single_param("additionalProperty", Value::String(name.clone())))
                    .unwrap_or_default(),
                _ => keyword_params(&keyword, schema.pointer(&schema_path)),
            };
            vec![ValidationError::new(instance_path, schema_path, keyword)
                .with_params(params)
                .with_message(error.to_string())]
        }
    }
}

fn single_param(name: &str, value: Value) -> Map<String, Value> {
    let mut params = Map::new();
    params.insert(name.to_string(), value);
    params
}

/// Parameters for keywords whose detail is the keyword's own schema value.
fn keyword_params(keyword: &str, keyword_value: Option<&Value>) -> Map<String, Value> {
    let mut params = Map::new();
    let Some(value) = keyword_value.cloned() else {
        return params;
    };

    let comparison = match keyword {
        "maximum" => Some("<="),
        "minimum" => Some(">="),
        "exclusiveMaximum" => Some("<"),
        "exclusiveMinimum" => Some(">"),
        _ => None,
    };
    if let Some(comparison) = comparison {
        params.insert("comparison".into(), Value::String(comparison.to_string()));
        params.insert("limit".into(), value);
        return params;
    }

    let name = match keyword {
        "minLength" | "maxLength" | "minItems" | "maxItems" | "minProperties"
        | "maxProperties" => "limit",
        "enum" => "allowedValues",
        "const" => "allowedValue",
        "type" => "type",
        "format" => "format",
        "pattern" => "pattern",
        "multipleOf" => "multipleOf",
        _ => return params,
    };
    params.insert(name.into(), value);
    params
}

// ---------------------------------------------------------------------------
// Process-wide engine
// ---------------------------------------------------------------------------

static ENGINE: OnceLock<Result<SchemaValidator, SchemaError>> = OnceLock::new();

/// The process-wide validator over the embedded schemas, or the reason it
/// could not be built. Built once; concurrent first callers block until
/// the single construction finishes.
pub fn try_engine() -> Result<&'static SchemaValidator, &'static SchemaError> {
    ENGINE
        .get_or_init(|| {
            SchemaValidator::embedded().map_err(|e| {
                tracing::error!(error = %e, "failed to build VERSA schema engine");
                e
            })
        })
        .as_ref()
}

/// The process-wide validator over the embedded schemas.
///
/// # Panics
///
/// Panics if the embedded schemas fail to build, which means the crate
/// was built from a broken `schemas/` directory.
pub fn engine() -> &'static SchemaValidator {
    match try_engine() {
        Ok(engine) => engine,
        Err(e) => panic!("embedded VERSA schemas failed to build: {e}"),
    }
}

/// The embedded schema documents, for tooling that feeds them to other
/// engines or editors.
pub fn schemas() -> &'static SchemaRegistry {
    engine().registry()
}

/// Validate a `context.json` document.
pub fn validate_context(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Context, data)
}

/// Validate a profile document.
pub fn validate_profile(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Profile, data)
}

/// Validate an agent definition.
pub fn validate_agent(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Agent, data)
}

/// Validate rule front matter.
pub fn validate_rule_meta(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::RuleMeta, data)
}

/// Validate a tool configuration.
pub fn validate_tool(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Tool, data)
}

/// Validate a knowledge configuration.
pub fn validate_knowledge(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Knowledge, data)
}

/// Validate a memory policy.
pub fn validate_memory(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Memory, data)
}

/// Validate a permissions document.
pub fn validate_permissions(data: &Value) -> ValidationResult {
    engine().validate(SchemaKind::Permissions, data)
}

/// Validate against the schema named `name` using the process-wide engine.
///
/// # Errors
///
/// Returns [`SchemaError::SchemaNotFound`] for an unknown name.
pub fn validate_named(name: &str, data: &Value) -> Result<ValidationResult, SchemaError> {
    engine().validate_named(name, data)
}

/// Validate and deserialize a document using the process-wide engine.
///
/// # Errors
///
/// See [`SchemaValidator::decode`].
pub fn decode<T: VersaDocument>(data: &Value) -> Result<T, SchemaError> {
    engine().decode(data)
}
