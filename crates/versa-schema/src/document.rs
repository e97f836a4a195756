//! # Document Parsing
//!
//! Turns document text the caller already holds into the JSON data model
//! the validator works on. VERSA documents are authored as JSON
//! (`context.json`, agent files) or YAML (rule front matter, hand-written
//! profiles). Reading files is left to the caller.

use std::fmt;

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

use crate::error::SchemaError;

/// Text encoding of a VERSA document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Guess the format from a file extension (`json`, `yaml`, `yml`),
    /// ignoring ASCII case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse document text into a JSON value.
///
/// # Errors
///
/// Returns [`SchemaError::DocumentParse`] if the text is not well-formed
/// in the given format or uses YAML features with no JSON equivalent.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value, SchemaError> {
    let parse_error = |reason: String| SchemaError::DocumentParse {
        format: format.as_str(),
        reason,
    };

    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| parse_error(e.to_string())),
        DocumentFormat::Yaml => {
            let yaml: Yaml =
                serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
            yaml_to_json(&yaml).map_err(parse_error)
        }
    }
}

/// Convert a YAML value tree into the equivalent JSON value tree.
///
/// Tags are dropped (the inner value is kept); scalar map keys are
/// stringified; non-finite floats and composite keys are rejected.
fn yaml_to_json(yaml: &Yaml) -> Result<Value, String> {
    Ok(match yaml {
        Yaml::Tagged(tagged) => return yaml_to_json(&tagged.value),
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(*b),
        Yaml::String(s) => Value::String(s.clone()),
        Yaml::Number(n) => Value::Number(json_number(n)?),
        Yaml::Sequence(items) => {
            Value::Array(items.iter().map(yaml_to_json).collect::<Result<_, _>>()?)
        }
        Yaml::Mapping(mapping) => Value::Object(
            mapping
                .iter()
                .map(|(k, v)| -> Result<(String, Value), String> {
                    Ok((map_key(k)?, yaml_to_json(v)?))
                })
                .collect::<Result<Map<_, _>, _>>()?,
        ),
    })
}

/// Unsigned first, so non-negative integers stay `u64` in JSON.
fn json_number(n: &serde_yaml::Number) -> Result<Number, String> {
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    n.as_f64()
        .and_then(Number::from_f64)
        .ok_or_else(|| format!("{n} has no JSON representation"))
}

fn map_key(key: &Yaml) -> Result<String, String> {
    match key {
        Yaml::String(s) => Ok(s.clone()),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Tagged(tagged) => map_key(&tagged.value),
        other => Err(format!("map key must be a scalar, got {other:?}")),
    }
}
