//! JSON-Schema validation of incoming events

use crate::error::{EventError, Result};
use crate::models::EventDocument;
use jsonschema::Validator;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};

/// Event schema shipped with the crate
const BUNDLED_SCHEMA: &str = include_str!("../schemas/event.schema.json");

const REPORT_PREFIX: &str = "The json did not match the expected format: ";

/// Failure to load or compile a schema at startup
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schema could not be compiled: {0}")]
    Compile(String),
}

/// A compiled draft-07 schema, shared read-only between requests
pub struct EventSchema {
    validator: Validator,
}

impl EventSchema {
    pub fn from_value(schema: &Value) -> std::result::Result<Self, SchemaError> {
        let validator =
            jsonschema::draft7::new(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::result::Result<Self, SchemaError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_value(&serde_json::from_slice(&raw)?)
    }

    /// The default event schema: timestamp, summary, source and attributes
    pub fn bundled() -> std::result::Result<Self, SchemaError> {
        Self::from_value(&serde_json::from_str(BUNDLED_SCHEMA)?)
    }

    /// Validate raw request bytes and return the parsed document.
    pub fn validate(&self, body: &[u8]) -> Result<EventDocument> {
        let instance: Value = serde_json::from_slice(body).map_err(|_| EventError::MalformedBody)?;

        let violations: Vec<Violation> = self
            .validator
            .iter_errors(&instance)
            .map(|error| Violation::new(error.instance_path.to_string(), error.to_string()))
            .collect();

        if !violations.is_empty() {
            return Err(EventError::Validation(ValidationReport { violations }));
        }

        match instance {
            Value::Object(document) => Ok(document),
            _ => Err(EventError::MalformedBody),
        }
    }
}

impl fmt::Debug for EventSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSchema").finish_non_exhaustive()
    }
}

/// One rule violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON pointer into the instance, empty for the root
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message.replace('"', "'");
        if self.path.is_empty() || self.path == "/" {
            write!(f, "{}", message)
        } else {
            write!(f, "{} {}", self.path, message)
        }
    }
}

/// Every violation found in one document, in evaluation order.
///
/// Renders as the message sent back with the 400.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REPORT_PREFIX)?;
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
