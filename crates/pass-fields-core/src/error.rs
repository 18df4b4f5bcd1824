//! Error types for pass field validation.

use thiserror::Error;

use crate::types::FieldKey;

/// A candidate failed validation against a field schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field for schema {schema}: {reason}")]
pub struct SchemaError {
    /// Name of the schema that rejected the candidate.
    pub schema: String,
    /// Human-readable reason.
    pub reason: String,
}

impl SchemaError {
    pub fn new(schema: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            reason: reason.into(),
        }
    }
}

/// Why a single candidate was left out of a batch insert.
///
/// Rejections are recoverable: the rest of the batch still commits and the
/// rejection is reported only as a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The candidate was absent (`null`).
    #[error("invalid field: candidate is absent")]
    InvalidItem,

    /// The candidate does not conform to the field schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Another field of the same document already uses this key.
    #[error("repeated key: {0}")]
    DuplicateKey(FieldKey),
}

impl Rejection {
    /// The offending key, for duplicate-key rejections.
    pub fn key(&self) -> Option<&FieldKey> {
        match self {
            Rejection::DuplicateKey(key) => Some(key),
            _ => None,
        }
    }
}
