//! Error types for field group operations.

use pass_fields_core::DocumentId;
use thiserror::Error;

/// Errors that abort a field group operation.
///
/// Per-candidate problems are not errors: they are reported as warnings
/// through the [`FieldLogger`](crate::FieldLogger) and the candidate is
/// skipped.
#[derive(Debug, Error)]
pub enum FieldsError {
    /// The owning document is frozen. Nothing was changed.
    #[error("document {0} is frozen and its fields can no longer be modified")]
    Frozen(DocumentId),

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for field group operations.
pub type Result<T> = std::result::Result<T, FieldsError>;
