//! Configuration for field groups.

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};

/// Order of key release and candidate validation in
/// [`FieldList::splice_range`](crate::FieldList::splice_range).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpliceKeyPolicy {
    /// Validate the inserted candidates while the deleted fields still hold
    /// their keys. Replacing a field with one of the same key is rejected as
    /// a duplicate.
    #[default]
    ValidateBeforeRelease,

    /// Release the deleted fields' keys first, so an inserted candidate may
    /// reuse them.
    ReleaseBeforeValidate,
}

/// Configuration shared by the field groups of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldsConfig {
    /// Key handling in `splice_range`.
    pub splice_key_policy: SpliceKeyPolicy,
    /// Whether rejected candidates are reported through `tracing`.
    pub log_rejections: bool,
}

impl Default for FieldsConfig {
    fn default() -> Self {
        Self {
            splice_key_policy: SpliceKeyPolicy::default(),
            log_rejections: true,
        }
    }
}

impl FieldsConfig {
    /// Parse a configuration from JSON. Missing entries take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| FieldsError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldsConfig::default();
        assert_eq!(config.splice_key_policy, SpliceKeyPolicy::ValidateBeforeRelease);
        assert!(config.log_rejections);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config =
            FieldsConfig::from_json(r#"{"splice_key_policy": "release_before_validate"}"#)
                .unwrap();
        assert_eq!(config.splice_key_policy, SpliceKeyPolicy::ReleaseBeforeValidate);
        assert!(config.log_rejections);

        let config = FieldsConfig::from_json("{}").unwrap();
        assert_eq!(config, FieldsConfig::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_policy() {
        let err = FieldsConfig::from_json(r#"{"splice_key_policy": "whatever"}"#).unwrap_err();
        assert!(matches!(err, FieldsError::Config(_)));
    }
}
