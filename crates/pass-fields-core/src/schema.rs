//! Field schemas: structural checks that turn a JSON candidate into a [`Field`].
//!
//! A schema either accepts a candidate and returns the typed field, or
//! rejects it with a human-readable reason. Schemas hold no state, so one
//! instance can be shared by every field group that uses it.

use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::types::{Field, FieldKey};

/// Allowed values of `textAlignment`.
pub const TEXT_ALIGNMENTS: &[&str] = &[
    "PKTextAlignmentLeft",
    "PKTextAlignmentCenter",
    "PKTextAlignmentRight",
    "PKTextAlignmentNatural",
];

/// Allowed values of `dateStyle` and `timeStyle`.
pub const DATE_STYLES: &[&str] = &[
    "PKDateStyleNone",
    "PKDateStyleShort",
    "PKDateStyleMedium",
    "PKDateStyleLong",
    "PKDateStyleFull",
];

/// Allowed values of `numberStyle`.
pub const NUMBER_STYLES: &[&str] = &[
    "PKNumberStyleDecimal",
    "PKNumberStylePercent",
    "PKNumberStyleScientific",
    "PKNumberStyleSpellOut",
];

/// Allowed entries of `dataDetectorTypes`.
pub const DATA_DETECTOR_TYPES: &[&str] = &[
    "PKDataDetectorTypePhoneNumber",
    "PKDataDetectorTypeLink",
    "PKDataDetectorTypeAddress",
    "PKDataDetectorTypeCalendarEvent",
];

/// A field schema validator.
pub trait FieldSchema {
    /// Schema name used in rejection messages.
    fn name(&self) -> &str;

    /// Validate a candidate, returning the conforming field.
    fn validate(&self, candidate: &Value) -> Result<Field, SchemaError>;
}

/// Schema of a standard pass field (header, primary, secondary and back fields).
#[derive(Debug, Clone, Copy, Default)]
pub struct PassFieldSchema;

impl FieldSchema for PassFieldSchema {
    fn name(&self) -> &str {
        "pass-field"
    }

    fn validate(&self, candidate: &Value) -> Result<Field, SchemaError> {
        let object = candidate
            .as_object()
            .ok_or_else(|| SchemaError::new(self.name(), "expected an object"))?;

        if object.contains_key("row") {
            return Err(SchemaError::new(
                self.name(),
                "`row` is only allowed on auxiliary fields",
            ));
        }

        validate_pass_field(object).map_err(|reason| SchemaError::new(self.name(), reason))
    }
}

/// Schema of an auxiliary field: a pass field with an optional `row` (0 or 1).
#[derive(Debug, Clone, Copy, Default)]
pub struct RowFieldSchema;

impl FieldSchema for RowFieldSchema {
    fn name(&self) -> &str {
        "row-field"
    }

    fn validate(&self, candidate: &Value) -> Result<Field, SchemaError> {
        let object = candidate
            .as_object()
            .ok_or_else(|| SchemaError::new(self.name(), "expected an object"))?;

        if let Some(row) = object.get("row") {
            if !matches!(row.as_u64(), Some(0 | 1)) {
                return Err(SchemaError::new(self.name(), "`row` must be 0 or 1"));
            }
        }

        validate_pass_field(object).map_err(|reason| SchemaError::new(self.name(), reason))
    }
}

/// Structural rules shared by every pass field schema.
fn validate_pass_field(object: &Map<String, Value>) -> Result<Field, String> {
    // 1. Key is required and non-empty
    let key = match object.get("key") {
        Some(Value::String(key)) if !key.is_empty() => FieldKey::new(key.as_str()),
        Some(Value::String(_)) => return Err("`key` must not be empty".into()),
        Some(_) => return Err("`key` must be a string".into()),
        None => return Err("`key` is required".into()),
    };

    // 2. Value is required and scalar
    match object.get("value") {
        Some(Value::String(_) | Value::Number(_)) => {}
        Some(_) => return Err("`value` must be a string or a number".into()),
        None => return Err("`value` is required".into()),
    }

    // 3. Optional strings
    for name in ["label", "changeMessage", "currencyCode"] {
        if let Some(v) = object.get(name) {
            if !v.is_string() {
                return Err(format!("`{name}` must be a string"));
            }
        }
    }

    if let Some(v) = object.get("attributedValue") {
        if !(v.is_string() || v.is_number()) {
            return Err("`attributedValue` must be a string or a number".into());
        }
    }

    if let Some(message) = object.get("changeMessage").and_then(Value::as_str) {
        if !message.contains("%@") {
            return Err("`changeMessage` must contain the %@ placeholder".into());
        }
    }

    // 4. Enumerated styles
    one_of(object, "textAlignment", TEXT_ALIGNMENTS)?;
    one_of(object, "dateStyle", DATE_STYLES)?;
    one_of(object, "timeStyle", DATE_STYLES)?;
    one_of(object, "numberStyle", NUMBER_STYLES)?;

    if let Some(v) = object.get("dataDetectorTypes") {
        let entries = v
            .as_array()
            .ok_or_else(|| "`dataDetectorTypes` must be an array".to_string())?;
        for entry in entries {
            match entry.as_str() {
                Some(s) if DATA_DETECTOR_TYPES.contains(&s) => {}
                _ => return Err(format!("unknown data detector type: {entry}")),
            }
        }
    }

    // 5. Currency and number formatting are exclusive
    if let Some(code) = object.get("currencyCode").and_then(Value::as_str) {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(format!("`currencyCode` must be an ISO 4217 code, got {code:?}"));
        }
        if object.contains_key("numberStyle") {
            return Err("`currencyCode` and `numberStyle` are mutually exclusive".into());
        }
    }

    // 6. Flags
    for name in ["ignoresTimeZone", "isRelative"] {
        if let Some(v) = object.get(name) {
            if !v.is_boolean() {
                return Err(format!("`{name}` must be a boolean"));
            }
        }
    }

    if let Some(v) = object.get("semantics") {
        if !v.is_object() {
            return Err("`semantics` must be an object".into());
        }
    }

    Ok(Field::from_parts(key, object.clone()))
}

fn one_of(object: &Map<String, Value>, name: &str, allowed: &[&str]) -> Result<(), String> {
    match object.get(name) {
        None => Ok(()),
        Some(Value::String(s)) if allowed.contains(&s.as_str()) => Ok(()),
        Some(other) => Err(format!("`{name}` has unsupported value {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn reason(schema: &dyn FieldSchema, candidate: Value) -> String {
        schema.validate(&candidate).unwrap_err().reason
    }

    #[test]
    fn test_minimal_field() {
        let field = PassFieldSchema
            .validate(&json!({"key": "gate", "value": "B12"}))
            .unwrap();
        assert_eq!(field.key().as_str(), "gate");
        assert_eq!(field.value(), Some(&json!("B12")));
        assert!(field.attribute("key").is_none());
    }

    #[test]
    fn test_full_field() {
        let candidate = json!({
            "key": "departs",
            "label": "Departs",
            "value": "2024-01-15T10:00:00Z",
            "dateStyle": "PKDateStyleShort",
            "timeStyle": "PKDateStyleShort",
            "isRelative": true,
            "textAlignment": "PKTextAlignmentRight",
            "changeMessage": "Departure moved to %@",
            "dataDetectorTypes": ["PKDataDetectorTypeCalendarEvent"],
        });
        let field = PassFieldSchema.validate(&candidate).unwrap();
        assert_eq!(field.label(), Some("Departs"));
        assert_eq!(field.attributes().len(), 8);
    }

    #[test]
    fn test_not_an_object() {
        assert_eq!(reason(&PassFieldSchema, json!("gate")), "expected an object");
        assert_eq!(reason(&PassFieldSchema, json!([1, 2])), "expected an object");
    }

    #[test]
    fn test_key_rules() {
        assert_eq!(reason(&PassFieldSchema, json!({"value": 1})), "`key` is required");
        assert_eq!(
            reason(&PassFieldSchema, json!({"key": "", "value": 1})),
            "`key` must not be empty"
        );
        assert_eq!(
            reason(&PassFieldSchema, json!({"key": 7, "value": 1})),
            "`key` must be a string"
        );
    }

    #[test]
    fn test_value_rules() {
        assert_eq!(reason(&PassFieldSchema, json!({"key": "a"})), "`value` is required");
        assert_eq!(
            reason(&PassFieldSchema, json!({"key": "a", "value": {"x": 1}})),
            "`value` must be a string or a number"
        );
        assert!(PassFieldSchema
            .validate(&json!({"key": "a", "value": 42.5}))
            .is_ok());
    }

    #[test]
    fn test_enumerated_styles() {
        let err = reason(
            &PassFieldSchema,
            json!({"key": "a", "value": 1, "textAlignment": "left"}),
        );
        assert!(err.starts_with("`textAlignment` has unsupported value"));

        let err = reason(
            &PassFieldSchema,
            json!({"key": "a", "value": 1, "dataDetectorTypes": ["PKDataDetectorTypeEmail"]}),
        );
        assert!(err.starts_with("unknown data detector type"));
    }

    #[test]
    fn test_change_message_placeholder() {
        assert_eq!(
            reason(
                &PassFieldSchema,
                json!({"key": "a", "value": 1, "changeMessage": "changed"})
            ),
            "`changeMessage` must contain the %@ placeholder"
        );
    }

    #[test]
    fn test_currency_rules() {
        assert!(PassFieldSchema
            .validate(&json!({"key": "a", "value": 10, "currencyCode": "EUR"}))
            .is_ok());

        let err = reason(
            &PassFieldSchema,
            json!({"key": "a", "value": 10, "currencyCode": "euro"}),
        );
        assert!(err.starts_with("`currencyCode` must be an ISO 4217 code"));

        assert_eq!(
            reason(
                &PassFieldSchema,
                json!({
                    "key": "a",
                    "value": 10,
                    "currencyCode": "EUR",
                    "numberStyle": "PKNumberStyleDecimal"
                })
            ),
            "`currencyCode` and `numberStyle` are mutually exclusive"
        );
    }

    #[test]
    fn test_unknown_attributes_are_opaque() {
        let field = PassFieldSchema
            .validate(&json!({"key": "a", "value": 1, "x-custom": {"nested": true}}))
            .unwrap();
        assert_eq!(field.attribute("x-custom"), Some(&json!({"nested": true})));
    }

    #[test]
    fn test_row_only_on_auxiliary_fields() {
        assert_eq!(
            reason(&PassFieldSchema, json!({"key": "a", "value": 1, "row": 0})),
            "`row` is only allowed on auxiliary fields"
        );
        assert!(RowFieldSchema
            .validate(&json!({"key": "a", "value": 1, "row": 1}))
            .is_ok());
        assert_eq!(
            reason(&RowFieldSchema, json!({"key": "a", "value": 1, "row": 2})),
            "`row` must be 0 or 1"
        );
    }

    #[test]
    fn test_schema_name_in_error() {
        let err = RowFieldSchema.validate(&json!(null)).unwrap_err();
        assert_eq!(err.schema, "row-field");
    }

    proptest! {
        #[test]
        fn test_any_key_with_scalar_value_validates(
            key in "[A-Za-z0-9_.-]{1,24}",
            value in any::<i64>(),
        ) {
            let field = PassFieldSchema
                .validate(&json!({"key": key.clone(), "value": value}))
                .unwrap();
            prop_assert_eq!(field.key().as_str(), key.as_str());
            prop_assert_eq!(field.value().cloned(), Some(json!(value)));
        }

        #[test]
        fn test_non_object_candidates_rejected(text in ".*", number in any::<f64>()) {
            prop_assert!(PassFieldSchema.validate(&json!(text)).is_err());
            prop_assert!(RowFieldSchema.validate(&json!(number)).is_err());
        }
    }
}
