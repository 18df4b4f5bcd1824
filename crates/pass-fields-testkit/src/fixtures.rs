//! Test fixtures and helpers.
//!
//! Common setup code for field group tests.

use std::cell::RefCell;
use std::rc::Rc;

use pass_fields::{FieldGroup, FieldKey, FieldLogger, FieldsConfig, PassFields};
use serde_json::{json, Value};

/// A warning captured by [`RecordingLogger`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub group: String,
    pub message: String,
}

/// Logger that keeps every warning in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    warnings: RefCell<Vec<Warning>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All warnings so far.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings.borrow().clone()
    }

    /// Just the messages.
    pub fn messages(&self) -> Vec<String> {
        self.warnings
            .borrow()
            .iter()
            .map(|w| w.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.warnings.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.borrow().is_empty()
    }

    /// Forget recorded warnings.
    pub fn clear(&self) {
        self.warnings.borrow_mut().clear();
    }
}

impl FieldLogger for RecordingLogger {
    fn warn(&self, group: &str, message: &str) {
        self.warnings.borrow_mut().push(Warning {
            group: group.to_owned(),
            message: message.to_owned(),
        });
    }
}

/// A pass with a recording logger attached to every group.
pub struct TestFixture {
    pub pass: PassFields,
    pub logger: Rc<RecordingLogger>,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(FieldsConfig::default())
    }

    pub fn with_config(config: FieldsConfig) -> Self {
        let logger = Rc::new(RecordingLogger::new());
        let pass = PassFields::with_logger(
            "pass.com.example.testkit",
            "TEST-0001",
            config,
            logger.clone(),
        );
        Self { pass, logger }
    }

    /// Keys of one group, in rendering order.
    pub fn group_keys(&self, group: FieldGroup) -> Vec<String> {
        self.pass
            .group(group)
            .keys()
            .map(|key| key.as_str().to_owned())
            .collect()
    }

    /// Keys of every group, in rendering order, with duplicates kept.
    pub fn all_keys(&self) -> Vec<FieldKey> {
        self.pass
            .groups()
            .flat_map(|(_, list)| list.keys().cloned())
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A valid pass field candidate.
pub fn valid_field(key: &str) -> Value {
    json!({
        "key": key,
        "label": key.to_uppercase(),
        "value": format!("value-{key}"),
    })
}

/// A valid auxiliary field candidate on the given row.
pub fn row_field(key: &str, row: u8) -> Value {
    json!({"key": key, "value": key, "row": row})
}

/// A candidate every pass schema rejects (missing `value`).
pub fn invalid_field(key: &str) -> Value {
    json!({"key": key})
}
