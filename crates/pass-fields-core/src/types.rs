//! Strong type definitions for pass field groups.
//!
//! Identifiers are newtypes so a field key can never be confused with any
//! other string attribute of a field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// The identifying key of a field.
///
/// Keys must be unique across every field group of one document.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldKey(String);

impl FieldKey {
    /// Create a key from any string-like value.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the key, returning the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldKey({:?})", self.0)
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FieldKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for FieldKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldKey {
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for FieldKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// A 32-byte document identifier.
///
/// Derived from Blake3(pass_type_identifier || serial_number), which is the
/// identity a pass keeps for its whole life.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentId(pub [u8; 32]);

impl DocumentId {
    /// Derive a document ID from the pass type identifier and serial number.
    pub fn derive(pass_type_identifier: &str, serial_number: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(b"pass-fields-document-v0:");
        // Length prefixes keep ("a:b", "c") and ("a", "b:c") apart.
        hasher.update(&(pass_type_identifier.len() as u64).to_le_bytes());
        hasher.update(pass_type_identifier.as_bytes());
        hasher.update(&(serial_number.len() as u64).to_le_bytes());
        hasher.update(serial_number.as_bytes());
        Self(*hasher.finalize().as_bytes())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DocumentId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

/// A schema-conformant field: a key plus opaque display attributes.
///
/// Fields are normally produced by a [`FieldSchema`](crate::FieldSchema),
/// which guarantees conformance. The attributes (label, value, styles, ...)
/// are not interpreted by the collection layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    key: FieldKey,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

impl Field {
    /// Create a field with the given key and no attributes.
    pub fn new(key: impl Into<FieldKey>) -> Self {
        Self {
            key: key.into(),
            attributes: Map::new(),
        }
    }

    /// Assemble a field from an already-validated key and attribute map.
    ///
    /// A `key` entry in `attributes` is dropped.
    pub fn from_parts(key: FieldKey, mut attributes: Map<String, Value>) -> Self {
        attributes.remove("key");
        Self { key, attributes }
    }

    /// Set an attribute. The reserved `key` attribute is ignored.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        if name != "key" {
            self.attributes.insert(name, value.into());
        }
        self
    }

    /// Set the `label` attribute.
    pub fn with_label(self, label: impl Into<String>) -> Self {
        self.with_attribute("label", label.into())
    }

    /// Set the `value` attribute.
    pub fn with_value(self, value: impl Into<Value>) -> Self {
        self.with_attribute("value", value)
    }

    /// The identifying key.
    pub fn key(&self) -> &FieldKey {
        &self.key
    }

    /// The `label` attribute, if it is a string.
    pub fn label(&self) -> Option<&str> {
        self.attributes.get("label").and_then(Value::as_str)
    }

    /// The `value` attribute.
    pub fn value(&self) -> Option<&Value> {
        self.attributes.get("value")
    }

    /// Look up any attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// All attributes except the key, in insertion order.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl From<Field> for Value {
    fn from(field: Field) -> Self {
        let mut object = Map::with_capacity(field.attributes.len() + 1);
        object.insert("key".to_owned(), Value::String(field.key.into_inner()));
        object.extend(field.attributes);
        Value::Object(object)
    }
}
