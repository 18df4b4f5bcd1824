//! # Pass Fields
//!
//! Self-validating, order-preserving field groups for pass documents.
//!
//! ## Overview
//!
//! A pass is described by several named field groups (header, primary,
//! secondary, auxiliary and back fields). This crate guarantees three
//! invariants at the point of mutation rather than at serialization time:
//!
//! - **Schema**: every field held by a group conforms to its field schema
//! - **Unique keys**: no two fields of the same document share a key, across
//!   all of its groups
//! - **Frozen**: once the document is frozen, no group accepts mutation
//!
//! ## Failure Model
//!
//! Batch inserts are best effort. Absent candidates, schema failures and
//! duplicate keys are skipped and reported to the [`FieldLogger`]; the valid
//! remainder is committed in input order. The only error a mutation returns
//! is [`FieldsError::Frozen`], and it leaves the group and the key pool
//! untouched.
//!
//! ## Threading
//!
//! Sibling groups share their [`KeyPool`] and [`FrozenGuard`] through `Rc`
//! handles. Groups are therefore `!Send`: all mutations on one document are
//! serialized on a single thread.
//!
//! ## Usage
//!
//! ```rust
//! use pass_fields::{FieldsConfig, PassFields};
//! use serde_json::json;
//!
//! let mut pass = PassFields::new("pass.com.example.ticket", "0001", FieldsConfig::default());
//!
//! let len = pass
//!     .primary_fields()
//!     .append([
//!         json!({"key": "event", "label": "Event", "value": "Concert"}),
//!         json!({"key": "event", "value": "Duplicate"}),
//!     ])
//!     .unwrap();
//! assert_eq!(len, 1);
//!
//! pass.freeze();
//! assert!(pass.back_fields().append([json!({"key": "terms", "value": "..."})]).is_err());
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod guard;
pub mod list;
pub mod logger;
pub mod pool;

// Re-export the core crate
pub use pass_fields_core as core;

pub use config::{FieldsConfig, SpliceKeyPolicy};
pub use document::{FieldGroup, PassFields};
pub use error::{FieldsError, Result};
pub use guard::FrozenGuard;
pub use list::FieldList;
pub use logger::{FieldLogger, NoopLogger, TracingLogger};
pub use pool::KeyPool;

pub use pass_fields_core::{
    DocumentId, Field, FieldKey, FieldSchema, PassFieldSchema, Rejection, RowFieldSchema,
    SchemaError,
};
