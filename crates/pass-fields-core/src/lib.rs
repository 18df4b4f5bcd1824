//! # Pass Fields Core
//!
//! Pure primitives for pass field groups: keys, fields, schemas and the
//! rejection taxonomy.
//!
//! This crate holds no shared state and does no logging. It is pure
//! validation over JSON candidates.
//!
//! ## Key Types
//!
//! - [`Field`] - A schema-conformant record with a unique [`FieldKey`]
//! - [`DocumentId`] - Identity of the document that owns the field groups
//! - [`FieldSchema`] - Validator turning a JSON candidate into a [`Field`]
//! - [`Rejection`] - Why a candidate was left out of a batch

pub mod error;
pub mod schema;
pub mod types;

pub use error::{Rejection, SchemaError};
pub use schema::{FieldSchema, PassFieldSchema, RowFieldSchema};
pub use types::{DocumentId, Field, FieldKey};
