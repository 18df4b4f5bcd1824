//! # Pass Fields Testkit
//!
//! Testing utilities for pass field groups.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a pass wired to a [`RecordingLogger`], plus candidate builders
//! - **Generators**: Proptest strategies for candidates and field operations
//!
//! ## Test Fixtures
//!
//! ```rust
//! use pass_fields::FieldGroup;
//! use pass_fields_testkit::fixtures::{valid_field, TestFixture};
//!
//! let mut fixture = TestFixture::new();
//! fixture.pass.primary_fields().append([valid_field("a"), valid_field("a")]).unwrap();
//!
//! assert_eq!(fixture.group_keys(FieldGroup::Primary), vec!["a"]);
//! assert_eq!(fixture.logger.messages(), vec!["repeated key: a"]);
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use pass_fields_testkit::{field_ops, TestFixture};
//!
//! proptest! {
//!     #[test]
//!     fn pool_matches_groups(ops in field_ops(40)) {
//!         let mut fixture = TestFixture::new();
//!         for op in &ops {
//!             op.apply(&mut fixture.pass).unwrap();
//!         }
//!         prop_assert!(fixture.pass.is_consistent());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{invalid_field, row_field, valid_field, RecordingLogger, TestFixture, Warning};
pub use generators::{candidate, candidates, field_op, field_ops, Candidate, FieldOp};
