//! FieldList: an ordered field group that validates every mutation.
//!
//! Each mutating operation first consults the [`FrozenGuard`]. A frozen
//! document fails the call with [`FieldsError::Frozen`] before any candidate
//! is looked at. Insertions then run every candidate through the pipeline
//!
//! 1. absent (`null`) candidates are skipped,
//! 2. the field schema must accept the candidate,
//! 3. its key must not be in the shared [`KeyPool`],
//!
//! and register the keys of the survivors. Survivors are committed in one
//! step, in their input order. Rejected candidates are reported to the
//! [`FieldLogger`] and never surface as errors.

use std::fmt;
use std::ops::{Index, Range};
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use pass_fields_core::{Field, FieldKey, FieldSchema, Rejection};

use crate::config::SpliceKeyPolicy;
use crate::error::Result;
use crate::guard::FrozenGuard;
use crate::logger::{FieldLogger, NoopLogger};
use crate::pool::KeyPool;

/// A validated, order-preserving group of fields.
///
/// Only the approved mutations are exposed; elements cannot be replaced in
/// place. Insertion order is the rendering order of the group.
pub struct FieldList {
    /// Group name, used in warnings.
    name: String,
    /// The fields, in rendering order.
    items: Vec<Field>,
    /// Validator for candidates.
    schema: Rc<dyn FieldSchema>,
    /// Keys in use across all sibling groups.
    pool: KeyPool,
    /// The owning document's frozen flag.
    guard: FrozenGuard,
    /// Sink for rejected candidates.
    logger: Rc<dyn FieldLogger>,
    /// Key handling in `splice_range`.
    splice_key_policy: SpliceKeyPolicy,
}

impl FieldList {
    /// Create an empty field group.
    ///
    /// `pool` and `guard` must be the handles shared by every sibling group
    /// of the owning document. Rejections are discarded until a logger is
    /// attached with [`with_logger`](Self::with_logger).
    pub fn new(
        name: impl Into<String>,
        schema: Rc<dyn FieldSchema>,
        pool: KeyPool,
        guard: FrozenGuard,
    ) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            schema,
            pool,
            guard,
            logger: Rc::new(NoopLogger),
            splice_key_policy: SpliceKeyPolicy::default(),
        }
    }

    /// Attach a logger for rejected candidates.
    pub fn with_logger(mut self, logger: Rc<dyn FieldLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Choose how `splice_range` orders key release and validation.
    pub fn with_splice_key_policy(mut self, policy: SpliceKeyPolicy) -> Self {
        self.splice_key_policy = policy;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Append the valid candidates to the end of the group.
    ///
    /// Returns the new length.
    pub fn append<I, T>(&mut self, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.guard.check()?;
        let accepted = self.register_all(items);
        self.items.extend(accepted);
        Ok(self.items.len())
    }

    /// Prepend the valid candidates, keeping their relative order.
    ///
    /// Returns the new length.
    pub fn insert_front<I, T>(&mut self, items: I) -> Result<usize>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.guard.check()?;
        let accepted = self.register_all(items);
        self.items.splice(0..0, accepted);
        Ok(self.items.len())
    }

    /// Remove the last field and release its key.
    ///
    /// Returns `None` if the group is empty.
    pub fn remove_last(&mut self) -> Result<Option<Field>> {
        self.guard.check()?;
        let removed = self.items.pop();
        if let Some(field) = &removed {
            self.pool.release(field.key());
        }
        Ok(removed)
    }

    /// Remove the first field and release its key.
    ///
    /// Returns `None` if the group is empty.
    pub fn remove_first(&mut self) -> Result<Option<Field>> {
        self.guard.check()?;
        if self.items.is_empty() {
            return Ok(None);
        }
        let removed = self.items.remove(0);
        self.pool.release(removed.key());
        Ok(Some(removed))
    }

    /// Replace `delete_count` fields starting at `start` with the valid
    /// candidates, returning the removed fields.
    ///
    /// `start` is clamped to the length and `delete_count` to the fields
    /// remaining after `start`. Whether a candidate may take over a key held
    /// by a field deleted in the same call depends on the
    /// [`SpliceKeyPolicy`].
    pub fn splice_range<I, T>(
        &mut self,
        start: usize,
        delete_count: usize,
        items: I,
    ) -> Result<Vec<Field>>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        self.guard.check()?;

        let start = start.min(self.items.len());
        let end = start.saturating_add(delete_count).min(self.items.len());

        let accepted = match self.splice_key_policy {
            SpliceKeyPolicy::ValidateBeforeRelease => {
                let accepted = self.register_all(items);
                self.release_range(start..end);
                accepted
            }
            SpliceKeyPolicy::ReleaseBeforeValidate => {
                self.release_range(start..end);
                self.register_all(items)
            }
        };

        Ok(self.items.splice(start..end, accepted).collect())
    }

    /// Drop every field and release its key, bypassing the frozen guard.
    ///
    /// Callers check the guard themselves.
    pub(crate) fn discard_all(&mut self) {
        for field in self.items.drain(..) {
            self.pool.release(field.key());
        }
    }

    fn register_all<I, T>(&self, items: I) -> Vec<Field>
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut accepted = Vec::new();
        for candidate in items {
            match self.register(candidate.into()) {
                Ok(field) => accepted.push(field),
                Err(rejection) => self.logger.warn(&self.name, &rejection.to_string()),
            }
        }
        accepted
    }

    fn register(&self, candidate: Value) -> std::result::Result<Field, Rejection> {
        if candidate.is_null() {
            return Err(Rejection::InvalidItem);
        }

        let field = self.schema.validate(&candidate)?;
        if !self.pool.register(field.key().clone()) {
            return Err(Rejection::DuplicateKey(field.key().clone()));
        }

        Ok(field)
    }

    fn release_range(&self, range: Range<usize>) {
        for field in &self.items[range] {
            self.pool.release(field.key());
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group holds no fields.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The field at `index`.
    pub fn get(&self, index: usize) -> Option<&Field> {
        self.items.get(index)
    }

    pub fn first(&self) -> Option<&Field> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&Field> {
        self.items.last()
    }

    /// Iterate in rendering order.
    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Field] {
        &self.items
    }

    /// Find a field of this group by key.
    pub fn find(&self, key: &str) -> Option<&Field> {
        self.items.iter().find(|field| field.key().as_str() == key)
    }

    /// Whether this group holds a field with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Keys of this group, in rendering order.
    pub fn keys(&self) -> impl Iterator<Item = &FieldKey> {
        self.items.iter().map(Field::key)
    }

    /// The shared key pool.
    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }

    /// The owning document's frozen guard.
    pub fn guard(&self) -> &FrozenGuard {
        &self.guard
    }
}

impl Index<usize> for FieldList {
    type Output = Field;

    fn index(&self, index: usize) -> &Field {
        &self.items[index]
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Serialize for FieldList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.items)
    }
}

impl fmt::Debug for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldList")
            .field("name", &self.name)
            .field("schema", &self.schema.name())
            .field("items", &self.items)
            .field("splice_key_policy", &self.splice_key_policy)
            .finish()
    }
}
