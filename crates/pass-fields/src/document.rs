//! PassFields: the field groups of one pass document.
//!
//! A pass carries five field groups. They share one [`KeyPool`], so a key is
//! unique across the whole pass, and one [`FrozenGuard`], so freezing the
//! pass (for example once it has been packaged and signed) locks every
//! group at once.

use std::fmt;
use std::rc::Rc;

use pass_fields_core::{DocumentId, FieldKey, FieldSchema, PassFieldSchema, RowFieldSchema};

use crate::config::FieldsConfig;
use crate::error::Result;
use crate::guard::FrozenGuard;
use crate::list::FieldList;
use crate::logger::{FieldLogger, NoopLogger, TracingLogger};
use crate::pool::KeyPool;

/// The field groups of a pass, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldGroup {
    Header,
    Primary,
    Secondary,
    Auxiliary,
    Back,
}

impl FieldGroup {
    /// Every group, in rendering order.
    pub const ALL: [FieldGroup; 5] = [
        FieldGroup::Header,
        FieldGroup::Primary,
        FieldGroup::Secondary,
        FieldGroup::Auxiliary,
        FieldGroup::Back,
    ];

    /// The group's name in the pass format.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldGroup::Header => "headerFields",
            FieldGroup::Primary => "primaryFields",
            FieldGroup::Secondary => "secondaryFields",
            FieldGroup::Auxiliary => "auxiliaryFields",
            FieldGroup::Back => "backFields",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FieldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The field groups of one pass document.
pub struct PassFields {
    id: DocumentId,
    pool: KeyPool,
    guard: FrozenGuard,
    groups: [FieldList; 5],
}

impl PassFields {
    /// Create the empty field groups of a pass.
    ///
    /// Rejected candidates are reported through `tracing` unless
    /// `config.log_rejections` is off.
    pub fn new(pass_type_identifier: &str, serial_number: &str, config: FieldsConfig) -> Self {
        let logger: Rc<dyn FieldLogger> = if config.log_rejections {
            Rc::new(TracingLogger)
        } else {
            Rc::new(NoopLogger)
        };
        Self::with_logger(pass_type_identifier, serial_number, config, logger)
    }

    /// Create the empty field groups of a pass with a custom logger.
    pub fn with_logger(
        pass_type_identifier: &str,
        serial_number: &str,
        config: FieldsConfig,
        logger: Rc<dyn FieldLogger>,
    ) -> Self {
        let id = DocumentId::derive(pass_type_identifier, serial_number);
        let pool = KeyPool::new();
        let guard = FrozenGuard::new(id);

        let pass_schema: Rc<dyn FieldSchema> = Rc::new(PassFieldSchema);
        let row_schema: Rc<dyn FieldSchema> = Rc::new(RowFieldSchema);

        let groups = FieldGroup::ALL.map(|group| {
            let schema = match group {
                FieldGroup::Auxiliary => row_schema.clone(),
                _ => pass_schema.clone(),
            };
            FieldList::new(group.as_str(), schema, pool.clone(), guard.clone())
                .with_logger(logger.clone())
                .with_splice_key_policy(config.splice_key_policy)
        });

        Self {
            id,
            pool,
            guard,
            groups,
        }
    }

    /// The document identity.
    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn group(&self, group: FieldGroup) -> &FieldList {
        &self.groups[group.index()]
    }

    pub fn group_mut(&mut self, group: FieldGroup) -> &mut FieldList {
        &mut self.groups[group.index()]
    }

    pub fn header_fields(&mut self) -> &mut FieldList {
        self.group_mut(FieldGroup::Header)
    }

    pub fn primary_fields(&mut self) -> &mut FieldList {
        self.group_mut(FieldGroup::Primary)
    }

    pub fn secondary_fields(&mut self) -> &mut FieldList {
        self.group_mut(FieldGroup::Secondary)
    }

    pub fn auxiliary_fields(&mut self) -> &mut FieldList {
        self.group_mut(FieldGroup::Auxiliary)
    }

    pub fn back_fields(&mut self) -> &mut FieldList {
        self.group_mut(FieldGroup::Back)
    }

    /// Iterate over the groups in rendering order.
    pub fn groups(&self) -> impl Iterator<Item = (FieldGroup, &FieldList)> {
        FieldGroup::ALL.into_iter().zip(self.groups.iter())
    }

    /// Lock every field group. There is no way back.
    pub fn freeze(&self) {
        if !self.guard.is_frozen() {
            tracing::debug!(document = %self.id, fields = self.total_len(), "freezing pass fields");
        }
        self.guard.freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.guard.is_frozen()
    }

    /// The key pool shared by all groups.
    pub fn pool(&self) -> &KeyPool {
        &self.pool
    }

    /// Sorted keys in use across all groups.
    pub fn keys(&self) -> Vec<FieldKey> {
        self.pool.keys()
    }

    /// Whether any group holds a field with the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.pool.contains(key)
    }

    /// Total number of fields across all groups.
    pub fn total_len(&self) -> usize {
        self.groups.iter().map(FieldList::len).sum()
    }

    /// Empty every group, e.g. when the pass type changes.
    ///
    /// Fails with [`FieldsError::Frozen`](crate::FieldsError::Frozen) on a
    /// frozen document and changes nothing.
    pub fn reset(&mut self) -> Result<()> {
        self.guard.check()?;
        for group in &mut self.groups {
            group.discard_all();
        }
        tracing::debug!(document = %self.id, "pass fields reset");
        Ok(())
    }

    /// Whether the pool holds exactly the keys of the groups, each once.
    pub fn is_consistent(&self) -> bool {
        let mut keys: Vec<&FieldKey> = self.groups.iter().flat_map(FieldList::keys).collect();
        let held = keys.len();
        keys.sort();
        keys.dedup();

        keys.len() == held
            && keys.len() == self.pool.len()
            && keys.iter().all(|key| self.pool.contains(key.as_str()))
    }
}

impl fmt::Debug for PassFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("PassFields");
        s.field("id", &self.id).field("frozen", &self.is_frozen());
        for (group, list) in self.groups() {
            s.field(group.as_str(), &list.as_slice());
        }
        s.finish()
    }
}
