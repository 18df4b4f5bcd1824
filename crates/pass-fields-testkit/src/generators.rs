//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use pass_fields::{FieldGroup, PassFields, SpliceKeyPolicy};
use pass_fields_core::Field;

use crate::fixtures::invalid_field;

/// A candidate handed to a batch insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A schema-conformant field with this key.
    Valid(String),
    /// A field with this key that fails schema validation.
    Invalid(String),
    /// `null`.
    Absent,
}

impl Candidate {
    /// The JSON form passed to the field group.
    pub fn to_value(&self) -> Value {
        match self {
            Candidate::Valid(key) => Field::new(key.as_str()).with_value(key.as_str()).into(),
            Candidate::Invalid(key) => invalid_field(key),
            Candidate::Absent => Value::Null,
        }
    }

    /// The key, for candidates that pass the schema.
    pub fn valid_key(&self) -> Option<&str> {
        match self {
            Candidate::Valid(key) => Some(key.as_str()),
            _ => None,
        }
    }
}

/// A mutation applied to one field group of a pass.
#[derive(Debug, Clone)]
pub enum FieldOp {
    Append(FieldGroup, Vec<Candidate>),
    InsertFront(FieldGroup, Vec<Candidate>),
    RemoveFirst(FieldGroup),
    RemoveLast(FieldGroup),
    Splice {
        group: FieldGroup,
        start: usize,
        delete_count: usize,
        items: Vec<Candidate>,
    },
}

impl FieldOp {
    /// Apply the operation to a pass.
    pub fn apply(&self, pass: &mut PassFields) -> pass_fields::Result<()> {
        fn values(items: &[Candidate]) -> Vec<Value> {
            items.iter().map(Candidate::to_value).collect()
        }

        match self {
            FieldOp::Append(group, items) => {
                pass.group_mut(*group).append(values(items))?;
            }
            FieldOp::InsertFront(group, items) => {
                pass.group_mut(*group).insert_front(values(items))?;
            }
            FieldOp::RemoveFirst(group) => {
                pass.group_mut(*group).remove_first()?;
            }
            FieldOp::RemoveLast(group) => {
                pass.group_mut(*group).remove_last()?;
            }
            FieldOp::Splice {
                group,
                start,
                delete_count,
                items,
            } => {
                pass.group_mut(*group)
                    .splice_range(*start, *delete_count, values(items))?;
            }
        }
        Ok(())
    }
}

/// Generate a field group.
pub fn field_group() -> impl Strategy<Value = FieldGroup> {
    prop::sample::select(FieldGroup::ALL.to_vec())
}

/// Generate a splice key policy.
pub fn splice_key_policy() -> impl Strategy<Value = SpliceKeyPolicy> {
    prop_oneof![
        Just(SpliceKeyPolicy::ValidateBeforeRelease),
        Just(SpliceKeyPolicy::ReleaseBeforeValidate),
    ]
}

/// Generate a key from a small alphabet so collisions are frequent.
pub fn field_key() -> impl Strategy<Value = String> {
    "[a-f]".prop_map(String::from)
}

/// Generate a candidate, mostly valid.
pub fn candidate() -> impl Strategy<Value = Candidate> {
    prop_oneof![
        6 => field_key().prop_map(Candidate::Valid),
        1 => field_key().prop_map(Candidate::Invalid),
        1 => Just(Candidate::Absent),
    ]
}

/// Generate a batch of candidates.
pub fn candidates(max_len: usize) -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec(candidate(), 0..=max_len)
}

/// Generate a single field operation.
pub fn field_op() -> impl Strategy<Value = FieldOp> {
    prop_oneof![
        3 => (field_group(), candidates(4)).prop_map(|(g, c)| FieldOp::Append(g, c)),
        2 => (field_group(), candidates(4)).prop_map(|(g, c)| FieldOp::InsertFront(g, c)),
        1 => field_group().prop_map(FieldOp::RemoveFirst),
        1 => field_group().prop_map(FieldOp::RemoveLast),
        2 => (field_group(), 0usize..6, 0usize..4, candidates(3)).prop_map(
            |(group, start, delete_count, items)| FieldOp::Splice {
                group,
                start,
                delete_count,
                items,
            }
        ),
    ]
}

/// Generate a sequence of field operations.
pub fn field_ops(max_len: usize) -> impl Strategy<Value = Vec<FieldOp>> {
    prop::collection::vec(field_op(), 0..=max_len)
}

/// The keys an append of `items` into an empty pool commits, in order.
pub fn expected_keys(items: &[Candidate]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .iter()
        .filter_map(Candidate::valid_key)
        .filter(|key| seen.insert(key.to_string()))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestFixture;
    use pass_fields::{FieldsConfig, FieldsError};
    use std::collections::HashSet;

    fn snapshot(fixture: &TestFixture) -> (Vec<Value>, Vec<pass_fields::FieldKey>) {
        let groups = fixture
            .pass
            .groups()
            .map(|(_, list)| serde_json::to_value(list).unwrap())
            .collect();
        (groups, fixture.pass.keys())
    }

    proptest! {
        #[test]
        fn test_keys_unique_across_groups(
            policy in splice_key_policy(),
            ops in field_ops(40),
        ) {
            let mut fixture = TestFixture::with_config(FieldsConfig {
                splice_key_policy: policy,
                ..FieldsConfig::default()
            });

            for op in &ops {
                prop_assert!(op.apply(&mut fixture.pass).is_ok());

                let keys = fixture.all_keys();
                let unique: HashSet<_> = keys.iter().collect();
                prop_assert_eq!(unique.len(), keys.len());
                prop_assert!(fixture.pass.is_consistent());
            }
        }

        #[test]
        fn test_frozen_is_atomic(
            setup in field_ops(20),
            op in field_op(),
        ) {
            let mut fixture = TestFixture::new();
            for step in &setup {
                step.apply(&mut fixture.pass).unwrap();
            }
            fixture.pass.freeze();
            fixture.logger.clear();

            let before = snapshot(&fixture);
            let result = op.apply(&mut fixture.pass);

            prop_assert!(matches!(result, Err(FieldsError::Frozen(_))));
            prop_assert_eq!(snapshot(&fixture), before);
            prop_assert!(fixture.logger.is_empty());
        }

        #[test]
        fn test_append_preserves_order(group in field_group(), items in candidates(12)) {
            let mut fixture = TestFixture::new();
            let values: Vec<Value> = items.iter().map(Candidate::to_value).collect();

            let len = fixture.pass.group_mut(group).append(values).unwrap();

            let expected = expected_keys(&items);
            prop_assert_eq!(len, expected.len());
            prop_assert_eq!(fixture.group_keys(group), expected);
            prop_assert_eq!(fixture.logger.len(), items.len() - len);
        }

        #[test]
        fn test_insert_front_keeps_batch_order(
            group in field_group(),
            existing in candidates(4),
            items in candidates(8),
        ) {
            let mut fixture = TestFixture::new();
            let list = fixture.pass.group_mut(group);
            list.append(existing.iter().map(Candidate::to_value)).unwrap();
            let before: Vec<String> = list.keys().map(|k| k.as_str().to_owned()).collect();

            list.insert_front(items.iter().map(Candidate::to_value)).unwrap();

            let taken: HashSet<&str> = before.iter().map(String::as_str).collect();
            let mut front: Vec<String> = expected_keys(&items)
                .into_iter()
                .filter(|key| !taken.contains(key.as_str()))
                .collect();
            front.extend(before);
            prop_assert_eq!(fixture.group_keys(group), front);
        }

        #[test]
        fn test_removed_key_is_reusable(group in field_group(), key in field_key(), other in field_group()) {
            let mut fixture = TestFixture::new();
            let field = Candidate::Valid(key.clone()).to_value();

            fixture.pass.group_mut(group).append([field.clone()]).unwrap();
            let len = fixture.pass.group_mut(other).append([field.clone()]).unwrap();
            prop_assert_eq!(len, fixture.pass.group(other).len());
            prop_assert!(!fixture.pass.group(other).contains_key(&key) || other == group);
            prop_assert_eq!(fixture.logger.len(), 1);

            fixture.pass.group_mut(group).remove_last().unwrap();
            prop_assert!(!fixture.pass.contains_key(&key));

            let before = fixture.pass.group(other).len();
            let after = fixture.pass.group_mut(other).append([field]).unwrap();
            prop_assert_eq!(after, before + 1);
        }
    }

    #[test]
    fn test_expected_keys_dedups_first_wins() {
        let items = vec![
            Candidate::Valid("a".into()),
            Candidate::Invalid("b".into()),
            Candidate::Absent,
            Candidate::Valid("a".into()),
            Candidate::Valid("c".into()),
        ];
        assert_eq!(expected_keys(&items), vec!["a", "c"]);
    }
}
