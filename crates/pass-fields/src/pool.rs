//! The key pool: field keys in use across sibling field groups.
//!
//! Every field group of one document holds a handle to the same pool, so a
//! key used in the header fields cannot be reused in the back fields.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use pass_fields_core::FieldKey;

/// Shared set of in-use field keys.
///
/// Cloning the handle shares the underlying set. The handle is neither
/// `Send` nor `Sync`: all sibling field groups of a document must be mutated
/// from one thread, one call at a time.
///
/// The pool is only changed by [`FieldList`](crate::FieldList) operations.
/// Outside this crate it is read-only.
#[derive(Clone, Default)]
pub struct KeyPool {
    keys: Rc<RefCell<HashSet<FieldKey>>>,
}

impl KeyPool {
    /// Create a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key is currently in use.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.borrow().contains(key)
    }

    /// Number of keys in use.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    /// Whether no key is in use.
    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    /// Sorted snapshot of the keys in use.
    pub fn keys(&self) -> Vec<FieldKey> {
        let mut keys: Vec<_> = self.keys.borrow().iter().cloned().collect();
        keys.sort();
        keys
    }

    /// Whether two handles refer to the same pool.
    pub fn ptr_eq(&self, other: &KeyPool) -> bool {
        Rc::ptr_eq(&self.keys, &other.keys)
    }

    /// Claim a key. Returns `false` if it was already in use.
    pub(crate) fn register(&self, key: FieldKey) -> bool {
        self.keys.borrow_mut().insert(key)
    }

    /// Release a key. Returns `false` if it was not in use.
    pub(crate) fn release(&self, key: &FieldKey) -> bool {
        self.keys.borrow_mut().remove(key)
    }
}

impl fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_release() {
        let pool = KeyPool::new();
        assert!(pool.is_empty());

        assert!(pool.register(FieldKey::new("gate")));
        assert!(!pool.register(FieldKey::new("gate")));
        assert!(pool.contains("gate"));
        assert_eq!(pool.len(), 1);

        assert!(pool.release(&FieldKey::new("gate")));
        assert!(!pool.release(&FieldKey::new("gate")));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let pool = KeyPool::new();
        let sibling = pool.clone();
        assert!(pool.ptr_eq(&sibling));

        sibling.register(FieldKey::new("seat"));
        assert!(pool.contains("seat"));
        assert!(!pool.ptr_eq(&KeyPool::new()));
    }

    #[test]
    fn test_keys_are_sorted() {
        let pool = KeyPool::new();
        for key in ["c", "a", "b"] {
            pool.register(FieldKey::new(key));
        }
        let keys: Vec<_> = pool.keys().into_iter().map(FieldKey::into_inner).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(format!("{:?}", pool), r#"{FieldKey("a"), FieldKey("b"), FieldKey("c")}"#);
    }
}
