//! The frozen guard: a read handle on the owning document's immutability flag.

use std::cell::Cell;
use std::rc::Rc;

use pass_fields_core::DocumentId;

use crate::error::{FieldsError, Result};

/// Handle on a document's frozen flag.
///
/// Cloning shares the flag. The transition is one way: once frozen, a
/// document never accepts field mutations again.
#[derive(Debug, Clone)]
pub struct FrozenGuard {
    document: DocumentId,
    frozen: Rc<Cell<bool>>,
}

impl FrozenGuard {
    /// Create an unfrozen guard for a document.
    pub fn new(document: DocumentId) -> Self {
        Self {
            document,
            frozen: Rc::new(Cell::new(false)),
        }
    }

    /// The document this guard belongs to.
    pub fn document(&self) -> DocumentId {
        self.document
    }

    /// Mark the document frozen.
    pub fn freeze(&self) {
        self.frozen.set(true);
    }

    /// Whether the document is frozen.
    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    /// Fail with [`FieldsError::Frozen`] if the document is frozen.
    pub fn check(&self) -> Result<()> {
        if self.is_frozen() {
            return Err(FieldsError::Frozen(self.document));
        }
        Ok(())
    }
}
