use std::collections::BTreeSet;

use tracing::error;

use crate::{Change, PreferenceStore, StoredValue};

/// A batch of changes against a [`PreferenceStore`].
///
/// Nothing reaches the store until the batch is finished with [`commit`](Self::commit) or
/// [`apply`](Self::apply). Dropping an editor discards its changes.
#[must_use = "changes are discarded unless the editor is committed or applied"]
pub struct Editor<'a> {
    store: &'a dyn PreferenceStore,
    changes: Vec<Change>,
}

impl std::fmt::Debug for Editor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("changes", &self.changes)
            .finish()
    }
}

impl<'a> Editor<'a> {
    /// Create an empty batch for `store`.
    ///
    /// Typically accessed via [`PreferenceStore::edit()`] instead of calling directly.
    pub fn new(store: &'a dyn PreferenceStore) -> Self {
        Self {
            store,
            changes: Vec::new(),
        }
    }

    /// Queue an already-typed value.
    pub fn put(&mut self, key: impl Into<String>, value: StoredValue) -> &mut Self {
        self.changes.push(Change::Put {
            key: key.into(),
            value,
        });
        self
    }

    #[allow(missing_docs)]
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.put(key, StoredValue::String(value.into()))
    }

    #[allow(missing_docs)]
    pub fn put_string_set(&mut self, key: impl Into<String>, value: BTreeSet<String>) -> &mut Self {
        self.put(key, StoredValue::StringSet(value))
    }

    #[allow(missing_docs)]
    pub fn put_boolean(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.put(key, StoredValue::Boolean(value))
    }

    #[allow(missing_docs)]
    pub fn put_float(&mut self, key: impl Into<String>, value: f32) -> &mut Self {
        self.put(key, StoredValue::Float(value))
    }

    #[allow(missing_docs)]
    pub fn put_int(&mut self, key: impl Into<String>, value: i32) -> &mut Self {
        self.put(key, StoredValue::Int(value))
    }

    #[allow(missing_docs)]
    pub fn put_long(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.put(key, StoredValue::Long(value))
    }

    /// Queue removal of `key`.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.changes.push(Change::Remove { key: key.into() });
        self
    }

    /// Queue removal of every key. The clear runs before all other changes in this batch,
    /// regardless of when it was queued.
    pub fn clear(&mut self) -> &mut Self {
        self.changes.push(Change::Clear);
        self
    }

    /// The changes queued so far, in insertion order.
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Persist the batch synchronously. Returns `false` if the store failed to write it; the
    /// failure is logged and not retried.
    pub fn commit(self) -> bool {
        match self.store.commit_changes(self.changes) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to commit preference changes: {}", e);
                false
            }
        }
    }

    /// Hand the batch to the store's background mechanism without waiting for it.
    pub fn apply(self) {
        self.store.apply_changes(self.changes);
    }
}
