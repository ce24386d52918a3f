use std::{collections::HashMap, sync::RwLock};

use crate::{store::clear_first, Change, Editor, PreferenceStore, StoreError, StoredValue};

/// A process-local store backed by a map. Applied batches take effect immediately.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Creates a new empty `MemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.read().expect("RwLock should not be poisoned").len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .keys()
            .cloned()
            .collect();
        keys.sort();
        keys
    }

    fn write_changes(&self, changes: Vec<Change>) {
        let mut values = self.values.write().expect("RwLock should not be poisoned");

        for change in clear_first(changes) {
            match change {
                Change::Put { key, value } => {
                    values.insert(key, value);
                }
                Change::Remove { key } => {
                    values.remove(&key);
                }
                Change::Clear => values.clear(),
            }
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        Ok(self
            .values
            .read()
            .expect("RwLock should not be poisoned")
            .get(key)
            .cloned())
    }

    fn commit_changes(&self, changes: Vec<Change>) -> Result<(), StoreError> {
        self.write_changes(changes);
        Ok(())
    }

    fn apply_changes(&self, changes: Vec<Change>) {
        self.write_changes(changes);
    }

    fn edit(&self) -> Editor<'_> {
        Editor::new(self)
    }

    fn contains(&self, key: &str) -> bool {
        self.values
            .read()
            .expect("RwLock should not be poisoned")
            .contains_key(key)
    }
}
