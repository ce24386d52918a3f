use std::collections::BTreeSet;

use tracing::warn;

use crate::{Editor, StoreError, StoredValue, ValueKind};

/// A single pending mutation queued in an [`Editor`].
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// Store `value` under `key`, replacing whatever was there.
    Put {
        #[allow(missing_docs)]
        key: String,
        #[allow(missing_docs)]
        value: StoredValue,
    },
    /// Remove `key` if present.
    Remove {
        #[allow(missing_docs)]
        key: String,
    },
    /// Remove every key. Runs before any other change in the same batch.
    Clear,
}

/// This trait represents a string-keyed store of primitive values, the external collaborator
/// preference accessors delegate to.
///
/// Backends implement the four primitives ([`get`](Self::get), [`commit_changes`],
/// [`apply_changes`] and [`edit`](Self::edit)); the typed getters are provided on top of them.
///
/// [`commit_changes`]: Self::commit_changes
/// [`apply_changes`]: Self::apply_changes
pub trait PreferenceStore: Send + Sync {
    /// Retrieves the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError>;

    /// Persists a batch of changes, blocking until they are durable.
    fn commit_changes(&self, changes: Vec<Change>) -> Result<(), StoreError>;

    /// Hands a batch of changes to the store's background mechanism. Failures are logged by the
    /// store and never reported to the caller.
    fn apply_changes(&self, changes: Vec<Change>);

    /// Starts a new batch of changes against this store.
    fn edit(&self) -> Editor<'_>;

    /// Whether any value is stored under `key`.
    fn contains(&self, key: &str) -> bool {
        match self.get(key) {
            Ok(value) => value.is_some(),
            Err(e) => {
                warn!("Failed to look up preference '{}': {}", key, e);
                false
            }
        }
    }

    #[allow(missing_docs)]
    fn get_string(&self, key: &str, default: &str) -> Result<String, StoreError> {
        match self.get(key)? {
            Some(StoredValue::String(value)) => Ok(value),
            Some(other) => Err(mismatch(key, ValueKind::String, &other)),
            None => Ok(default.to_owned()),
        }
    }

    #[allow(missing_docs)]
    fn get_string_set(
        &self,
        key: &str,
        default: &BTreeSet<String>,
    ) -> Result<BTreeSet<String>, StoreError> {
        match self.get(key)? {
            Some(StoredValue::StringSet(value)) => Ok(value),
            Some(other) => Err(mismatch(key, ValueKind::StringSet, &other)),
            None => Ok(default.clone()),
        }
    }

    #[allow(missing_docs)]
    fn get_boolean(&self, key: &str, default: bool) -> Result<bool, StoreError> {
        match self.get(key)? {
            Some(StoredValue::Boolean(value)) => Ok(value),
            Some(other) => Err(mismatch(key, ValueKind::Boolean, &other)),
            None => Ok(default),
        }
    }

    #[allow(missing_docs)]
    fn get_float(&self, key: &str, default: f32) -> Result<f32, StoreError> {
        match self.get(key)? {
            Some(StoredValue::Float(value)) => Ok(value),
            Some(other) => Err(mismatch(key, ValueKind::Float, &other)),
            None => Ok(default),
        }
    }

    #[allow(missing_docs)]
    fn get_int(&self, key: &str, default: i32) -> Result<i32, StoreError> {
        match self.get(key)? {
            Some(StoredValue::Int(value)) => Ok(value),
            Some(other) => Err(mismatch(key, ValueKind::Int, &other)),
            None => Ok(default),
        }
    }

    #[allow(missing_docs)]
    fn get_long(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        match self.get(key)? {
            Some(StoredValue::Long(value)) => Ok(value),
            Some(other) => Err(mismatch(key, ValueKind::Long, &other)),
            None => Ok(default),
        }
    }
}

fn mismatch(key: &str, expected: ValueKind, found: &StoredValue) -> StoreError {
    StoreError::TypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.kind(),
    }
}

/// Reorders a batch so that a queued [`Change::Clear`] runs first, exactly once.
pub(crate) fn clear_first(changes: Vec<Change>) -> Vec<Change> {
    let clear = changes.iter().any(|change| matches!(change, Change::Clear));
    let rest = changes
        .into_iter()
        .filter(|change| !matches!(change, Change::Clear));

    if clear {
        std::iter::once(Change::Clear).chain(rest).collect()
    } else {
        rest.collect()
    }
}
