use preferences_store::{Editor, PreferenceStore, StoredValue};
use tracing::warn;

use crate::{strategy::resolve_default, TypeStrategy};

/// The capability every settings holder provides to its preferences: a store handle and a
/// commit mode.
pub trait PreferencesHolder {
    /// The store preferences on this holder read from and write to.
    fn store(&self) -> &dyn PreferenceStore;

    /// Whether writes block until the store reports them durable. When `false`, writes are
    /// handed to the store's background mechanism and may not be visible to an immediate read.
    fn commit_immediately(&self) -> bool {
        false
    }
}

/// Outcome of writing a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitStatus {
    /// The store committed the change synchronously.
    Committed,
    /// The synchronous commit failed. The change was not retried.
    Failed,
    /// The change was handed off asynchronously; its outcome is not observed.
    Applied,
}

impl CommitStatus {
    /// Whether a synchronous commit was attempted and failed.
    pub fn is_failed(self) -> bool {
        self == CommitStatus::Failed
    }
}

/// Read `key` through `strategy`, falling back to the default when the key is absent or holds
/// something the strategy cannot read.
pub(crate) fn read_value(
    store: &dyn PreferenceStore,
    key: &str,
    strategy: TypeStrategy,
    nullable: bool,
    default: Option<&StoredValue>,
) -> Option<StoredValue> {
    if !store.contains(key) {
        return resolve_default(strategy, nullable, default);
    }

    match strategy.read(store, key) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Falling back to default for preference '{}': {}", key, e);
            resolve_default(strategy, nullable, default)
        }
    }
}

/// Queue the write of `value` (or the removal of `key` for `None`) and finish the batch using
/// the holder's commit mode.
pub(crate) fn write_value<H: PreferencesHolder + ?Sized>(
    holder: &H,
    key: &str,
    value: Option<StoredValue>,
) -> CommitStatus {
    let mut editor = holder.store().edit();
    match value {
        Some(value) => editor.put(key, value),
        None => editor.remove(key),
    };
    finish(holder, editor)
}

fn finish<H: PreferencesHolder + ?Sized>(holder: &H, editor: Editor<'_>) -> CommitStatus {
    if holder.commit_immediately() {
        if editor.commit() {
            CommitStatus::Committed
        } else {
            CommitStatus::Failed
        }
    } else {
        editor.apply();
        CommitStatus::Applied
    }
}
