use thiserror::Error;

use crate::ValueKind;

/// An error resulting from operations on a preference store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key exists but holds a value of another kind.
    #[error("Preference '{key}' holds a {found} value, expected {expected}")]
    TypeMismatch {
        /// The key that was read.
        key: String,
        /// The kind the caller asked for.
        expected: ValueKind,
        /// The kind actually stored.
        found: ValueKind,
    },

    /// An internal database error.
    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[allow(missing_docs)]
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The store's background writer is no longer running.
    #[error("Background writer has shut down")]
    Closed,
}
