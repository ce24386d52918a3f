use std::{path::PathBuf, sync::Arc};

use crate::{MemoryStore, PreferenceStore, SqliteStore, StoreError};

/// Configuration for the store backing a preferences holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfiguration {
    /// Process-local store, lost when the last handle is dropped.
    Memory,

    /// SQLite store persisted to disk.
    Sqlite {
        /// The file path to the SQLite database. Separate preference namespaces should be
        /// stored in separate files.
        file_path: PathBuf,
    },
}

/// Open the store described by `configuration`.
pub fn open_store(
    configuration: StoreConfiguration,
) -> Result<Arc<dyn PreferenceStore>, StoreError> {
    Ok(match configuration {
        StoreConfiguration::Memory => Arc::new(MemoryStore::new()),
        StoreConfiguration::Sqlite { file_path } => Arc::new(SqliteStore::open(file_path)?),
    })
}
