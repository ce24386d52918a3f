use std::{
    path::Path,
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, error};

use crate::{store::clear_first, Change, Editor, PreferenceStore, StoreError, StoredValue};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS preferences (key TEXT PRIMARY KEY, value TEXT NOT NULL);";

/// A store persisted in a SQLite file, one row per key.
///
/// Values are stored as JSON encoded [`StoredValue`]s. Committed batches run in a single
/// transaction on the caller's thread. Applied batches are queued to a background writer thread
/// and become visible once it has processed them; dropping the store waits for the queue to
/// drain.
pub struct SqliteStore {
    connection: Arc<Mutex<Connection>>,
    writer: Option<mpsc::Sender<Vec<Change>>>,
    handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish()
    }
}

impl SqliteStore {
    /// Open (or create) the store at `file_path`, creating missing parent directories.
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let file_path = file_path.as_ref();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        debug!("Opening preference store at {}", file_path.display());
        Self::initialize(Connection::open(file_path)?)
    }

    /// Open a store that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(connection: Connection) -> Result<Self, StoreError> {
        // Set WAL mode for better concurrency. In-memory databases report "memory" instead.
        connection.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        connection.execute_batch(SCHEMA)?;

        let connection = Arc::new(Mutex::new(connection));
        let (writer, queue) = mpsc::channel::<Vec<Change>>();

        let background = Arc::clone(&connection);
        let handle = thread::Builder::new()
            .name("preferences-writer".to_owned())
            .spawn(move || {
                for changes in queue {
                    let mut conn = background.lock().expect("Mutex should not be poisoned");
                    if let Err(e) = write_changes(&mut conn, changes) {
                        error!("Failed to apply preference changes: {}", e);
                    }
                }
            })?;

        Ok(SqliteStore {
            connection,
            writer: Some(writer),
            handle: Some(handle),
        })
    }
}

fn write_changes(conn: &mut Connection, changes: Vec<Change>) -> Result<(), StoreError> {
    let transaction = conn.transaction()?;

    for change in clear_first(changes) {
        match change {
            Change::Put { key, value } => {
                let value = serde_json::to_string(&value)?;
                transaction.execute(
                    "INSERT OR REPLACE INTO preferences (key, value) VALUES (?1, ?2)",
                    params![key, value],
                )?;
            }
            Change::Remove { key } => {
                transaction.execute("DELETE FROM preferences WHERE key = ?1", params![key])?;
            }
            Change::Clear => {
                transaction.execute("DELETE FROM preferences", [])?;
            }
        }
    }

    transaction.commit()?;
    Ok(())
}

impl PreferenceStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<StoredValue>, StoreError> {
        let conn = self.connection.lock().expect("Mutex should not be poisoned");
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match value {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    fn commit_changes(&self, changes: Vec<Change>) -> Result<(), StoreError> {
        let mut conn = self.connection.lock().expect("Mutex should not be poisoned");
        write_changes(&mut conn, changes)
    }

    fn apply_changes(&self, changes: Vec<Change>) {
        let sent = match &self.writer {
            Some(writer) => writer.send(changes).map_err(|_| StoreError::Closed),
            None => Err(StoreError::Closed),
        };

        if let Err(e) = sent {
            error!("Dropping applied preference changes: {}", e);
        }
    }

    fn edit(&self) -> Editor<'_> {
        Editor::new(self)
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        // Closing the channel ends the writer loop once the queued batches are written.
        self.writer.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Preference writer thread panicked");
            }
        }
    }
}
