#![doc = include_str!("../README.md")]

mod configuration;
mod editor;
mod error;
mod memory;
mod sqlite;
mod store;
mod value;

pub use configuration::{open_store, StoreConfiguration};
pub use editor::Editor;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{Change, PreferenceStore};
pub use value::{StoredValue, ValueKind};
