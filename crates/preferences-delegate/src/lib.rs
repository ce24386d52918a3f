#![doc = include_str!("../README.md")]

mod dynamic;
mod error;
mod holder;
mod macros;
pub mod manifest;
mod preference;
pub mod strategy;
mod types;

pub use dynamic::DynamicPreference;
pub use error::PreferenceError;
pub use holder::{CommitStatus, PreferencesHolder};
pub use manifest::{DynamicHolder, ManifestError, PreferenceManifest};
pub use preference::{BoundPreference, Preference};
pub use strategy::{resolve_default, TypeStrategy};
pub use types::PreferenceType;

/// The store contract preferences are read from and written to.
pub use preferences_store;
