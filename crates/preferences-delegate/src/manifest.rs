//! Preference declarations loaded from JSON.

use std::{collections::HashSet, sync::Arc};

use preferences_store::PreferenceStore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DynamicPreference, PreferencesHolder};

/// A set of preference declarations sharing one store and commit mode.
///
/// ```json
/// {
///   "commit_immediately": true,
///   "preferences": [
///     { "name": "count", "type": "int", "nullable": true, "default": 2 },
///     { "name": "tags", "type": "string_set" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceManifest {
    #[allow(missing_docs)]
    #[serde(default)]
    pub commit_immediately: bool,
    #[allow(missing_docs)]
    pub preferences: Vec<PreferenceDeclaration>,
}

/// One entry of a [`PreferenceManifest`]. Types and defaults are not validated until the
/// preference is first accessed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDeclaration {
    /// Storage key, unique within the manifest.
    pub name: String,
    /// Type name, see [`TypeStrategy::resolve`](crate::TypeStrategy::resolve).
    #[serde(rename = "type")]
    pub declared_type: String,
    #[allow(missing_docs)]
    #[serde(default)]
    pub nullable: bool,
    #[allow(missing_docs)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl From<PreferenceDeclaration> for DynamicPreference {
    fn from(declaration: PreferenceDeclaration) -> Self {
        let preference = DynamicPreference::new(declaration.name, declaration.declared_type)
            .nullable(declaration.nullable);

        match declaration.default {
            Some(default) => preference.with_json_default(default),
            None => preference,
        }
    }
}

/// Errors that can occur when loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[allow(missing_docs)]
    #[error("Failed to parse preference manifest: {0}")]
    Json(#[from] serde_json::Error),

    /// Two declarations share a name, which would make them share a storage key.
    #[error("Preference '{0}' is declared more than once")]
    DuplicateName(String),
}

impl PreferenceManifest {
    #[allow(missing_docs)]
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a holder for these declarations over `store`.
    pub fn into_holder(
        self,
        store: Arc<dyn PreferenceStore>,
    ) -> Result<DynamicHolder, ManifestError> {
        let mut seen = HashSet::new();
        for declaration in &self.preferences {
            if !seen.insert(declaration.name.as_str()) {
                return Err(ManifestError::DuplicateName(declaration.name.clone()));
            }
        }

        Ok(DynamicHolder {
            store,
            commit_immediately: self.commit_immediately,
            preferences: self.preferences.into_iter().map(Into::into).collect(),
        })
    }
}

/// A settings holder whose preferences were declared by a [`PreferenceManifest`].
pub struct DynamicHolder {
    store: Arc<dyn PreferenceStore>,
    commit_immediately: bool,
    preferences: Vec<DynamicPreference>,
}

impl std::fmt::Debug for DynamicHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicHolder")
            .field("commit_immediately", &self.commit_immediately)
            .field("preferences", &self.preferences)
            .finish()
    }
}

impl DynamicHolder {
    /// Look up a declared preference by name.
    pub fn preference(&self, name: &str) -> Option<&DynamicPreference> {
        self.preferences.iter().find(|p| p.name() == name)
    }

    /// All declared preferences, in declaration order.
    pub fn preferences(&self) -> &[DynamicPreference] {
        &self.preferences
    }
}

impl PreferencesHolder for DynamicHolder {
    fn store(&self) -> &dyn PreferenceStore {
        &*self.store
    }

    fn commit_immediately(&self) -> bool {
        self.commit_immediately
    }
}
