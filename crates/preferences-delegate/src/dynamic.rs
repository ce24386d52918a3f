//! Preferences whose type is only known by name at runtime.

use std::sync::OnceLock;

use preferences_store::StoredValue;

use crate::{
    holder::{read_value, write_value},
    CommitStatus, PreferenceError, PreferencesHolder, TypeStrategy,
};

#[derive(Debug, Clone)]
enum DeclaredDefault {
    Typed(StoredValue),
    Json(serde_json::Value),
}

/// A preference declared with a type name instead of a Rust type.
///
/// The type name is resolved against the supported strategies on first access and the result
/// is cached for the lifetime of the preference. An unsupported name is not rejected at
/// declaration; every access fails with [`PreferenceError::UnsupportedType`] instead.
#[derive(Debug)]
pub struct DynamicPreference {
    name: String,
    declared_type: String,
    nullable: bool,
    default: Option<DeclaredDefault>,
    strategy: OnceLock<TypeStrategy>,
}

impl DynamicPreference {
    /// Declare a non-nullable preference stored under `name` with the type called
    /// `declared_type`.
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            nullable: false,
            default: None,
            strategy: OnceLock::new(),
        }
    }

    /// Whether an absent key without a default reads as `None`.
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Typed default. Checked against the declared type on first access.
    pub fn with_default(mut self, default: impl Into<StoredValue>) -> Self {
        self.default = Some(DeclaredDefault::Typed(default.into()));
        self
    }

    /// Untyped default, converted with [`TypeStrategy::coerce_json`] on first access.
    pub fn with_json_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(DeclaredDefault::Json(default));
        self
    }

    /// The storage key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type name as declared, before resolution.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Whether this preference was declared nullable.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// The resolved strategy, resolving and caching it on first call.
    pub fn strategy(&self) -> Result<TypeStrategy, PreferenceError> {
        if let Some(strategy) = self.strategy.get() {
            return Ok(*strategy);
        }

        let strategy = TypeStrategy::resolve(&self.declared_type)?;
        Ok(*self.strategy.get_or_init(|| strategy))
    }

    fn default_for(&self, strategy: TypeStrategy) -> Result<Option<StoredValue>, PreferenceError> {
        let default = match &self.default {
            None => return Ok(None),
            Some(DeclaredDefault::Typed(value)) => {
                Some(value.clone()).filter(|value| strategy.accepts(value))
            }
            Some(DeclaredDefault::Json(value)) => strategy.coerce_json(value),
        };

        default.map(Some).ok_or_else(|| PreferenceError::InvalidDefault {
            key: self.name.clone(),
            expected: strategy,
        })
    }

    /// Read the current value from the holder's store. `None` is only returned for nullable
    /// preferences without a default.
    ///
    /// # Errors
    ///
    /// Fails if the declared type is unsupported or the declared default does not fit it.
    pub fn get<H: PreferencesHolder + ?Sized>(
        &self,
        holder: &H,
    ) -> Result<Option<StoredValue>, PreferenceError> {
        let strategy = self.strategy()?;
        let default = self.default_for(strategy)?;

        Ok(read_value(
            holder.store(),
            &self.name,
            strategy,
            self.nullable,
            default.as_ref(),
        ))
    }

    /// Store `value`, or remove the key for `None`. Removing a non-nullable preference resets it
    /// to its default.
    ///
    /// # Errors
    ///
    /// Fails if the declared type is unsupported or `value` is of another type. Nothing is
    /// written in either case.
    pub fn set<H: PreferencesHolder + ?Sized>(
        &self,
        holder: &H,
        value: Option<StoredValue>,
    ) -> Result<CommitStatus, PreferenceError> {
        let strategy = self.strategy()?;

        if let Some(value) = &value {
            if !strategy.accepts(value) {
                return Err(PreferenceError::ValueMismatch {
                    key: self.name.clone(),
                    expected: strategy,
                });
            }
        }

        Ok(write_value(holder, &self.name, value))
    }
}
