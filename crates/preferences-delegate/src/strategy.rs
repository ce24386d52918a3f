//! The six type strategies and default resolution.

use std::{collections::BTreeSet, fmt};

use preferences_store::{PreferenceStore, StoreError, StoredValue, ValueKind};

use crate::PreferenceError;

/// How a preference of one primitive type is read from and written to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeStrategy {
    /// `String`, zero value `""`.
    Text,
    /// `BTreeSet<String>`, zero value `{}`.
    TextSet,
    /// `bool`, zero value `false`.
    Boolean,
    /// `f32`, zero value `0.0`.
    Float,
    /// `i32`, zero value `0`.
    Int,
    /// `i64`, zero value `0`.
    Long,
}

impl TypeStrategy {
    /// The order in which declared type names are matched.
    pub const RESOLUTION_ORDER: [TypeStrategy; 6] = [
        TypeStrategy::Text,
        TypeStrategy::TextSet,
        TypeStrategy::Boolean,
        TypeStrategy::Float,
        TypeStrategy::Int,
        TypeStrategy::Long,
    ];

    /// Resolve a declared type name, case-insensitively, against the aliases of each strategy
    /// in [`RESOLUTION_ORDER`](Self::RESOLUTION_ORDER).
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError::UnsupportedType`] if no strategy accepts the name.
    pub fn resolve(type_name: &str) -> Result<Self, PreferenceError> {
        let normalized = type_name.trim().to_ascii_lowercase();

        Self::RESOLUTION_ORDER
            .into_iter()
            .find(|strategy| strategy.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| PreferenceError::UnsupportedType(type_name.to_owned()))
    }

    /// Type names accepted by [`resolve`](Self::resolve) for this strategy, lowercase.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TypeStrategy::Text => &["text", "string"],
            TypeStrategy::TextSet => &["text_set", "string_set", "set<string>"],
            TypeStrategy::Boolean => &["boolean", "bool"],
            TypeStrategy::Float => &["float", "f32"],
            TypeStrategy::Int => &["int", "i32", "integer"],
            TypeStrategy::Long => &["long", "i64"],
        }
    }

    /// The store kind this strategy reads and writes.
    pub fn value_kind(self) -> ValueKind {
        match self {
            TypeStrategy::Text => ValueKind::String,
            TypeStrategy::TextSet => ValueKind::StringSet,
            TypeStrategy::Boolean => ValueKind::Boolean,
            TypeStrategy::Float => ValueKind::Float,
            TypeStrategy::Int => ValueKind::Int,
            TypeStrategy::Long => ValueKind::Long,
        }
    }

    /// The value a non-nullable preference without a default reads as when nothing usable is
    /// stored.
    pub fn zero(self) -> StoredValue {
        match self {
            TypeStrategy::Text => StoredValue::String(String::new()),
            TypeStrategy::TextSet => StoredValue::StringSet(BTreeSet::new()),
            TypeStrategy::Boolean => StoredValue::Boolean(false),
            TypeStrategy::Float => StoredValue::Float(0.0),
            TypeStrategy::Int => StoredValue::Int(0),
            TypeStrategy::Long => StoredValue::Long(0),
        }
    }

    /// Whether `value` can be written by this strategy.
    pub fn accepts(self, value: &StoredValue) -> bool {
        value.kind() == self.value_kind()
    }

    /// Read `key` through the store's typed getter for this strategy.
    pub fn read(self, store: &dyn PreferenceStore, key: &str) -> Result<StoredValue, StoreError> {
        Ok(match self {
            TypeStrategy::Text => StoredValue::String(store.get_string(key, "")?),
            TypeStrategy::TextSet => {
                StoredValue::StringSet(store.get_string_set(key, &BTreeSet::new())?)
            }
            TypeStrategy::Boolean => StoredValue::Boolean(store.get_boolean(key, false)?),
            TypeStrategy::Float => StoredValue::Float(store.get_float(key, 0.0)?),
            TypeStrategy::Int => StoredValue::Int(store.get_int(key, 0)?),
            TypeStrategy::Long => StoredValue::Long(store.get_long(key, 0)?),
        })
    }

    /// Convert an untyped JSON default into a value of this strategy.
    ///
    /// Integers must fit the strategy's width; floats accept any JSON number.
    pub fn coerce_json(self, value: &serde_json::Value) -> Option<StoredValue> {
        use serde_json::Value;

        match (self, value) {
            (TypeStrategy::Text, Value::String(s)) => Some(StoredValue::String(s.clone())),
            (TypeStrategy::TextSet, Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_owned))
                .collect::<Option<BTreeSet<_>>>()
                .map(StoredValue::StringSet),
            (TypeStrategy::Boolean, Value::Bool(b)) => Some(StoredValue::Boolean(*b)),
            (TypeStrategy::Float, Value::Number(n)) => {
                n.as_f64().map(|f| StoredValue::Float(f as f32))
            }
            (TypeStrategy::Int, Value::Number(n)) => n
                .as_i64()
                .and_then(|i| i32::try_from(i).ok())
                .map(StoredValue::Int),
            (TypeStrategy::Long, Value::Number(n)) => n.as_i64().map(StoredValue::Long),
            _ => None,
        }
    }
}

impl fmt::Display for TypeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.aliases()[0])
    }
}

/// The value a preference reads as when the store has nothing usable for it.
///
/// Precedence is fixed: the configured default, then `None` for a nullable preference, then the
/// strategy's zero value.
pub fn resolve_default(
    strategy: TypeStrategy,
    nullable: bool,
    default: Option<&StoredValue>,
) -> Option<StoredValue> {
    if let Some(default) = default {
        return Some(default.clone());
    }
    if nullable {
        return None;
    }
    Some(strategy.zero())
}

#[cfg(test)]
mod tests {
    use preferences_store::MemoryStore;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(TypeStrategy::resolve("String").unwrap(), TypeStrategy::Text);
        assert_eq!(
            TypeStrategy::resolve("Set<String>").unwrap(),
            TypeStrategy::TextSet
        );
        assert_eq!(TypeStrategy::resolve(" bool ").unwrap(), TypeStrategy::Boolean);
        assert_eq!(TypeStrategy::resolve("f32").unwrap(), TypeStrategy::Float);
        assert_eq!(TypeStrategy::resolve("Integer").unwrap(), TypeStrategy::Int);
        assert_eq!(TypeStrategy::resolve("LONG").unwrap(), TypeStrategy::Long);
    }

    #[test]
    fn test_resolve_unsupported() {
        let err = TypeStrategy::resolve("double").unwrap_err();
        assert!(matches!(err, PreferenceError::UnsupportedType(name) if name == "double"));
    }

    #[test]
    fn test_aliases_are_unique_across_strategies() {
        let mut seen = std::collections::HashSet::new();
        for strategy in TypeStrategy::RESOLUTION_ORDER {
            for alias in strategy.aliases() {
                assert!(seen.insert(*alias), "alias {alias} is ambiguous");
            }
        }
    }

    #[test]
    fn test_default_precedence() {
        let configured = StoredValue::Int(2);

        assert_eq!(
            resolve_default(TypeStrategy::Int, true, Some(&configured)),
            Some(StoredValue::Int(2))
        );
        assert_eq!(
            resolve_default(TypeStrategy::Int, false, Some(&configured)),
            Some(StoredValue::Int(2))
        );
        assert_eq!(resolve_default(TypeStrategy::Int, true, None), None);
        assert_eq!(
            resolve_default(TypeStrategy::Int, false, None),
            Some(StoredValue::Int(0))
        );
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(TypeStrategy::Text.zero(), StoredValue::String(String::new()));
        assert_eq!(
            TypeStrategy::TextSet.zero(),
            StoredValue::StringSet(BTreeSet::new())
        );
        assert_eq!(TypeStrategy::Boolean.zero(), StoredValue::Boolean(false));
        assert_eq!(TypeStrategy::Float.zero(), StoredValue::Float(0.0));
        assert_eq!(TypeStrategy::Int.zero(), StoredValue::Int(0));
        assert_eq!(TypeStrategy::Long.zero(), StoredValue::Long(0));
    }

    #[test]
    fn test_read_uses_matching_getter() {
        let store = MemoryStore::new();
        let mut editor = store.edit();
        editor.put_long("big", 20);
        assert!(editor.commit());

        assert_eq!(
            TypeStrategy::Long.read(&store, "big").unwrap(),
            StoredValue::Long(20)
        );
        assert!(TypeStrategy::Int.read(&store, "big").is_err());
    }

    #[test]
    fn test_coerce_json() {
        assert_eq!(
            TypeStrategy::TextSet.coerce_json(&json!(["b", "a"])),
            Some(StoredValue::StringSet(BTreeSet::from([
                "a".to_owned(),
                "b".to_owned()
            ])))
        );
        assert_eq!(
            TypeStrategy::Float.coerce_json(&json!(0.2)),
            Some(StoredValue::Float(0.2))
        );
        assert_eq!(
            TypeStrategy::Long.coerce_json(&json!(20)),
            Some(StoredValue::Long(20))
        );
        assert_eq!(TypeStrategy::Int.coerce_json(&json!(5_000_000_000i64)), None);
        assert_eq!(TypeStrategy::Int.coerce_json(&json!("2")), None);
        assert_eq!(TypeStrategy::TextSet.coerce_json(&json!(["a", 1])), None);
    }
}
