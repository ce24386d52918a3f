use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// The primitive kinds a store can hold under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    #[allow(missing_docs)]
    String,
    #[allow(missing_docs)]
    StringSet,
    #[allow(missing_docs)]
    Boolean,
    #[allow(missing_docs)]
    Float,
    #[allow(missing_docs)]
    Int,
    #[allow(missing_docs)]
    Long,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::String => "string",
            ValueKind::StringSet => "string set",
            ValueKind::Boolean => "boolean",
            ValueKind::Float => "float",
            ValueKind::Int => "int",
            ValueKind::Long => "long",
        };
        f.write_str(name)
    }
}

/// A value as held by a [`PreferenceStore`](crate::PreferenceStore).
///
/// Stores are strictly typed: a value put as [`StoredValue::Int`] is only readable through
/// `get_int`, never through `get_long` or `get_float`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StoredValue {
    #[allow(missing_docs)]
    String(String),
    #[allow(missing_docs)]
    StringSet(BTreeSet<String>),
    #[allow(missing_docs)]
    Boolean(bool),
    /// Non-finite values are written as `"NaN"`, `"Infinity"` or `"-Infinity"`.
    #[serde(with = "float_repr")]
    Float(f32),
    #[allow(missing_docs)]
    Int(i32),
    #[allow(missing_docs)]
    Long(i64),
}

/// JSON has no literal for non-finite numbers, so those are written as strings.
mod float_repr {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const NAN: &str = "NaN";
    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";

    pub fn serialize<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_str(NAN)
        } else if *value == f32::INFINITY {
            serializer.serialize_str(INFINITY)
        } else if *value == f32::NEG_INFINITY {
            serializer.serialize_str(NEG_INFINITY)
        } else {
            serializer.serialize_f32(*value)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f32),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value),
            Repr::Text(text) => match text.as_str() {
                NAN => Ok(f32::NAN),
                INFINITY => Ok(f32::INFINITY),
                NEG_INFINITY => Ok(f32::NEG_INFINITY),
                other => Err(D::Error::custom(format!("invalid float '{other}'"))),
            },
        }
    }
}

impl StoredValue {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            StoredValue::String(_) => ValueKind::String,
            StoredValue::StringSet(_) => ValueKind::StringSet,
            StoredValue::Boolean(_) => ValueKind::Boolean,
            StoredValue::Float(_) => ValueKind::Float,
            StoredValue::Int(_) => ValueKind::Int,
            StoredValue::Long(_) => ValueKind::Long,
        }
    }
}

impl From<String> for StoredValue {
    fn from(value: String) -> Self {
        StoredValue::String(value)
    }
}

impl From<&str> for StoredValue {
    fn from(value: &str) -> Self {
        StoredValue::String(value.to_owned())
    }
}

impl From<BTreeSet<String>> for StoredValue {
    fn from(value: BTreeSet<String>) -> Self {
        StoredValue::StringSet(value)
    }
}

impl From<bool> for StoredValue {
    fn from(value: bool) -> Self {
        StoredValue::Boolean(value)
    }
}

impl From<f32> for StoredValue {
    fn from(value: f32) -> Self {
        StoredValue::Float(value)
    }
}

impl From<i32> for StoredValue {
    fn from(value: i32) -> Self {
        StoredValue::Int(value)
    }
}

impl From<i64> for StoredValue {
    fn from(value: i64) -> Self {
        StoredValue::Long(value)
    }
}
