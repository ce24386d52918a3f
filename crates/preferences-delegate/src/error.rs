use thiserror::Error;

use crate::TypeStrategy;

/// Errors that can occur when accessing a declared preference.
///
/// Missing keys and stored values of the wrong type are never errors; they resolve to the
/// preference's default.
#[derive(Debug, Error)]
pub enum PreferenceError {
    /// The declared type matches none of the supported type strategies.
    #[error("Unsupported preference type '{0}'")]
    UnsupportedType(String),

    /// A value written to a dynamic preference does not match its resolved type.
    #[error("Value written to preference '{key}' is not a {expected}")]
    ValueMismatch {
        #[allow(missing_docs)]
        key: String,
        #[allow(missing_docs)]
        expected: TypeStrategy,
    },

    /// The declared default cannot be represented as the resolved type.
    #[error("Default for preference '{key}' is not a valid {expected}")]
    InvalidDefault {
        #[allow(missing_docs)]
        key: String,
        #[allow(missing_docs)]
        expected: TypeStrategy,
    },
}
