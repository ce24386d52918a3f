use std::collections::BTreeSet;

use preferences_store::StoredValue;

use crate::TypeStrategy;

/// A Rust type a [`Preference`](crate::Preference) can be declared with.
///
/// Implemented for the six supported primitives (non-nullable) and for `Option` of each
/// (nullable). Declaring a preference of any other type does not compile.
pub trait PreferenceType: Sized {
    /// The primitive behind this type, also the type of a configured default.
    type Primitive: Into<StoredValue>;

    /// The strategy this type reads and writes with.
    const STRATEGY: TypeStrategy;

    /// Whether an absent key without a default reads as `None` instead of the zero value.
    const NULLABLE: bool;

    /// Build the declared value from the resolved stored value.
    fn from_stored(value: Option<StoredValue>) -> Self;

    /// The value to store, or `None` to remove the key.
    fn into_stored(self) -> Option<StoredValue>;
}

macro_rules! impl_preference_type {
    ($ty:ty, $variant:ident, $strategy:ident, $zero:expr) => {
        impl PreferenceType for $ty {
            type Primitive = $ty;
            const STRATEGY: TypeStrategy = TypeStrategy::$strategy;
            const NULLABLE: bool = false;

            fn from_stored(value: Option<StoredValue>) -> Self {
                match value {
                    Some(StoredValue::$variant(value)) => value,
                    _ => $zero,
                }
            }

            fn into_stored(self) -> Option<StoredValue> {
                Some(StoredValue::$variant(self))
            }
        }

        impl PreferenceType for Option<$ty> {
            type Primitive = $ty;
            const STRATEGY: TypeStrategy = TypeStrategy::$strategy;
            const NULLABLE: bool = true;

            fn from_stored(value: Option<StoredValue>) -> Self {
                match value {
                    Some(StoredValue::$variant(value)) => Some(value),
                    _ => None,
                }
            }

            fn into_stored(self) -> Option<StoredValue> {
                self.map(StoredValue::$variant)
            }
        }
    };
}

impl_preference_type!(String, String, Text, String::new());
impl_preference_type!(BTreeSet<String>, StringSet, TextSet, BTreeSet::new());
impl_preference_type!(bool, Boolean, Boolean, false);
impl_preference_type!(f32, Float, Float, 0.0);
impl_preference_type!(i32, Int, Int, 0);
impl_preference_type!(i64, Long, Long, 0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategies_follow_rust_types() {
        assert_eq!(<String as PreferenceType>::STRATEGY, TypeStrategy::Text);
        assert_eq!(
            <Option<BTreeSet<String>> as PreferenceType>::STRATEGY,
            TypeStrategy::TextSet
        );
        assert_eq!(<bool as PreferenceType>::STRATEGY, TypeStrategy::Boolean);
        assert_eq!(<Option<f32> as PreferenceType>::STRATEGY, TypeStrategy::Float);
        assert_eq!(<i32 as PreferenceType>::STRATEGY, TypeStrategy::Int);
        assert_eq!(<Option<i64> as PreferenceType>::STRATEGY, TypeStrategy::Long);
    }

    #[test]
    fn test_nullability_follows_option() {
        assert!(!<i32 as PreferenceType>::NULLABLE);
        assert!(<Option<i32> as PreferenceType>::NULLABLE);
    }

    #[test]
    fn test_none_is_stored_as_removal() {
        assert_eq!(Option::<String>::None.into_stored(), None);
        assert_eq!(Some(5i32).into_stored(), Some(StoredValue::Int(5)));
        assert_eq!(<i64 as PreferenceType>::from_stored(None), 0);
        assert_eq!(<Option<bool> as PreferenceType>::from_stored(None), None);
    }
}
