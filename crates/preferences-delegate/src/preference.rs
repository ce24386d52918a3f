//! Statically typed preference accessors.

use std::{borrow::Cow, fmt, marker::PhantomData};

use preferences_store::StoredValue;

use crate::{
    holder::{read_value, write_value},
    CommitStatus, PreferenceType, PreferencesHolder, TypeStrategy,
};

/// A typed accessor for one preference, keyed by its name.
///
/// The declared Rust type picks both the type strategy and the nullability: `Preference<i32>`
/// reads `0` when nothing is stored, `Preference<Option<i32>>` reads `None`. A configured
/// default takes precedence over both.
///
/// Every read queries the store again; nothing but the declaration is kept here.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
///
/// use preferences_delegate::{Preference, PreferencesHolder};
/// use preferences_store::{MemoryStore, PreferenceStore};
///
/// struct Settings {
///     store: Arc<MemoryStore>,
///     count: Preference<Option<i32>>,
/// }
///
/// impl PreferencesHolder for Settings {
///     fn store(&self) -> &dyn PreferenceStore {
///         &*self.store
///     }
/// }
///
/// let settings = Settings {
///     store: Arc::new(MemoryStore::new()),
///     count: Preference::new("count").with_default(2),
/// };
///
/// assert_eq!(settings.count.get(&settings), Some(2));
/// settings.count.set(&settings, Some(5));
/// assert_eq!(settings.count.get(&settings), Some(5));
/// settings.count.set(&settings, None);
/// assert_eq!(settings.count.get(&settings), Some(2));
/// ```
pub struct Preference<T: PreferenceType> {
    name: Cow<'static, str>,
    default: Option<StoredValue>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: PreferenceType> fmt::Debug for Preference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Preference")
            .field("name", &self.name)
            .field("strategy", &T::STRATEGY)
            .field("nullable", &T::NULLABLE)
            .field("default", &self.default)
            .finish()
    }
}

impl<T: PreferenceType> Preference<T> {
    /// Declare a preference stored under `name`.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            default: None,
            _marker: PhantomData,
        }
    }

    /// Value to read when the key is absent or holds another type.
    pub fn with_default(mut self, default: T::Primitive) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The storage key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The strategy picked by `T`.
    pub fn strategy(&self) -> TypeStrategy {
        T::STRATEGY
    }

    /// Whether `T` is an `Option`.
    pub fn is_nullable(&self) -> bool {
        T::NULLABLE
    }

    /// The configured default, if any.
    pub fn default_value(&self) -> Option<&StoredValue> {
        self.default.as_ref()
    }

    /// Read the current value from the holder's store.
    pub fn get<H: PreferencesHolder + ?Sized>(&self, holder: &H) -> T {
        T::from_stored(read_value(
            holder.store(),
            &self.name,
            T::STRATEGY,
            T::NULLABLE,
            self.default.as_ref(),
        ))
    }

    /// Store `value`, or remove the key when a nullable preference is set to `None`.
    pub fn set<H: PreferencesHolder + ?Sized>(&self, holder: &H, value: T) -> CommitStatus {
        write_value(holder, &self.name, value.into_stored())
    }

    /// Pair this preference with a holder so it can be read and written without passing the
    /// holder each time.
    pub fn bind<'a, H: PreferencesHolder + ?Sized>(
        &'a self,
        holder: &'a H,
    ) -> BoundPreference<'a, H, T> {
        BoundPreference {
            holder,
            preference: self,
        }
    }
}

/// A [`Preference`] borrowed together with the holder it belongs to.
pub struct BoundPreference<'a, H: ?Sized, T: PreferenceType> {
    holder: &'a H,
    preference: &'a Preference<T>,
}

impl<H: PreferencesHolder + ?Sized, T: PreferenceType> BoundPreference<'_, H, T> {
    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        self.preference.name()
    }

    /// See [`Preference::get`].
    pub fn get(&self) -> T {
        self.preference.get(self.holder)
    }

    /// See [`Preference::set`].
    pub fn set(&self, value: T) -> CommitStatus {
        self.preference.set(self.holder, value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use preferences_store::{Change, Editor, MemoryStore, PreferenceStore, StoreError};

    use super::*;

    struct Holder {
        store: MemoryStore,
        commit_immediately: bool,
    }

    impl Holder {
        fn new(commit_immediately: bool) -> Self {
            Self {
                store: MemoryStore::new(),
                commit_immediately,
            }
        }
    }

    impl PreferencesHolder for Holder {
        fn store(&self) -> &dyn PreferenceStore {
            &self.store
        }

        fn commit_immediately(&self) -> bool {
            self.commit_immediately
        }
    }

    #[test]
    fn test_nullable_int_with_default_scenario() {
        let holder = Holder::new(true);
        let count = Preference::<Option<i32>>::new("count").with_default(2);

        assert_eq!(count.get(&holder), Some(2));
        assert_eq!(count.set(&holder, Some(5)), CommitStatus::Committed);
        assert_eq!(count.get(&holder), Some(5));
        assert_eq!(count.set(&holder, None), CommitStatus::Committed);
        assert_eq!(count.get(&holder), Some(2));
        assert!(!holder.store.contains("count"));
    }

    #[test]
    fn test_text_set_scenario() {
        let holder = Holder::new(true);
        let tags = Preference::<BTreeSet<String>>::new("tags");

        assert!(tags.get(&holder).is_empty());
        tags.set(&holder, BTreeSet::from(["y".to_owned(), "x".to_owned()]));
        assert_eq!(
            tags.get(&holder),
            BTreeSet::from(["x".to_owned(), "y".to_owned()])
        );
    }

    #[test]
    fn test_incompatible_stored_value_reads_default() {
        let holder = Holder::new(true);
        let mut editor = holder.store.edit();
        editor.put_string("count", "not a number");
        assert!(editor.commit());

        let with_default = Preference::<i32>::new("count").with_default(7);
        let without_default = Preference::<i32>::new("count");
        let nullable = Preference::<Option<i32>>::new("count");

        assert_eq!(with_default.get(&holder), 7);
        assert_eq!(without_default.get(&holder), 0);
        assert_eq!(nullable.get(&holder), None);
    }

    #[test]
    fn test_deferred_commit_mode_applies() {
        let holder = Holder::new(false);
        let flag = Preference::<bool>::new("flag");

        assert_eq!(flag.set(&holder, true), CommitStatus::Applied);
        assert!(flag.get(&holder));
    }

    #[test]
    fn test_bound_preference() {
        let holder = Holder::new(true);
        let name = Preference::<String>::new("name").with_default("a".to_owned());
        let bound = name.bind(&holder);

        assert_eq!(bound.name(), "name");
        assert_eq!(bound.get(), "a");
        bound.set("b".to_owned());
        assert_eq!(bound.get(), "b");
    }

    struct FailingStore;

    impl PreferenceStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<StoredValue>, StoreError> {
            Ok(None)
        }

        fn commit_changes(&self, _changes: Vec<Change>) -> Result<(), StoreError> {
            Err(StoreError::Closed)
        }

        fn apply_changes(&self, _changes: Vec<Change>) {}

        fn edit(&self) -> Editor<'_> {
            Editor::new(self)
        }
    }

    struct FailingHolder(FailingStore);

    impl PreferencesHolder for FailingHolder {
        fn store(&self) -> &dyn PreferenceStore {
            &self.0
        }

        fn commit_immediately(&self) -> bool {
            true
        }
    }

    #[test]
    fn test_failed_commit_is_reported() {
        let holder = FailingHolder(FailingStore);
        let ratio = Preference::<f32>::new("ratio");

        let status = ratio.set(&holder, 0.5);
        assert_eq!(status, CommitStatus::Failed);
        assert!(status.is_failed());
        assert_eq!(ratio.get(&holder), 0.0);
    }
}
