/// Declare a settings holder with one typed accessor per preference.
///
/// Each field becomes a [`Preference`](crate::Preference) keyed by the field name, plus an
/// accessor method of the same name returning a [`BoundPreference`](crate::BoundPreference).
/// `= value` after the type configures a default (of the primitive type, also for `Option`
/// fields). Field names must be unique, which the compiler enforces. The names `new`, `store`,
/// `commit_immediately`, `store_handle` and `with_commit_immediately` are taken by the holder.
///
/// The generated holder applies writes asynchronously unless built with
/// `with_commit_immediately(true)`.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
///
/// use preferences_delegate::preferences;
/// use preferences_store::MemoryStore;
///
/// preferences! {
///     pub struct MyPreferences {
///         /// Preference "string_param", default `None`.
///         pub string_param: Option<String>,
///         /// Preference "int_param", default `-1`.
///         pub int_param: Option<i32> = -1,
///     }
/// }
///
/// let settings = MyPreferences::new(Arc::new(MemoryStore::new())).with_commit_immediately(true);
///
/// assert_eq!(settings.string_param().get(), None);
/// assert_eq!(settings.int_param().get(), Some(-1));
///
/// settings.string_param().set(Some("123".to_owned()));
/// settings.int_param().set(Some(10));
///
/// assert_eq!(settings.string_param().get().as_deref(), Some("123"));
/// assert_eq!(settings.int_param().get(), Some(10));
/// ```
#[macro_export]
macro_rules! preferences {
    (
        $(#[$meta:meta])*
        $vis:vis struct $holder:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $holder {
            store: ::std::sync::Arc<dyn $crate::preferences_store::PreferenceStore>,
            commit_immediately: bool,
            $( $field: $crate::Preference<$ty>, )*
        }

        impl $holder {
            /// Creates the holder over `store`, applying writes asynchronously.
            $vis fn new(
                store: ::std::sync::Arc<dyn $crate::preferences_store::PreferenceStore>,
            ) -> Self {
                Self {
                    store,
                    commit_immediately: false,
                    $(
                        $field: $crate::Preference::new(::core::stringify!($field))
                            $( .with_default($default) )?,
                    )*
                }
            }

            /// Sets whether writes block until the store has committed them.
            #[allow(dead_code)]
            $vis fn with_commit_immediately(mut self, commit_immediately: bool) -> Self {
                self.commit_immediately = commit_immediately;
                self
            }

            /// The shared store handle.
            #[allow(dead_code)]
            $vis fn store_handle(&self) -> &::std::sync::Arc<dyn $crate::preferences_store::PreferenceStore> {
                &self.store
            }

            $(
                $(#[$field_meta])*
                $field_vis fn $field(&self) -> $crate::BoundPreference<'_, Self, $ty> {
                    self.$field.bind(self)
                }
            )*
        }

        impl $crate::PreferencesHolder for $holder {
            fn store(&self) -> &dyn $crate::preferences_store::PreferenceStore {
                &*self.store
            }

            fn commit_immediately(&self) -> bool {
                self.commit_immediately
            }
        }
    };
}
