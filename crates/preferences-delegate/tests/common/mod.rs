#![allow(dead_code)]

use std::collections::BTreeSet;

use preferences_delegate::{preferences, CommitStatus, PreferencesHolder};
use preferences_store::PreferenceStore;

pub fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

preferences! {
    /// Every supported type, non-nullable and nullable, with and without a default.
    pub struct TestPreferences {
        pub string: String,
        pub string_null: Option<String>,
        pub string_default: String = "a".to_owned(),
        pub string_default_null: Option<String> = "b".to_owned(),

        pub int: i32,
        pub int_null: Option<i32>,
        pub int_default: i32 = 1,
        pub int_default_null: Option<i32> = 2,

        pub long: i64,
        pub long_null: Option<i64>,
        pub long_default: i64 = 10,
        pub long_default_null: Option<i64> = 20,

        pub float: f32,
        pub float_null: Option<f32>,
        pub float_default: f32 = 0.1,
        pub float_default_null: Option<f32> = 0.2,

        pub boolean: bool,
        pub boolean_null: Option<bool>,
        pub boolean_default: bool = true,
        pub boolean_default_null: Option<bool> = true,

        pub string_set: BTreeSet<String>,
        pub string_set_null: Option<BTreeSet<String>>,
        pub string_set_default: BTreeSet<String> = set(&["a"]),
        pub string_set_default_null: Option<BTreeSet<String>> = set(&["b"]),
    }
}

pub fn clear(preferences: &TestPreferences) {
    let mut editor = preferences.store().edit();
    editor.clear();
    assert!(editor.commit());
}

pub fn assert_start_values(p: &TestPreferences) {
    assert_eq!(p.string().get(), "");
    assert_eq!(p.string_null().get(), None);
    assert_eq!(p.string_default().get(), "a");
    assert_eq!(p.string_default_null().get().as_deref(), Some("b"));

    assert_eq!(p.int().get(), 0);
    assert_eq!(p.int_null().get(), None);
    assert_eq!(p.int_default().get(), 1);
    assert_eq!(p.int_default_null().get(), Some(2));

    assert_eq!(p.long().get(), 0);
    assert_eq!(p.long_null().get(), None);
    assert_eq!(p.long_default().get(), 10);
    assert_eq!(p.long_default_null().get(), Some(20));

    assert_eq!(p.float().get(), 0.0);
    assert_eq!(p.float_null().get(), None);
    assert_eq!(p.float_default().get(), 0.1);
    assert_eq!(p.float_default_null().get(), Some(0.2));

    assert!(!p.boolean().get());
    assert_eq!(p.boolean_null().get(), None);
    assert!(p.boolean_default().get());
    assert_eq!(p.boolean_default_null().get(), Some(true));

    assert_eq!(p.string_set().get(), set(&[]));
    assert_eq!(p.string_set_null().get(), None);
    assert_eq!(p.string_set_default().get(), set(&["a"]));
    assert_eq!(p.string_set_default_null().get(), Some(set(&["b"])));
}

pub fn write_values(p: &TestPreferences) -> Vec<CommitStatus> {
    vec![
        p.string().set("5".to_owned()),
        p.string_null().set(Some("5a".to_owned())),
        p.string_default().set("5b".to_owned()),
        p.string_default_null().set(Some("5c".to_owned())),
        p.int().set(11),
        p.int_null().set(Some(12)),
        p.int_default().set(13),
        p.int_default_null().set(Some(14)),
        p.long().set(21),
        p.long_null().set(Some(2200)),
        p.long_default().set(23),
        p.long_default_null().set(Some(24)),
        p.float().set(0.31),
        p.float_null().set(Some(0.32)),
        p.float_default().set(0.33),
        p.float_default_null().set(Some(0.34)),
        p.boolean().set(true),
        p.boolean_null().set(Some(true)),
        p.boolean_default().set(true),
        p.boolean_default_null().set(Some(true)),
        p.string_set().set(set(&["a1"])),
        p.string_set_null().set(Some(set(&["a2"]))),
        p.string_set_default().set(set(&["a3"])),
        p.string_set_default_null().set(Some(set(&["a4"]))),
    ]
}

pub fn assert_written_values(p: &TestPreferences) {
    assert_eq!(p.string().get(), "5");
    assert_eq!(p.string_null().get().as_deref(), Some("5a"));
    assert_eq!(p.string_default().get(), "5b");
    assert_eq!(p.string_default_null().get().as_deref(), Some("5c"));

    assert_eq!(p.int().get(), 11);
    assert_eq!(p.int_null().get(), Some(12));
    assert_eq!(p.int_default().get(), 13);
    assert_eq!(p.int_default_null().get(), Some(14));

    assert_eq!(p.long().get(), 21);
    assert_eq!(p.long_null().get(), Some(2200));
    assert_eq!(p.long_default().get(), 23);
    assert_eq!(p.long_default_null().get(), Some(24));

    assert_eq!(p.float().get(), 0.31);
    assert_eq!(p.float_null().get(), Some(0.32));
    assert_eq!(p.float_default().get(), 0.33);
    assert_eq!(p.float_default_null().get(), Some(0.34));

    assert!(p.boolean().get());
    assert_eq!(p.boolean_null().get(), Some(true));
    assert!(p.boolean_default().get());
    assert_eq!(p.boolean_default_null().get(), Some(true));

    assert_eq!(p.string_set().get(), set(&["a1"]));
    assert_eq!(p.string_set_null().get(), Some(set(&["a2"])));
    assert_eq!(p.string_set_default().get(), set(&["a3"]));
    assert_eq!(p.string_set_default_null().get(), Some(set(&["a4"])));
}

pub fn write_nulls(p: &TestPreferences) {
    p.string_null().set(None);
    p.string_default_null().set(None);
    p.int_null().set(None);
    p.int_default_null().set(None);
    p.long_null().set(None);
    p.long_default_null().set(None);
    p.float_null().set(None);
    p.float_default_null().set(None);
    p.boolean_null().set(None);
    p.boolean_default_null().set(None);
    p.string_set_null().set(None);
    p.string_set_default_null().set(None);
}

pub fn assert_null_values(p: &TestPreferences) {
    assert_eq!(p.string_null().get(), None);
    assert_eq!(p.string_default_null().get().as_deref(), Some("b"));
    assert_eq!(p.int_null().get(), None);
    assert_eq!(p.int_default_null().get(), Some(2));
    assert_eq!(p.long_null().get(), None);
    assert_eq!(p.long_default_null().get(), Some(20));
    assert_eq!(p.float_null().get(), None);
    assert_eq!(p.float_default_null().get(), Some(0.2));
    assert_eq!(p.boolean_null().get(), None);
    assert_eq!(p.boolean_default_null().get(), Some(true));
    assert_eq!(p.string_set_null().get(), None);
    assert_eq!(p.string_set_default_null().get(), Some(set(&["b"])));
}

pub fn is_synchronous(p: &TestPreferences) -> bool {
    p.commit_immediately()
}
