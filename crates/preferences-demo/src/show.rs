use std::{fmt::Display, sync::Arc};

use color_eyre::eyre::Result;
use preferences_delegate::{preferences, preferences_store::PreferenceStore};

preferences! {
    struct MyPreferences {
        /// Preference "string_param", default `None`.
        string_param: Option<String>,
        /// Preference "int_param", default `-1`.
        int_param: Option<i32> = -1,
    }
}

pub fn run(store: Arc<dyn PreferenceStore>, commit_immediately: bool) -> Result<()> {
    let settings = MyPreferences::new(store).with_commit_immediately(commit_immediately);

    // Reset to the declared defaults
    settings.string_param().set(None);
    settings.int_param().set(None);
    print_values(&settings);

    settings.string_param().set(Some("123".to_owned()));
    settings.int_param().set(Some(10));
    print_values(&settings);

    Ok(())
}

fn print_values(settings: &MyPreferences) {
    println!("string_param = {}", or_null(settings.string_param().get()));
    println!("int_param = {}\n", or_null(settings.int_param().get()));
}

fn or_null<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "null".to_owned(), |value| value.to_string())
}
