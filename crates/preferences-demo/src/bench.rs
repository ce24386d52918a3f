use std::{
    collections::BTreeSet,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use color_eyre::eyre::{ensure, Result};
use preferences_delegate::{preferences, preferences_store::PreferenceStore};
use tracing::{info, warn};

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

preferences! {
    struct BenchPreferences {
        string: String,
        string_null: Option<String>,
        string_default: String = "a".to_owned(),
        string_default_null: Option<String> = "b".to_owned(),

        int: i32,
        int_null: Option<i32>,
        int_default: i32 = 1,
        int_default_null: Option<i32> = 2,

        long: i64,
        long_null: Option<i64>,
        long_default: i64 = 10,
        long_default_null: Option<i64> = 20,

        float: f32,
        float_null: Option<f32>,
        float_default: f32 = 0.1,
        float_default_null: Option<f32> = 0.2,

        boolean: bool,
        boolean_null: Option<bool>,
        boolean_default: bool = true,
        boolean_default_null: Option<bool> = true,

        string_set: BTreeSet<String>,
        string_set_null: Option<BTreeSet<String>>,
        string_set_default: BTreeSet<String> = set(&["a"]),
        string_set_default_null: Option<BTreeSet<String>> = set(&["b"]),
    }
}

fn check<T: PartialEq + Debug>(name: &str, actual: T, expected: T) -> Result<()> {
    ensure!(
        actual == expected,
        "{name}: expected {expected:?}, got {actual:?}"
    );
    Ok(())
}

fn timed(phase: &str, f: impl FnOnce() -> Result<()>) -> Result<Duration> {
    let start = Instant::now();
    f()?;
    let elapsed = start.elapsed();
    info!("{} took {:?}", phase, elapsed);
    Ok(elapsed)
}

fn clear(p: &BenchPreferences) -> Result<()> {
    let mut editor = p.store_handle().edit();
    editor.clear();
    ensure!(editor.commit(), "failed to clear the store");
    Ok(())
}

pub fn run(store: Arc<dyn PreferenceStore>, commit_immediately: bool, rounds: u32) -> Result<()> {
    let p = BenchPreferences::new(store).with_commit_immediately(commit_immediately);
    if !commit_immediately {
        warn!("Writes are applied asynchronously, skipping read-back checks");
    }

    let mut total = Duration::ZERO;
    for round in 1..=rounds {
        clear(&p)?;
        // Batches applied in an earlier round may still land after this clear
        if commit_immediately || round == 1 {
            total += timed("read start values", || read_start_values(&p))?;
        }

        clear(&p)?;
        total += timed("set values", || {
            set_values(&p);
            Ok(())
        })?;
        if commit_immediately {
            total += timed("read values", || read_values(&p))?;
        }

        clear(&p)?;
        total += timed("set null values", || {
            set_null_values(&p);
            Ok(())
        })?;
        if commit_immediately {
            read_null_values(&p)?;
        }

        info!("Round {} of {} passed", round, rounds);
    }

    println!("{rounds} round(s) in {total:?}");
    Ok(())
}

fn read_start_values(p: &BenchPreferences) -> Result<()> {
    check("string", p.string().get(), String::new())?;
    check("string_null", p.string_null().get(), None)?;
    check("string_default", p.string_default().get(), "a".to_owned())?;
    check(
        "string_default_null",
        p.string_default_null().get(),
        Some("b".to_owned()),
    )?;

    check("int", p.int().get(), 0)?;
    check("int_null", p.int_null().get(), None)?;
    check("int_default", p.int_default().get(), 1)?;
    check("int_default_null", p.int_default_null().get(), Some(2))?;

    check("long", p.long().get(), 0)?;
    check("long_null", p.long_null().get(), None)?;
    check("long_default", p.long_default().get(), 10)?;
    check("long_default_null", p.long_default_null().get(), Some(20))?;

    check("float", p.float().get(), 0.0)?;
    check("float_null", p.float_null().get(), None)?;
    check("float_default", p.float_default().get(), 0.1)?;
    check("float_default_null", p.float_default_null().get(), Some(0.2))?;

    check("boolean", p.boolean().get(), false)?;
    check("boolean_null", p.boolean_null().get(), None)?;
    check("boolean_default", p.boolean_default().get(), true)?;
    check("boolean_default_null", p.boolean_default_null().get(), Some(true))?;

    check("string_set", p.string_set().get(), set(&[]))?;
    check("string_set_null", p.string_set_null().get(), None)?;
    check("string_set_default", p.string_set_default().get(), set(&["a"]))?;
    check(
        "string_set_default_null",
        p.string_set_default_null().get(),
        Some(set(&["b"])),
    )
}

fn set_values(p: &BenchPreferences) {
    p.string().set("5".to_owned());
    p.string_null().set(Some("5a".to_owned()));
    p.string_default().set("5b".to_owned());
    p.string_default_null().set(Some("5c".to_owned()));

    p.int().set(11);
    p.int_null().set(Some(12));
    p.int_default().set(13);
    p.int_default_null().set(Some(14));

    p.long().set(21);
    p.long_null().set(Some(2200));
    p.long_default().set(23);
    p.long_default_null().set(Some(24));

    p.float().set(0.31);
    p.float_null().set(Some(0.32));
    p.float_default().set(0.33);
    p.float_default_null().set(Some(0.34));

    p.boolean().set(true);
    p.boolean_null().set(Some(true));
    p.boolean_default().set(true);
    p.boolean_default_null().set(Some(true));

    p.string_set().set(set(&["a1"]));
    p.string_set_null().set(Some(set(&["a2"])));
    p.string_set_default().set(set(&["a3"]));
    p.string_set_default_null().set(Some(set(&["a4"])));
}

fn read_values(p: &BenchPreferences) -> Result<()> {
    check("string", p.string().get(), "5".to_owned())?;
    check("string_null", p.string_null().get(), Some("5a".to_owned()))?;
    check("string_default", p.string_default().get(), "5b".to_owned())?;
    check(
        "string_default_null",
        p.string_default_null().get(),
        Some("5c".to_owned()),
    )?;

    check("int", p.int().get(), 11)?;
    check("int_null", p.int_null().get(), Some(12))?;
    check("int_default", p.int_default().get(), 13)?;
    check("int_default_null", p.int_default_null().get(), Some(14))?;

    check("long", p.long().get(), 21)?;
    check("long_null", p.long_null().get(), Some(2200))?;
    check("long_default", p.long_default().get(), 23)?;
    check("long_default_null", p.long_default_null().get(), Some(24))?;

    check("float", p.float().get(), 0.31)?;
    check("float_null", p.float_null().get(), Some(0.32))?;
    check("float_default", p.float_default().get(), 0.33)?;
    check("float_default_null", p.float_default_null().get(), Some(0.34))?;

    check("boolean", p.boolean().get(), true)?;
    check("boolean_null", p.boolean_null().get(), Some(true))?;
    check("boolean_default", p.boolean_default().get(), true)?;
    check("boolean_default_null", p.boolean_default_null().get(), Some(true))?;

    check("string_set", p.string_set().get(), set(&["a1"]))?;
    check("string_set_null", p.string_set_null().get(), Some(set(&["a2"])))?;
    check("string_set_default", p.string_set_default().get(), set(&["a3"]))?;
    check(
        "string_set_default_null",
        p.string_set_default_null().get(),
        Some(set(&["a4"])),
    )
}

fn set_null_values(p: &BenchPreferences) {
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

fn read_null_values(p: &BenchPreferences) -> Result<()> {
    check("string_null", p.string_null().get(), None)?;
    check(
        "string_default_null",
        p.string_default_null().get(),
        Some("b".to_owned()),
    )?;
    check("int_null", p.int_null().get(), None)?;
    check("int_default_null", p.int_default_null().get(), Some(2))?;
    check("long_null", p.long_null().get(), None)?;
    check("long_default_null", p.long_default_null().get(), Some(20))?;
    check("float_null", p.float_null().get(), None)?;
    check("float_default_null", p.float_default_null().get(), Some(0.2))?;
    check("boolean_null", p.boolean_null().get(), None)?;
    check("boolean_default_null", p.boolean_default_null().get(), Some(true))?;
    check("string_set_null", p.string_set_null().get(), None)?;
    check(
        "string_set_default_null",
        p.string_set_default_null().get(),
        Some(set(&["b"])),
    )
}
