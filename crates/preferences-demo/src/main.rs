#![doc = include_str!("../README.md")]

use clap::{CommandFactory, Parser};
use color_eyre::eyre::Result;
use preferences_store::{open_store, StoreConfiguration};
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter,
};

use crate::command::{Cli, Commands};

mod bench;
mod command;
mod show;

fn main() -> Result<()> {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(
            option_env!("RUST_LOG")
                .unwrap_or("info")
                .parse()
                .expect("should provide valid log level at compile time."),
        )
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    color_eyre::install()?;

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        cmd.print_help()?;
        return Ok(());
    };

    let configuration = match cli.db {
        Some(file_path) => StoreConfiguration::Sqlite { file_path },
        None => StoreConfiguration::Memory,
    };
    let store = open_store(configuration)?;
    let commit_immediately = cli.commit.commit_immediately();

    match command {
        Commands::Show => show::run(store, commit_immediately),
        Commands::Bench { rounds } => bench::run(store, commit_immediately, rounds),
    }
}
