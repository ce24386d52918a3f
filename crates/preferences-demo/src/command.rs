use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Clone)]
#[command(name = "preferences-demo", version, about = "Typed preferences demo", long_about = None)]
pub struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(
        long,
        global = true,
        help = "SQLite file to store preferences in. Uses an in-memory store when omitted."
    )]
    pub db: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = CommitMode::Sync)]
    pub commit: CommitMode,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(
        long_about = "Reset two preferences, print them, set new values and print them again."
    )]
    Show,

    #[command(long_about = "Time reads, writes and null writes over every supported preference type.")]
    Bench {
        #[arg(long, default_value_t = 1, help = "How many times to run the full walk.")]
        rounds: u32,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitMode {
    /// Block until each write is committed.
    Sync,
    /// Hand writes to the store's background writer.
    Async,
}

impl CommitMode {
    pub fn commit_immediately(self) -> bool {
        self == CommitMode::Sync
    }
}
