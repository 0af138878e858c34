//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, ValueHint};

/// Convert a timetable CSV export into an organisational unit tree
#[derive(Parser, Debug)]
#[command(name = "orgunit-tree")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  orgunit-tree --input events.csv --output tree.json")]
pub struct Cli {
    /// The path where the CSV file can be read
    #[arg(short, long, value_hint = ValueHint::FilePath, required_unless_present = "generate")]
    pub input: Option<PathBuf>,

    /// The path where the JSON file should be written to
    #[arg(short, long, value_hint = ValueHint::FilePath, required_unless_present = "generate")]
    pub output: Option<PathBuf>,

    /// Additional config file (TOML), layered over the global config
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Reject rows with empty key columns instead of absorbing them
    #[arg(long)]
    pub strict: bool,

    /// Do not print the tree outline
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug level (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Print shell completions and exit
    #[arg(long = "generate", value_enum)]
    pub generate: Option<clap_complete::Shell>,
}
