use crate::domain::NumericParsing;
use clap::Parser;
use std::path::PathBuf;

/// Command-line options for the `fitlog` binary.
#[derive(Debug, Parser)]
#[command(name = "fitlog", version, about = "Terminal workout recorder")]
pub struct Cli {
    /// Reject duration/calorie input that is not entirely digits
    #[arg(long)]
    pub strict_numbers: bool,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the session's workouts as JSON after quitting
    #[arg(long)]
    pub dump_json: bool,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    pub numeric_parsing: NumericParsing,
    pub log_file: Option<PathBuf>,
    pub log_level: &'static str,
    pub dump_json: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            numeric_parsing: NumericParsing::Lenient,
            log_file: None,
            log_level: "info",
            dump_json: false,
        }
    }
}

impl From<Cli> for RecorderConfig {
    fn from(cli: Cli) -> Self {
        Self {
            numeric_parsing: if cli.strict_numbers {
                NumericParsing::Strict
            } else {
                NumericParsing::Lenient
            },
            log_file: cli.log_file,
            log_level: if cli.verbose { "debug" } else { "info" },
            dump_json: cli.dump_json,
        }
    }
}
