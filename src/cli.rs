mod help_text;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use snapward::Normalization;
use std::path::PathBuf;

/// Record and check golden snapshots of rendered text
#[derive(Parser, Debug)]
#[command(name = "snapward", version, about, long_about = help_text::ROOT_LONG_ABOUT)]
pub struct Cli {
    /// Change to DIRECTORY before doing anything
    #[arg(short = 'C', value_name = "DIRECTORY", global = true)]
    pub directory: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). Takes precedence over RUST_LOG.
    #[arg(short, long, action = ArgAction::Count, global = true, conflicts_with = "log_level")]
    pub verbose: u8,

    /// Set the log level. Takes precedence over RUST_LOG.
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compare a candidate against its baseline
    #[command(long_about = help_text::CHECK_LONG_ABOUT)]
    Check {
        /// Baseline name (stored as <NAME>.golden)
        name: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Write a candidate as the new baseline
    #[command(long_about = help_text::UPDATE_LONG_ABOUT)]
    Update {
        /// Baseline name (stored as <NAME>.golden)
        name: String,

        #[command(flatten)]
        target: TargetArgs,

        /// Only write if the candidate matches this fingerprint from check
        #[arg(long, value_name = "FINGERPRINT")]
        fingerprint: Option<String>,

        /// Show what would be written without writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show a line diff between two files
    Diff {
        /// The expected (baseline) file
        #[arg(value_name = "EXPECTED")]
        expected: PathBuf,

        /// The actual (candidate) file
        #[arg(value_name = "ACTUAL")]
        actual: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Baseline directory (default: from snapward.toml, else testdata/snapshots)
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// How to normalize the candidate (default: from snapward.toml, else visual)
    #[arg(long, value_enum, value_name = "MODE")]
    pub normalization: Option<Normalization>,

    /// Read the candidate from FILE instead of stdin ("-" for stdin)
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_update_with_target_flags() {
        let cli = Cli::try_parse_from([
            "snapward",
            "-C",
            "proj",
            "update",
            "menu",
            "--dir",
            "golden",
            "--normalization",
            "raw",
            "--input",
            "out.txt",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.directory, Some(PathBuf::from("proj")));
        match cli.command {
            Command::Update {
                name,
                target,
                fingerprint,
                dry_run,
            } => {
                assert_eq!(name, "menu");
                assert_eq!(target.dir, Some(PathBuf::from("golden")));
                assert_eq!(target.normalization, Some(Normalization::Raw));
                assert_eq!(target.input, Some(PathBuf::from("out.txt")));
                assert_eq!(fingerprint, None);
                assert!(dry_run);
            }
            other => panic!("Expected Update, got {:?}", other),
        }
    }

    #[test]
    fn verbose_counts_and_conflicts_with_log_level() {
        let cli = Cli::try_parse_from(["snapward", "-vv", "diff", "a", "b"]).unwrap();
        assert_eq!(cli.verbose, 2);

        let err = Cli::try_parse_from(["snapward", "-v", "--log-level", "info", "diff", "a", "b"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
