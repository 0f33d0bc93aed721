mod cli;

use anyhow::Context;
use cli::{Cli, Command, LogLevel, TargetArgs};
use snapward::settings::Settings;
use snapward::util::hashing::fingerprint;
use snapward::{Golden, Mode, Outcome, call_site, unified_diff};
use std::fmt as stdfmt;
use std::io::{IsTerminal, Read, stderr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Event, Level, Subscriber, debug, error, info};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt as tracing_fmt;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;

#[derive(Debug, thiserror::Error)]
#[error("Fingerprint mismatch: expected {expected}, got {actual}")]
struct FingerprintMismatch {
    expected: String,
    actual: String,
}

struct SnapExitCode;

impl SnapExitCode {
    /// Exit code used when a candidate differs from its baseline, or the
    /// baseline is missing.
    fn differs() -> ExitCode {
        ExitCode::from(1)
    }

    /// Exit code used for other errors (I/O errors, invalid arguments, etc.).
    fn any_error() -> ExitCode {
        ExitCode::from(255)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_level);

    // Change working directory if -C was specified
    if let Some(directory) = cli.directory
        && let Err(e) = std::env::set_current_dir(&directory)
    {
        error!(
            "Failed to change directory to {}: {}",
            directory.display(),
            e
        );
        return SnapExitCode::any_error();
    }

    let result: anyhow::Result<ExitCode> = match cli.command {
        Command::Check { name, target } => handle_check(&name, target),
        Command::Update {
            name,
            target,
            fingerprint,
            dry_run,
        } => handle_update(&name, target, fingerprint, dry_run),
        Command::Diff { expected, actual } => handle_diff(&expected, &actual),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(err) => {
            error!("{err:#}");
            SnapExitCode::any_error()
        }
    }
}

struct Target {
    dir: PathBuf,
    normalization: snapward::Normalization,
    text: String,
}

fn resolve_target(target: TargetArgs) -> anyhow::Result<Target> {
    let settings = Settings::load_from_dir(Path::new("."))?;
    let dir = settings.snapshot_dir(target.dir.as_deref());
    let normalization = settings.normalization(target.normalization);
    let text = read_input(target.input.as_deref())?;

    debug!(
        "Baseline directory {}, normalization {:?}",
        dir.display(),
        normalization
    );

    Ok(Target {
        dir,
        normalization,
        text,
    })
}

fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read candidate {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read candidate from stdin")?;
            Ok(text)
        }
    }
}

fn handle_check(name: &str, target: TargetArgs) -> anyhow::Result<ExitCode> {
    let target = resolve_target(target)?;
    let golden = Golden::new(Mode::Compare).with_dir(&target.dir);

    let outcome = golden.compare(&call_site!(), name, &target.text, target.normalization)?;

    match outcome {
        Outcome::Matched { path } | Outcome::Created { path } => {
            info!("Snapshot {} matches {}", name, path.display());
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Missing { path } => {
            error!(
                "No baseline at {}; run 'snapward update {}' to create it",
                path.display(),
                name
            );
            Ok(SnapExitCode::differs())
        }
        Outcome::Mismatched { path, diff } => {
            let fp = fingerprint(name, &target.normalization.apply(&target.text));

            print!("{}", diff);
            println!();
            println!("Fingerprint: {}", fp);

            info!(
                "Snapshot {} differs from {}. Run 'snapward update {} --fingerprint {}' to accept this output.",
                name,
                path.display(),
                name,
                fp
            );
            Ok(SnapExitCode::differs())
        }
    }
}

fn handle_update(
    name: &str,
    target: TargetArgs,
    expected_fingerprint: Option<String>,
    dry_run: bool,
) -> anyhow::Result<ExitCode> {
    let target = resolve_target(target)?;
    let golden = Golden::new(Mode::Update).with_dir(&target.dir);

    let actual = fingerprint(name, &target.normalization.apply(&target.text));
    debug!("Candidate fingerprint for {} is {}", name, actual);

    if let Some(expected) = expected_fingerprint
        && expected != actual
    {
        return Err(FingerprintMismatch { expected, actual }.into());
    }

    if dry_run {
        let path = golden.path_for(&call_site!(), name)?;
        info!("DRY RUN - would write {}", path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = golden.compare(&call_site!(), name, &target.text, target.normalization)?;
    info!("Updated snapshot {} at {}", name, outcome.path().display());

    Ok(ExitCode::SUCCESS)
}

fn handle_diff(expected: &Path, actual: &Path) -> anyhow::Result<ExitCode> {
    let expected_text = std::fs::read_to_string(expected)
        .with_context(|| format!("Failed to read {}", expected.display()))?;
    let actual_text = std::fs::read_to_string(actual)
        .with_context(|| format!("Failed to read {}", actual.display()))?;

    if expected_text == actual_text {
        info!("{} and {} are identical", expected.display(), actual.display());
        return Ok(ExitCode::SUCCESS);
    }

    print!("{}", unified_diff(&expected_text, &actual_text));
    Ok(SnapExitCode::differs())
}

fn init_tracing(verbose: u8, log_level: Option<LogLevel>) {
    let stderr_is_terminal = stderr().is_terminal();
    let formatter = EmojiFormatter { stderr_is_terminal };

    // Explicit flags win over RUST_LOG; RUST_LOG wins over the default.
    let explicit_level = match (log_level, verbose) {
        (Some(level), _) => Some(level.as_directive()),
        (None, 0) => None,
        (None, 1) => Some("info"),
        (None, _) => Some("debug"),
    };

    let filter = match explicit_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    let fmt_layer = tracing_fmt::layer()
        .event_format(formatter)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

struct EmojiFormatter {
    stderr_is_terminal: bool,
}

impl<S, N> FormatEvent<S, N> for EmojiFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> stdfmt::Result {
        if self.stderr_is_terminal {
            match *event.metadata().level() {
                Level::TRACE => write!(writer, "🔬 ")?,
                Level::DEBUG => write!(writer, "🔍 ")?,
                Level::INFO => write!(writer, "ℹ️ ")?,
                Level::WARN => write!(writer, "⚠️  ")?,
                Level::ERROR => write!(writer, "❌️ ")?,
                _ => {}
            }
        } else {
            match *event.metadata().level() {
                Level::TRACE => writer.write_str("TRACE: ")?,
                Level::DEBUG => writer.write_str("DEBUG: ")?,
                Level::INFO => writer.write_str("INFO: ")?,
                Level::WARN => writer.write_str("WARN: ")?,
                Level::ERROR => writer.write_str("ERROR: ")?,
                _ => {}
            }
        }

        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
