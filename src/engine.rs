use crate::baseline::{self, StoreError};
use crate::diffing::unified_diff;
use crate::location::{CallSite, CallerRelative, DirResolver};
use crate::normalize::Normalization;
use crate::report::Reporter;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Environment variable that switches checks into update mode.
pub const UPDATE_ENV: &str = "UPDATE_SNAPSHOTS";

#[derive(Debug, thiserror::Error)]
pub enum GoldenError {
    #[error("Baseline store error: {0}")]
    Store(#[from] StoreError),
    #[error(
        "Cannot determine the calling source file {file} (manifest dir {manifest_dir}); \
         configure an explicit baseline directory"
    )]
    CallerUnresolved {
        file: &'static str,
        manifest_dir: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Compare candidates against stored baselines.
    #[default]
    Compare,
    /// Overwrite baselines with candidates.
    Update,
}

impl Mode {
    /// Read [`UPDATE_ENV`] from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(UPDATE_ENV).ok().as_deref())
    }

    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("1" | "true" | "yes" | "on") => Mode::Update,
            _ => Mode::Compare,
        }
    }

    pub fn is_update(self) -> bool {
        self == Mode::Update
    }
}

// Seeded from the environment on first use, then only changed through
// set_update_snapshots.
static UPDATE_SNAPSHOTS: LazyLock<AtomicBool> =
    LazyLock::new(|| AtomicBool::new(Mode::from_env().is_update()));

/// Current process-wide update flag.
///
/// Initialized once from `UPDATE_SNAPSHOTS`. Read at every call, so a
/// change made with [`set_update_snapshots`] applies to the next check.
pub fn update_snapshots() -> bool {
    UPDATE_SNAPSHOTS.load(Ordering::Relaxed)
}

/// Override the process-wide update flag.
///
/// Must not race with checks running on other threads.
pub fn set_update_snapshots(update: bool) {
    UPDATE_SNAPSHOTS.store(update, Ordering::Relaxed);
}

/// Process-wide mode, as seen by the `assert_golden!` macros.
pub fn process_mode() -> Mode {
    if update_snapshots() {
        Mode::Update
    } else {
        Mode::Compare
    }
}

/// Result of a single comparison. Every variant carries the baseline path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Update mode: the baseline was (re)written.
    Created { path: PathBuf },
    /// The stored baseline equals the candidate.
    Matched { path: PathBuf },
    /// The stored baseline differs; `diff` explains how.
    Mismatched { path: PathBuf, diff: String },
    /// Compare mode and no baseline exists yet.
    Missing { path: PathBuf },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Created { path }
            | Outcome::Matched { path }
            | Outcome::Mismatched { path, .. }
            | Outcome::Missing { path } => path,
        }
    }
}

/// Golden snapshot engine.
///
/// Holds the mode and where baselines live. Each call is independent: it
/// normalizes the candidate, resolves the path, then either writes or
/// reads and compares.
#[derive(Debug, Clone)]
pub struct Golden<R = CallerRelative> {
    mode: Mode,
    dir: Option<PathBuf>,
    resolver: R,
}

impl Golden<CallerRelative> {
    pub fn new(mode: Mode) -> Self {
        Golden {
            mode,
            dir: None,
            resolver: CallerRelative,
        }
    }

    /// Engine using the process-wide mode at the time of construction.
    pub fn from_process() -> Self {
        Self::new(process_mode())
    }
}

impl Default for Golden<CallerRelative> {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl<R: DirResolver> Golden<R> {
    /// Store every baseline in `dir` instead of resolving it per call site.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Swap the resolver used when no explicit directory is set.
    pub fn with_resolver<R2: DirResolver>(self, resolver: R2) -> Golden<R2> {
        Golden {
            mode: self.mode,
            dir: self.dir,
            resolver,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Resolve the baseline path for `name` as seen from `site`.
    pub fn path_for(&self, site: &CallSite, name: &str) -> Result<PathBuf, GoldenError> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => self
                .resolver
                .resolve(site)
                .ok_or(GoldenError::CallerUnresolved {
                    file: site.file(),
                    manifest_dir: site.manifest_dir(),
                })?,
        };
        Ok(baseline::baseline_path(&dir, name))
    }

    /// Run the record/compare state machine and return the outcome.
    ///
    /// A missing baseline and a mismatch are outcomes, not errors; only I/O
    /// and call-site resolution fail.
    pub fn compare(
        &self,
        site: &CallSite,
        name: &str,
        text: &str,
        normalization: Normalization,
    ) -> Result<Outcome, GoldenError> {
        let candidate = normalization.apply(text);
        let path = self.path_for(site, name)?;

        if self.mode.is_update() {
            baseline::write(&path, &candidate)?;
            return Ok(Outcome::Created { path });
        }

        let Some(expected) = baseline::read(&path)? else {
            return Ok(Outcome::Missing { path });
        };

        if expected == *candidate {
            debug!("Snapshot {:?} matches {}", name, path.display());
            return Ok(Outcome::Matched { path });
        }

        debug!("Snapshot {:?} differs from {}", name, path.display());
        let diff = unified_diff(&expected, &candidate);
        Ok(Outcome::Mismatched { path, diff })
    }

    /// Compare and report failures through `reporter`.
    ///
    /// Mismatches are reported with [`Reporter::error`]; missing baselines
    /// and errors with [`Reporter::fatal`].
    pub fn check(
        &self,
        reporter: &mut impl Reporter,
        site: &CallSite,
        name: &str,
        text: &str,
        normalization: Normalization,
    ) -> Outcome {
        let outcome = match self.compare(site, name, text, normalization) {
            Ok(outcome) => outcome,
            Err(e) => reporter.fatal(format!("snapshot {:?}: {}", name, e)),
        };

        match &outcome {
            Outcome::Missing { path } => reporter.fatal(missing_message(name, path)),
            Outcome::Mismatched { diff, .. } => {
                reporter.error(format!("snapshot {:?} mismatch:\n{}", name, diff));
            }
            Outcome::Created { .. } | Outcome::Matched { .. } => {}
        }

        outcome
    }
}

fn missing_message(name: &str, path: &Path) -> String {
    format!(
        "snapshot {:?}: golden file not found at {}\nRe-run in update mode ({}=1) to create it.",
        name,
        path.display(),
        UPDATE_ENV
    )
}

/// Check `text` against the golden file `name`, using the process-wide
/// mode and the calling file's `testdata/snapshots` directory.
///
/// Control sequences are stripped first. By default a mismatch or a
/// missing baseline panics. Pass `reporter = &mut r` to route failures to
/// another [`Reporter`](crate::Reporter), such as a
/// [`SoftReporter`](crate::SoftReporter) that lets the test keep going
/// after a mismatch.
///
/// ```ignore
/// snapward::assert_golden!("list_view", &rendered);
/// snapward::assert_golden!("list_view", &rendered, dir = tmp.path());
/// snapward::assert_golden!("list_view", &rendered, reporter = &mut soft);
/// ```
#[macro_export]
macro_rules! assert_golden {
    ($($args:tt)*) => {
        $crate::__golden_check!($crate::Normalization::Visual; $($args)*)
    };
}

/// Like [`assert_golden!`] but compares the text byte-for-byte, control
/// sequences included.
#[macro_export]
macro_rules! assert_golden_raw {
    ($($args:tt)*) => {
        $crate::__golden_check!($crate::Normalization::Raw; $($args)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __golden_check {
    ($norm:expr; $name:expr, $text:expr $(,)?) => {
        $crate::__golden_check!($norm; $name, $text, reporter = &mut $crate::PanicReporter)
    };
    ($norm:expr; $name:expr, $text:expr, dir = $dir:expr $(,)?) => {
        $crate::__golden_check!(
            $norm; $name, $text, dir = $dir, reporter = &mut $crate::PanicReporter
        )
    };
    ($norm:expr; $name:expr, $text:expr, reporter = $reporter:expr $(,)?) => {
        $crate::Golden::from_process().check(
            $reporter,
            &$crate::call_site!(),
            $name,
            $text,
            $norm,
        )
    };
    ($norm:expr; $name:expr, $text:expr, dir = $dir:expr, reporter = $reporter:expr $(,)?) => {
        $crate::Golden::from_process().with_dir($dir).check(
            $reporter,
            &$crate::call_site!(),
            $name,
            $text,
            $norm,
        )
    };
}

#[cfg(test)]
mod tests;
