use super::*;
use crate::call_site;
use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tempfile::TempDir;

/// Reporter that records what it was told. `fatal` panics with a sentinel
/// so a test can catch it and inspect the message.
#[derive(Debug, Default)]
struct FakeReporter {
    errors: Vec<String>,
    fatal: Option<String>,
}

struct FatalSentinel;

impl Reporter for FakeReporter {
    fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    fn fatal(&mut self, message: String) -> ! {
        self.fatal = Some(message);
        std::panic::panic_any(FatalSentinel);
    }
}

impl FakeReporter {
    fn failed(&self) -> bool {
        !self.errors.is_empty() || self.fatal.is_some()
    }
}

/// Run a check, swallowing the sentinel panic from `FakeReporter::fatal`.
fn run_check(
    golden: &Golden,
    reporter: &mut FakeReporter,
    name: &str,
    text: &str,
    normalization: Normalization,
) -> Option<Outcome> {
    let site = call_site!();
    match catch_unwind(AssertUnwindSafe(|| {
        golden.check(reporter, &site, name, text, normalization)
    })) {
        Ok(outcome) => Some(outcome),
        Err(payload) if payload.is::<FatalSentinel>() => None,
        Err(payload) => std::panic::resume_unwind(payload),
    }
}

fn engine(mode: Mode, dir: &Path) -> Golden {
    Golden::new(mode).with_dir(dir)
}
