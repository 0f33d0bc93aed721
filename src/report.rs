//! Test-failure channels.
//!
//! Checks report through two severities: [`Reporter::error`] for failures
//! after which the test may keep going (content mismatch), and
//! [`Reporter::fatal`] for failures that must stop it (missing baseline,
//! I/O, unresolvable call site).

/// Sink for check failures.
pub trait Reporter {
    /// Record a failure; the caller continues.
    fn error(&mut self, message: String);

    /// Abort the current test.
    fn fatal(&mut self, message: String) -> !;
}

/// Panics on every failure, like `assert_eq!`.
#[derive(Debug, Default)]
pub struct PanicReporter;

impl Reporter for PanicReporter {
    fn error(&mut self, message: String) {
        panic!("{message}");
    }

    fn fatal(&mut self, message: String) -> ! {
        panic!("{message}");
    }
}

/// Collects non-fatal failures so a test can run all of its checks before
/// failing once with every message.
///
/// Call [`SoftReporter::finish`] at the end of the test. A reporter that is
/// dropped with pending failures panics as well.
#[derive(Debug, Default)]
pub struct SoftReporter {
    failures: Vec<String>,
}

impl SoftReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Remove and return the collected failures without failing.
    pub fn take_failures(&mut self) -> Vec<String> {
        std::mem::take(&mut self.failures)
    }

    /// Panic with all collected failures, if any.
    pub fn finish(mut self) {
        let failures = std::mem::take(&mut self.failures);
        if !failures.is_empty() {
            panic!("{}", summarize(&failures));
        }
    }
}

impl Reporter for SoftReporter {
    fn error(&mut self, message: String) {
        self.failures.push(message);
    }

    fn fatal(&mut self, message: String) -> ! {
        self.failures.push(message);
        let summary = summarize(&self.failures);
        self.failures.clear();
        panic!("{summary}");
    }
}

impl Drop for SoftReporter {
    fn drop(&mut self) {
        if !self.failures.is_empty() && !std::thread::panicking() {
            let failures = std::mem::take(&mut self.failures);
            panic!("{}", summarize(&failures));
        }
    }
}

fn summarize(failures: &[String]) -> String {
    if let [only] = failures {
        return only.clone();
    }
    let mut out = format!("{} check failures:", failures.len());
    for (i, failure) in failures.iter().enumerate() {
        out.push_str(&format!("\n\n[{}] {}", i + 1, failure));
    }
    out
}
