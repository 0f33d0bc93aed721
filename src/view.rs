//! Assertions on rendered views.
//!
//! Every helper strips control sequences before looking at the text and
//! reports through [`Reporter::error`], so a test can make several of them
//! and see every failure at once.

use crate::normalize::strip_ansi;
use crate::report::Reporter;
use regex::Regex;

/// Split a view into lines, strip control sequences from each and drop
/// trailing empty lines.
pub fn lines(view: &str) -> Vec<String> {
    let mut lines: Vec<String> = view
        .split('\n')
        .map(|line| strip_ansi(line).into_owned())
        .collect();

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    lines
}

pub fn contains(reporter: &mut impl Reporter, view: &str, text: &str) {
    let stripped = strip_ansi(view);
    if !stripped.contains(text) {
        reporter.error(format!(
            "view does not contain {:?}\n  stripped view: {:?}",
            text, stripped
        ));
    }
}

pub fn not_contains(reporter: &mut impl Reporter, view: &str, text: &str) {
    let stripped = strip_ansi(view);
    if stripped.contains(text) {
        reporter.error(format!(
            "view unexpectedly contains {:?}\n  stripped view: {:?}",
            text, stripped
        ));
    }
}

/// Assert that line `index` (0-based, see [`lines`]) contains `text`.
pub fn line_contains(reporter: &mut impl Reporter, view: &str, index: usize, text: &str) {
    let lines = lines(view);
    match lines.get(index) {
        None => reporter.error(out_of_range("line_contains", index, lines.len())),
        Some(line) if !line.contains(text) => reporter.error(format!(
            "line_contains: line {} = {:?}, want it to contain {:?}",
            index, line, text
        )),
        Some(_) => {}
    }
}

/// Assert that line `index` (0-based, see [`lines`]) equals `text` exactly.
pub fn line_equals(reporter: &mut impl Reporter, view: &str, index: usize, text: &str) {
    let lines = lines(view);
    match lines.get(index) {
        None => reporter.error(out_of_range("line_equals", index, lines.len())),
        Some(line) if line != text => reporter.error(format!(
            "line_equals: line {} = {:?}, want {:?}",
            index, line, text
        )),
        Some(_) => {}
    }
}

/// Assert that the stripped view matches `pattern`. An invalid pattern is
/// reported as a failure.
pub fn matches_regex(reporter: &mut impl Reporter, view: &str, pattern: &str) {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => {
            reporter.error(format!("invalid regex {:?}: {}", pattern, e));
            return;
        }
    };

    let stripped = strip_ansi(view);
    if !re.is_match(&stripped) {
        reporter.error(format!(
            "view does not match pattern {:?}\n  stripped view: {:?}",
            pattern, stripped
        ));
    }
}

fn out_of_range(check: &str, index: usize, len: usize) -> String {
    format!(
        "{}: line index {} out of range (view has {} lines)",
        check, index, len
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::SoftReporter;

    const VIEW: &str = "\x1b[1mTitle\x1b[0m\n\x1b[32m> item one\x1b[0m\n  item two\n\n";

    fn failures(check: impl FnOnce(&mut SoftReporter)) -> Vec<String> {
        let mut reporter = SoftReporter::new();
        check(&mut reporter);
        reporter.take_failures()
    }

    #[test]
    fn test_lines_strips_and_trims_trailing_empty() {
        assert_eq!(lines(VIEW), vec!["Title", "> item one", "  item two"]);
    }

    #[test]
    fn test_lines_keeps_inner_empty_lines() {
        assert_eq!(lines("a\n\nb\n"), vec!["a", "", "b"]);
        assert!(lines("").is_empty());
        assert!(lines("\n\n").is_empty());
    }

    #[test]
    fn test_contains_ignores_styling() {
        assert!(failures(|r| contains(r, VIEW, "Title\n> item")).is_empty());
        let f = failures(|r| contains(r, VIEW, "missing"));
        assert_eq!(f.len(), 1);
        assert!(f[0].contains("\"missing\""));
        assert!(!f[0].contains('\x1b'));
    }

    #[test]
    fn test_not_contains() {
        assert!(failures(|r| not_contains(r, VIEW, "item three")).is_empty());
        // Styling codes themselves are not part of the visible text.
        assert!(failures(|r| not_contains(r, VIEW, "[32m")).is_empty());
        assert_eq!(failures(|r| not_contains(r, VIEW, "item two")).len(), 1);
    }

    #[test]
    fn test_line_contains() {
        assert!(failures(|r| line_contains(r, VIEW, 1, "item one")).is_empty());
        let f = failures(|r| line_contains(r, VIEW, 2, "item one"));
        assert_eq!(f.len(), 1);
        assert!(f[0].contains("line 2"));
    }

    #[test]
    fn test_line_equals() {
        assert!(failures(|r| line_equals(r, VIEW, 0, "Title")).is_empty());
        assert_eq!(failures(|r| line_equals(r, VIEW, 0, "Title ")).len(), 1);
    }

    #[test]
    fn test_line_index_out_of_range_is_a_failure() {
        let f = failures(|r| line_equals(r, VIEW, 3, ""));
        assert_eq!(f, vec!["line_equals: line index 3 out of range (view has 3 lines)"]);
        assert_eq!(failures(|r| line_contains(r, VIEW, 99, "x")).len(), 1);
    }

    #[test]
    fn test_matches_regex() {
        assert!(failures(|r| matches_regex(r, VIEW, r"(?m)^> item \w+$")).is_empty());
        assert_eq!(failures(|r| matches_regex(r, VIEW, r"^item")).len(), 1);
    }

    #[test]
    fn test_invalid_regex_is_a_failure() {
        let f = failures(|r| matches_regex(r, VIEW, "(unclosed"));
        assert_eq!(f.len(), 1);
        assert!(f[0].starts_with("invalid regex"));
    }
}
