//! Line-level diff used to explain snapshot mismatches.
//!
//! The alignment is a plain longest-common-subsequence over lines. Output is
//! meant for humans reading a failed test, so it favours being stable and
//! exact over being minimal in any fancier sense.

use std::fmt::Write;

/// One aligned line of a diff.
///
/// Line numbers are 1-based. Context lines carry the expected-side position,
/// removals are numbered against the expected text and additions against the
/// actual text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffLine<'a> {
    Context { line: usize, text: &'a str },
    Removed { line: usize, text: &'a str },
    Added { line: usize, text: &'a str },
}

impl DiffLine<'_> {
    pub fn marker(&self) -> char {
        match self {
            DiffLine::Context { .. } => ' ',
            DiffLine::Removed { .. } => '-',
            DiffLine::Added { .. } => '+',
        }
    }
}

/// Split text the same way baselines are modeled: on `\n`, with a trailing
/// separator producing a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Align `expected` against `actual`, top to bottom.
pub fn diff_lines<'a>(expected: &'a str, actual: &'a str) -> Vec<DiffLine<'a>> {
    let exp = split_lines(expected);
    let act = split_lines(actual);
    let lcs = lcs_table(&exp, &act);

    let (mut i, mut j) = (exp.len(), act.len());
    let mut lines = Vec::with_capacity(i.max(j));

    // Walk back from the bottom-right corner; ties prefer consuming an
    // actual-side line so removals end up before additions once reversed.
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && exp[i - 1] == act[j - 1] {
            lines.push(DiffLine::Context {
                line: i,
                text: exp[i - 1],
            });
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            lines.push(DiffLine::Added {
                line: j,
                text: act[j - 1],
            });
            j -= 1;
        } else {
            lines.push(DiffLine::Removed {
                line: i,
                text: exp[i - 1],
            });
            i -= 1;
        }
    }

    lines.reverse();
    lines
}

/// Render a diff with a `--- expected` / `+++ actual` header and one
/// `<marker><line:4>  <text>` row per aligned line.
pub fn unified_diff(expected: &str, actual: &str) -> String {
    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");

    for line in diff_lines(expected, actual) {
        let (number, text) = match line {
            DiffLine::Context { line, text }
            | DiffLine::Removed { line, text }
            | DiffLine::Added { line, text } => (line, text),
        };
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}{:4}  {}", line.marker(), number, text);
    }

    out
}

/// Classic LCS length table: `table[i][j]` is the LCS length of `a[..i]`
/// and `b[..j]`.
fn lcs_table(a: &[&str], b: &[&str]) -> Vec<Vec<usize>> {
    let (m, n) = (a.len(), b.len());
    let mut table = vec![vec![0usize; n + 1]; m + 1];

    for i in 1..=m {
        for j in 1..=n {
            table[i][j] = if a[i - 1] == b[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    table
}
