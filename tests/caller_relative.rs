use snapward::{Golden, Mode, Normalization, Outcome, PanicReporter, SoftReporter, call_site};
use std::path::Path;

const MENU: &str = "\x1b[1mWelcome\x1b[0m\n\x1b[7m> first item\x1b[0m\n  second item\n";

#[test]
fn baseline_lives_next_to_the_test_file() {
    let golden = Golden::new(Mode::Compare);
    let path = golden.path_for(&call_site!(), "menu").unwrap();

    assert_eq!(
        path,
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/testdata/snapshots/menu.golden")
    );
    assert!(path.is_file());
}

#[test]
fn committed_baseline_matches() {
    let outcome = Golden::new(Mode::Compare).check(
        &mut PanicReporter,
        &call_site!(),
        "menu",
        MENU,
        Normalization::Visual,
    );
    assert!(matches!(outcome, Outcome::Matched { .. }));
}

#[test]
fn assert_golden_macro_finds_committed_baseline() {
    snapward::assert_golden!("menu", MENU);
}

#[test]
fn soft_reporter_collects_mismatch() {
    let mut reporter = SoftReporter::new();
    let outcome = Golden::new(Mode::Compare).check(
        &mut reporter,
        &call_site!(),
        "menu",
        "Welcome\n> second item\n",
        Normalization::Visual,
    );

    let Outcome::Mismatched { diff, .. } = &outcome else {
        panic!("expected a mismatch, got {outcome:?}");
    };
    assert!(diff.contains("-   2  > first item"));

    let failures = reporter.take_failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].starts_with("snapshot \"menu\" mismatch:"));
}
