pub(super) const ROOT_LONG_ABOUT: &str = "\
Record and check golden snapshots of rendered text

Snapward keeps a trusted copy (a baseline) of some program output and tells you,
line by line, when new output stops matching it. Baselines are plain UTF-8 files
named <NAME>.golden with no header; the whole file is the comparand.

CORE CONCEPTS:

  Baselines:
    One file per name in the baseline directory (testdata/snapshots unless
    configured). Names are sanitized: anything other than letters, digits,
    '.', '_' and '-' becomes '_'.

  Normalization:
    - visual (default): terminal escape sequences (colours, cursor movement,
      hyperlinks) are stripped, leaving what a viewer would see
    - raw: the text is stored and compared byte for byte

  Operations:
    - check: compare a candidate against its baseline
    - update: write a candidate as the new baseline
    - diff: show a line diff between any two files

TYPICAL WORKFLOW:

  1. Record a baseline:
     $ my-tool --render menu | snapward update menu

  2. Later, check new output against it:
     $ my-tool --render menu | snapward check menu

  3. If it changed on purpose, accept exactly what you reviewed:
     $ my-tool --render menu | snapward update menu --fingerprint <FP>

GLOBAL OPTIONS:

  -C <DIRECTORY>
    Change to directory before operating (like git -C or make -C).

CONFIGURATION:

  An optional snapward.toml in the working directory sets defaults:

    [metadata]
    version = 1

    [snapshots]
    dir = \"tests/testdata/snapshots\"
    normalization = \"visual\"

  Command line flags take precedence over the file.

EXIT STATUS:

  0    the candidate matches (check, diff) or was written (update)
  1    the candidate differs, or no baseline exists (check, diff)
  255  any other error (I/O, invalid configuration, fingerprint mismatch)

IN TESTS:

  The snapward library provides assert_golden! and assert_golden_raw! for Rust
  tests. Run them with UPDATE_SNAPSHOTS=1 to (re)generate baselines.
";

pub(super) const CHECK_LONG_ABOUT: &str = "\
Compare a candidate against its baseline

Reads the candidate from --input or stdin, normalizes it, and compares it with
<DIR>/<NAME>.golden.

On a match, exits 0 without output. On a mismatch, prints a line diff to stdout
(- lines only in the baseline, + lines only in the candidate, each with its line
number) followed by a fingerprint of the candidate, and exits 1. Pass that
fingerprint to 'snapward update --fingerprint' to accept exactly this output.

If no baseline exists, exits 1 and suggests 'snapward update'.
";

pub(super) const UPDATE_LONG_ABOUT: &str = "\
Write a candidate as the new baseline

Reads the candidate from --input or stdin, normalizes it, and writes it to
<DIR>/<NAME>.golden, creating directories as needed. An existing baseline is
replaced in full.

With --fingerprint, nothing is written unless the candidate has exactly that
fingerprint, so output that changed after review is never recorded.
";
