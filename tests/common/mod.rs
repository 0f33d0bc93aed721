use assert_cmd::{Command, cargo::cargo_bin_cmd};
use std::fs;
use std::path::Path;
use std::process::Output;

pub fn snapward_cmd(cwd: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("snapward");
    cmd.arg("-C").arg(cwd);
    cmd
}

// Each integration test file is compiled as its own crate, so not every
// crate uses every helper.
#[allow(dead_code)]
/// Run `snapward check NAME` with `candidate` on stdin.
pub fn check_output(cwd: &Path, name: &str, candidate: &str, args: &[&str]) -> Output {
    let mut cmd = snapward_cmd(cwd);
    cmd.arg("check").arg(name).args(args).write_stdin(candidate);
    cmd.output().expect("failed to run `snapward check`")
}

#[allow(dead_code)]
pub fn write_baseline(cwd: &Path, name: &str, content: &str) {
    let dir = cwd.join("testdata/snapshots");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{name}.golden")), content).unwrap();
}

#[allow(dead_code)]
pub fn read_baseline(cwd: &Path, name: &str) -> Option<String> {
    fs::read_to_string(cwd.join("testdata/snapshots").join(format!("{name}.golden"))).ok()
}

#[allow(dead_code)]
pub fn extract_fingerprint(stdout: &[u8]) -> String {
    let output = std::str::from_utf8(stdout).expect("check stdout should be UTF-8");
    output
        .lines()
        .find_map(|line| line.strip_prefix("Fingerprint: "))
        .expect("fingerprint not found in output")
        .to_string()
}
