use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const SAMPLE: &str = "\
1.0 -4.0 2.0 0.0
10.0 9.0 -3.0 0.0
100.0 2.5 40.0 12.0
";

fn plot_in<S: AsRef<OsStr>>(dir: &Path, args: &[S]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plot"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch plot binary")
}

fn workdir_with(input: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("input.dat"), input).unwrap();
    dir
}

fn plot_outputs(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("crosscorr_"))
        .collect();
    names.sort();
    names
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn no_arguments_prints_usage_and_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = plot_in::<&str>(dir.path(), &[]);

    assert!(out.status.success());
    assert!(stdout(&out).contains("Usage:"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn extra_arguments_print_usage_and_touch_nothing() {
    let dir = workdir_with(SAMPLE);
    let out = plot_in(dir.path(), &["input.dat", "other.dat"]);

    assert!(out.status.success());
    assert!(stdout(&out).contains("Usage:"));
    assert!(!stdout(&out).contains("read in"));
    assert!(plot_outputs(dir.path()).is_empty());
}

#[test]
fn non_numeric_token_is_fatal() {
    let dir = workdir_with("1.0 2.0 3.0 4.0\n2.0 x 3.0 4.0\n");
    let out = plot_in(dir.path(), &["input.dat"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("'x' is not a number"));
    assert!(plot_outputs(dir.path()).is_empty());
}

#[test]
fn three_column_row_is_fatal() {
    let dir = workdir_with("1.0 2.0 3.0 4.0\n2.0 3.0 4.0\n");
    let out = plot_in(dir.path(), &["input.dat"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("expected 4 columns, found 3"));
    assert!(plot_outputs(dir.path()).is_empty());
}

#[test]
fn missing_input_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = plot_in(dir.path(), &["does-not-exist.dat"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("does-not-exist.dat"));
    assert!(plot_outputs(dir.path()).is_empty());
}

#[cfg(unix)]
#[test]
fn non_unicode_path_is_an_ordinary_load_error() {
    use std::os::unix::ffi::OsStrExt;

    let dir = tempfile::tempdir().unwrap();
    let out = plot_in(dir.path(), &[OsStr::from_bytes(b"\xff.dat")]);

    // a panic would exit with 101
    assert_eq!(out.status.code(), Some(1), "{}", stderr(&out));
    assert!(stderr(&out).contains("loading"));
    assert!(plot_outputs(dir.path()).is_empty());
}

#[test]
fn broken_settings_file_is_fatal() {
    let dir = workdir_with(SAMPLE);
    fs::write(dir.path().join("crosscorr_plot.json"), "{ not json").unwrap();
    let out = plot_in(dir.path(), &["input.dat"]);

    assert!(!out.status.success());
    assert!(stderr(&out).contains("reading plot settings"));
    assert_eq!(plot_outputs(dir.path()), vec!["crosscorr_plot.json"]);
}

#[test]
fn valid_input_writes_two_pngs() {
    let dir = workdir_with(SAMPLE);
    let out = plot_in(dir.path(), &["  input.dat  "]);

    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("input.dat read in"));
    assert_eq!(
        plot_outputs(dir.path()),
        vec!["crosscorr_1.png", "crosscorr_2.png"]
    );
}

#[test]
fn rerun_overwrites_previous_plots() {
    let dir = workdir_with(SAMPLE);
    fs::write(dir.path().join("crosscorr_1.png"), b"stale").unwrap();

    let out = plot_in(dir.path(), &["input.dat"]);
    assert!(out.status.success(), "{}", stderr(&out));
    let out = plot_in(dir.path(), &["input.dat"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let png = fs::read(dir.path().join("crosscorr_1.png")).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn settings_file_switches_to_svg() {
    let dir = workdir_with(SAMPLE);
    fs::write(
        dir.path().join("crosscorr_plot.json"),
        r#"{ "format": "svg", "x_label": "k [h/Mpc]" }"#,
    )
    .unwrap();

    let out = plot_in(dir.path(), &["input.dat"]);
    assert!(out.status.success(), "{}", stderr(&out));

    let svg = fs::read_to_string(dir.path().join("crosscorr_2.svg")).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("k [h/Mpc]"));
}
