use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Fresh working directory for one test, unique per label and process.
fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("cmdmatch-integ-{label}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

fn cmdmatch(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cmdmatch"));
    cmd.current_dir(dir)
        .env_remove("CMDMATCH_SCHEMA")
        .env_remove("CMDMATCH_WIDTH")
        .env_remove("RUST_LOG");
    cmd
}

fn assert_success(out: &Output, what: &str) {
    assert!(
        out.status.success(),
        "{what} failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
}

fn init_project(label: &str) -> PathBuf {
    let dir = scratch_dir(label);
    let out = cmdmatch(&dir)
        .arg("init")
        .arg(&dir)
        .output()
        .expect("failed to run cmdmatch init");
    assert_success(&out, "cmdmatch init");
    dir
}

#[test]
fn help_works() {
    let dir = scratch_dir("help");
    let out = cmdmatch(&dir)
        .arg("--help")
        .output()
        .expect("failed to run cmdmatch --help");
    assert_success(&out, "cmdmatch --help");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("cmdmatch") && stdout.contains("init") && stdout.contains("parse"),
        "unexpected help output:\n{stdout}"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn init_creates_schema_once() {
    let dir = init_project("init");
    assert!(dir.join("cmdmatch.json").is_file(), "cmdmatch.json not created");

    let out = cmdmatch(&dir)
        .arg("init")
        .arg(&dir)
        .output()
        .expect("failed to run cmdmatch init");
    assert!(!out.status.success(), "second init should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("already exists"), "stderr:\n{stderr}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn check_lists_commands() {
    let dir = init_project("check");
    let out = cmdmatch(&dir)
        .arg("check")
        .output()
        .expect("failed to run cmdmatch check");
    assert_success(&out, "cmdmatch check");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("2 option(s), 2 argument(s) (1 optional)"),
        "stderr:\n{stderr}"
    );
    assert!(stderr.contains("OK: 1 command(s) defined"), "stderr:\n{stderr}");
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_prints_matches_as_json() {
    let dir = init_project("parse");
    let out = cmdmatch(&dir)
        .args(["parse", "--", "-a", "5", "--verbose", "12"])
        .output()
        .expect("failed to run cmdmatch parse");
    assert_success(&out, "cmdmatch parse");

    let json: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("parse output is not JSON");
    assert_eq!(json["options"][0]["name"], "-a");
    assert_eq!(json["options"][0]["value"], 5);
    assert_eq!(json["options"][1]["name"], "-v");
    assert_eq!(json["options"][1]["token"], "--verbose");
    assert_eq!(json["arguments"][0]["name"], "PID");
    assert_eq!(json["arguments"][0]["value"], 12);
    assert_eq!(json["arguments"][1]["value"], -400);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn parse_failure_exits_with_error() {
    let dir = init_project("parse-error");
    let out = cmdmatch(&dir)
        .args(["parse", "--", "1", "2", "3"])
        .output()
        .expect("failed to run cmdmatch parse");
    assert!(!out.status.success(), "parse should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Too many command line arguments. Expected max: 2 but was: 3."),
        "stderr:\n{stderr}"
    );
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn schema_flag_and_missing_schema() {
    let dir = init_project("schema-flag");
    let moved = dir.join("other.json");
    fs::rename(dir.join("cmdmatch.json"), &moved).expect("failed to move schema");

    let out = cmdmatch(&dir)
        .arg("check")
        .output()
        .expect("failed to run cmdmatch check");
    assert!(!out.status.success(), "check without a schema should fail");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("schema not found"), "stderr:\n{stderr}");

    let out = cmdmatch(&dir)
        .arg("--schema")
        .arg(&moved)
        .arg("check")
        .output()
        .expect("failed to run cmdmatch check");
    assert_success(&out, "cmdmatch --schema other.json check");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn usage_renders_schema_help() {
    let dir = init_project("usage");
    let out = cmdmatch(&dir)
        .args(["usage", "--width", "100"])
        .output()
        .expect("failed to run cmdmatch usage");
    assert_success(&out, "cmdmatch usage");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[OPTIONS] <PID> [LEVEL]"), "stdout:\n{stdout}");
    assert!(stdout.contains("-a, --all <VALUE>"), "stdout:\n{stdout}");
    assert!(stdout.contains("[default: -400]"), "stdout:\n{stdout}");
    let _ = fs::remove_dir_all(&dir);
}
