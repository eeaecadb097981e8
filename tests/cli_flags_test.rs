//! CLI flag contract tests
//!
//! Runs the built binary to verify that `score`, `batch`, `init` and
//! `config show` honour their flags and exit codes.

use std::path::Path;
use std::process::{Command, Stdio};

fn fishlinic_bin() -> String {
    env!("CARGO_BIN_EXE_fishlinic").to_string()
}

const FISHLINIC_ENV: &[&str] = &[
    "FISHLINIC_CONFIG",
    "FISHLINIC_HOST",
    "FISHLINIC_PORT",
    "FISHLINIC_INPUT_POLICY",
    "RUST_LOG",
];

/// Command rooted in `dir` that cannot see the developer's env or user config
fn isolated_command(dir: &Path) -> Command {
    let mut cmd = Command::new(fishlinic_bin());
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir);
    for var in FISHLINIC_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// Run the binary in `dir` with a clean config environment
fn run_in(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = isolated_command(dir)
        .args(args)
        .output()
        .expect("Failed to run fishlinic");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

fn score_json(dir: &Path, extra: &[&str]) -> serde_json::Value {
    let mut args = vec!["score", "--format", "json"];
    args.extend(extra);
    let (code, stdout, stderr) = run_in(dir, &args);
    assert_eq!(code, 0, "score failed: {stderr}");
    serde_json::from_str(&stdout).expect("Invalid JSON")
}

const FEED: &str = r#"{"timestamp": "2025-03-01T10:00:00Z", "pH": 7.2, "temp_c": 25.0, "do_mg_l": 6.2, "fish_health": 82}
{"timestamp": "2025-03-01T10:00:03Z", "pH": 6.2, "temp_c": 19.0, "do_mg_l": 4.0}
"#;

// ============================================================================
// score
// ============================================================================

#[test]
fn test_score_ideal_reading() {
    let dir = tempfile::tempdir().unwrap();
    let v = score_json(dir.path(), &["--ph", "7.0", "--temp", "25", "--do", "7.0"]);
    assert_eq!(v["quality_ai"], 9.7);
    assert_eq!(v["status_ai"], "good");
}

#[test]
fn test_score_alert_reading() {
    let dir = tempfile::tempdir().unwrap();
    let v = score_json(dir.path(), &["--ph", "5.0", "--temp", "35", "--do", "2.0"]);
    assert_eq!(v["status_ai"], "alert");
}

#[test]
fn test_score_clamps_out_of_domain_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let raw = score_json(dir.path(), &["--ph", "20", "--temp", "25", "--do", "-5"]);
    let bounded = score_json(dir.path(), &["--ph", "14", "--temp", "25", "--do", "0"]);
    assert_eq!(raw, bounded);
}

#[test]
fn test_score_reject_policy_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("fishlinic.toml"),
        "[scoring]\ninput_policy = \"reject\"\n",
    )
    .unwrap();
    let (code, _, stderr) = run_in(
        dir.path(),
        &["score", "--ph", "20", "--temp", "25", "--do", "7"],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("outside the valid range"), "stderr: {stderr}");
}

#[test]
fn test_score_explain_json_includes_breakdown() {
    let dir = tempfile::tempdir().unwrap();
    let v = score_json(
        dir.path(),
        &["--ph", "6.2", "--temp", "19", "--do", "4", "--explain"],
    );
    assert_eq!(v["status_ai"], "average");
    assert!(v["breakdown"]["sub_scores"].is_object());
}

#[test]
fn test_score_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &["score", "--ph", "7.0", "--temp", "25", "--do", "7.0"],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("9.7/10"));
    assert!(stdout.contains("good"));
}

#[test]
fn test_format_default_from_config() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("fishlinic.toml"),
        "[defaults]\nformat = \"json\"\n",
    )
    .unwrap();
    let (code, stdout, _) = run_in(
        dir.path(),
        &["score", "--ph", "7.0", "--temp", "25", "--do", "7.0"],
    );
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["status_ai"], "good");
}

// ============================================================================
// batch
// ============================================================================

#[test]
fn test_batch_from_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("feed.jsonl"), FEED).unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["batch", "feed.jsonl", "--format", "json"]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["summary"]["total"], 2);
    assert_eq!(v["summary"]["good"], 1);
    assert_eq!(v["summary"]["average"], 1);
}

#[test]
fn test_batch_fail_on_average_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("feed.jsonl"), FEED).unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["batch", "feed.jsonl", "--fail-on", "average"]);
    assert_eq!(code, 1, "--fail-on average should exit 1: {stderr}");
}

#[test]
fn test_batch_fail_on_alert_exits_zero_without_alerts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("feed.jsonl"), FEED).unwrap();
    let (code, _, _) = run_in(dir.path(), &["batch", "feed.jsonl", "--fail-on", "alert"]);
    assert_eq!(code, 0);
}

#[test]
fn test_batch_from_stdin() {
    use std::io::Write;
    let dir = tempfile::tempdir().unwrap();
    let mut child = isolated_command(dir.path())
        .args(["batch", "-", "--format", "json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn fishlinic");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(FEED.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    assert_eq!(v["records"].as_array().unwrap().len(), 2);
}

#[test]
fn test_batch_malformed_line_reports_line_number() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("bad.jsonl"),
        "{\"pH\": 7.0, \"temp_c\": 25.0, \"do_mg_l\": 7.0}\nnot json\n",
    )
    .unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["batch", "bad.jsonl"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("line 2"), "stderr: {stderr}");
}

#[test]
fn test_batch_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_in(dir.path(), &["batch", "missing.jsonl"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("missing.jsonl"));
}

// ============================================================================
// init / config
// ============================================================================

#[test]
fn test_init_writes_config_once() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_in(dir.path(), &["init"]);
    assert_eq!(code, 0);
    let path = dir.path().join("fishlinic.toml");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("input_policy"));

    std::fs::write(&path, "[server]\nport = 9999\n").unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["init"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Already initialized"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "[server]\nport = 9999\n"
    );
}

#[test]
fn test_config_show_reports_source() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("fishlinic.toml"), "[server]\nport = 9123\n").unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["config", "show"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("fishlinic.toml"));
    assert!(stdout.contains("9123"));
}

#[test]
fn test_config_show_ignores_outer_environment() {
    let dir = tempfile::tempdir().unwrap();
    let output = isolated_command(dir.path())
        .args(["config", "show"])
        .output()
        .expect("Failed to run fishlinic");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("built-in defaults"), "got: {stdout}");
    assert!(stdout.contains("port = 8000"), "got: {stdout}");
}

#[cfg(target_os = "linux")]
#[test]
fn test_user_config_dir_is_the_isolated_one() {
    let dir = tempfile::tempdir().unwrap();
    let user_dir = dir.path().join(".config").join("fishlinic");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(user_dir.join("config.toml"), "[server]\nport = 9555\n").unwrap();

    let work = dir.path().join("work");
    std::fs::create_dir(&work).unwrap();
    let output = isolated_command(dir.path())
        .current_dir(&work)
        .args(["config", "show"])
        .output()
        .expect("Failed to run fishlinic");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("9555"), "got: {stdout}");
}

#[test]
fn test_explicit_config_missing_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_in(
        dir.path(),
        &["--config", "nope.toml", "score", "--ph", "7", "--temp", "25", "--do", "7"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_in(dir.path(), &["version"]);
    assert_eq!(code, 0);
    assert!(stdout.starts_with("fishlinic "));
}
