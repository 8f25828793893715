use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Nothing listens on the discard port, so GitHub calls fail fast.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

/// A command isolated from the user's config file and tokens.
fn isolated() -> Command {
    let mut cmd = cargo_bin_cmd!("commit-connect");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/commit-connect-tests")
        .env("COMMIT_CONNECT_GITHUB__API_URL", UNREACHABLE_API)
        .env("COMMIT_CONNECT_GITHUB__API_TIMEOUT_SECONDS", "2")
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("commit-connect");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("commit-connect"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("commit-connect");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("profile"))
        .stdout(predicate::str::contains("repos"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("interpret"))
        .stdout(predicate::str::contains("issues"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = cargo_bin_cmd!("commit-connect");
    cmd.arg("invalid-command").assert().failure().code(2);
}

#[test]
fn test_invalid_issue_state() {
    let mut cmd = cargo_bin_cmd!("commit-connect");
    cmd.args(["issues", "python testing", "--state", "bogus"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_completion_bash() {
    let mut cmd = cargo_bin_cmd!("commit-connect");
    cmd.args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commit-connect"));
}

#[test]
fn test_auth_status_with_unverifiable_token() {
    isolated()
        .args(["auth", "status", "--token", "dummy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flag"));
}

#[test]
fn test_auth_status_json_output() {
    let output = isolated()
        .args(["auth", "status", "--token", "dummy", "--output", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("auth status --output json should produce valid JSON");
    assert_eq!(json["authenticated"], serde_json::Value::Bool(true));
    assert_eq!(json["method"], "flag");
    assert!(json["username"].is_null());
}

#[test]
fn test_search_without_languages_hints_at_flags() {
    isolated()
        .args(["search", "--token", "dummy"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("languages"))
        .stderr(predicate::str::contains("--language"));
}

#[test]
fn test_profile_network_failure_exits_with_error() {
    isolated()
        .args(["profile", "--token", "dummy"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_interpret_without_api_key() {
    isolated()
        .env("COMMIT_CONNECT_AI__PROVIDER", "groq")
        .env_remove("GROQ_API_KEY")
        .args(["interpret", "python testing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GROQ_API_KEY"));
}

#[test]
fn test_unknown_provider_override() {
    isolated()
        .args(["--provider", "nonsense", "interpret", "rust"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown AI provider"));
}

#[test]
fn test_dashboard_requires_terminal() {
    isolated()
        .args(["dashboard", "--token", "dummy"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}
