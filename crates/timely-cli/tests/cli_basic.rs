//! Basic CLI E2E tests.
//!
//! Each test runs the built binary with HOME pointed at a temporary
//! directory, so config and token files never touch the real profile.
//! Server-backed commands talk to a mockito server via `--api-url`.

use mockito::Server;
use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_timely-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("TIMELY_ENV")
        .env_remove("TIMELY_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

/// Fresh home with the token kept in the file store instead of the keyring.
fn test_home() -> tempfile::TempDir {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["config", "set", "storage.token_in_keyring", "false"],
    );
    assert_eq!(code, 0, "config set failed: {stderr}");
    home
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["--help"]);
    assert_eq!(code, 0);
    for cmd in [
        "auth", "config", "diary", "task", "goal", "habit", "mood", "class", "gratitude",
        "capsule",
    ] {
        assert!(stdout.contains(cmd), "missing subcommand {cmd}");
    }
}

#[test]
fn test_config_get_set() {
    let home = test_home();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "api.base_url"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "http://127.0.0.1:5000/api");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "ui.dark_mode", "true"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_rejects_bad_values() {
    let home = test_home();
    let (_, stderr, code) = run_cli(home.path(), &["config", "set", "api.base_url", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"));

    let (_, _, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_task_add_validates_before_request() {
    let home = test_home();
    let mut server = Server::new();
    let list = server.mock("GET", "/api/tasks").expect(0).create();
    let url = format!("{}/api", server.url());

    let (_, stderr, code) = run_cli(
        home.path(),
        &["--api-url", &url, "task", "add", " ", "--category", "Work", "--due", "2024-08-30"],
    );

    assert_eq!(code, 1);
    assert!(stderr.contains("title"));
    list.assert();
}

#[test]
fn test_login_then_list_habits() {
    let home = test_home();
    let mut server = Server::new();
    let login = server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create();
    let habits = server
        .mock("GET", "/api/habits")
        .match_header("authorization", "Bearer tok")
        .with_status(200)
        .with_body(r#"[{"id":"h1","name":"Exercise","progress":3,"goal":7,"streak":2}]"#)
        .create();
    let url = format!("{}/api", server.url());

    let (_, stderr, code) = run_cli(
        home.path(),
        &["--api-url", &url, "auth", "login", "ana", "--password", "pw"],
    );
    assert_eq!(code, 0, "login failed: {stderr}");

    let (stdout, _, code) = run_cli(home.path(), &["--api-url", &url, "habit", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Exercise"));
    assert!(stdout.contains("3/7"));
    assert!(stdout.contains("streak 2"));

    login.assert();
    habits.assert();
}

#[test]
fn test_class_conflict_needs_resolution() {
    let home = test_home();
    let mut server = Server::new();
    server
        .mock("GET", "/api/classes")
        .with_status(200)
        .with_body(
            r#"[{"id":"c1","name":"Chemistry","location":"Lab","days":["Monday"],"time":"09:00 AM","endTime":"10:00 AM"}]"#,
        )
        .create();
    let post = server.mock("POST", "/api/classes").expect(0).create();
    let url = format!("{}/api", server.url());

    let args = [
        "--api-url", &url, "class", "add", "Biology", "--location", "Room 4", "--days", "Mon",
        "--start", "09:30 AM", "--end", "10:30 AM",
    ];
    let (_, stderr, code) = run_cli(home.path(), &args);
    assert_eq!(code, 1);
    assert!(stderr.contains("Chemistry"));

    let mut with_suggest = args.to_vec();
    with_suggest.extend(["--on-conflict", "suggest"]);
    let (stdout, _, code) = run_cli(home.path(), &with_suggest);
    assert_eq!(code, 0);
    assert!(stdout.contains("Smart Suggestions"));

    post.assert();
}

#[test]
fn test_server_error_exits_nonzero() {
    let home = test_home();
    let mut server = Server::new();
    server.mock("GET", "/api/moods").with_status(500).create();
    let url = format!("{}/api", server.url());

    let (_, stderr, code) = run_cli(home.path(), &["--api-url", &url, "mood", "insights"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("500"));
}
