// tests/cli_dispatch_test.rs

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::{TempDir, tempdir};

// Runs the binary against an isolated home directory with retries disabled.
fn main_command(home: &TempDir) -> Command {
    let config_dir = home.path().join(".canvas-grabber");
    let config_file = config_dir.join("config.json");
    if !config_file.exists() {
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(&config_file, json!({ "network": { "max_retries": 0 } }).to_string()).unwrap();
    }

    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("HOME", home.path())
        .env("USERPROFILE", home.path())
        .env_remove("CANVAS_API_TOKEN");
    cmd
}

// --- Argument handling ---

#[test]
fn test_help_flag() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--course-id"))
        .stdout(predicate::str::contains("--choices"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn test_list_mode_requires_course_id() {
    let home = tempdir().unwrap();
    main_command(&home)
        .arg("--list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--course-id"));
}

#[test]
fn test_missing_token_exits_with_code_1() {
    let home = tempdir().unwrap();
    main_command(&home)
        .args(["--domain", "http://127.0.0.1:9", "--course-id", "1", "--check"])
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No API token provided"));
}

// --- Dispatch against a mock Canvas ---

#[test]
fn test_check_maps_401_and_404_to_exit_codes() {
    let mut server = mockito::Server::new();
    let _unauth = server.mock("GET", "/api/v1/courses/11").with_status(401).create();
    let _missing = server.mock("GET", "/api/v1/courses/12").with_status(404).create();
    let home = tempdir().unwrap();

    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t", "--course-id", "11", "--check"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Authentication failed"));

    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t", "--course-id", "12", "--check"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Resource not found"));
}

#[test]
fn test_listing_server_errors_exit_with_network_code_2() {
    let mut server = mockito::Server::new();
    let _courses = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/v1/courses(\?.*)?$".into()))
        .with_status(500)
        .create();
    let _course = server
        .mock("GET", "/api/v1/courses/13")
        .with_body("<html>maintenance</html>")
        .create();
    let home = tempdir().unwrap();

    // active course listing fails
    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t"])
        .write_stdin("")
        .assert()
        .code(2);

    // course body is not JSON
    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t", "--course-id", "13", "--check"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not parse API response"));
}

#[test]
fn test_check_prints_course_details_without_leaking_token() {
    let mut server = mockito::Server::new();
    let _course = server
        .mock("GET", "/api/v1/courses/42")
        .match_header("authorization", "Bearer s3cret-token")
        .with_body(
            json!({
                "id": 42,
                "name": "Intro to Systems",
                "course_code": "CS 101",
                "workflow_state": "available"
            })
            .to_string(),
        )
        .create();
    let home = tempdir().unwrap();

    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "s3cret-token", "--course-id", "42", "--check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Intro to Systems"))
        .stdout(predicate::str::contains("CS 101"))
        .stdout(predicate::str::contains("s3cret-token").not());
}

#[test]
fn test_invalid_selection_exits_with_code_5() {
    let mut server = mockito::Server::new();
    let _course = server
        .mock("GET", "/api/v1/courses/42")
        .with_body(json!({ "id": 42, "name": "Intro" }).to_string())
        .create();
    let _modules = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/v1/courses/42/modules(\?.*)?$".into()))
        .with_body(json!([{ "id": 1, "name": "Week 1" }]).to_string())
        .create();
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();

    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t", "--course-id", "42", "--choices", "abc"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("No valid module numbers selected"));
}

#[test]
fn test_download_of_empty_module_succeeds() {
    let mut server = mockito::Server::new();
    let _course = server
        .mock("GET", "/api/v1/courses/42")
        .with_body(json!({ "id": 42, "name": "Intro: Systems" }).to_string())
        .create();
    let _modules = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/v1/courses/42/modules(\?.*)?$".into()))
        .with_body(json!([{ "id": 1, "name": "Week 1" }, { "id": 2, "name": "Week 2" }]).to_string())
        .create();
    let _items = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/v1/courses/42/modules/2/items(\?.*)?$".into()))
        .with_body("[]")
        .create();
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();

    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t", "--course-id", "42", "--choices", "2"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("This module has no items"));

    assert!(out.path().join("Intro_ Systems").join("Week 2").is_dir());
}

#[test]
fn test_failed_files_are_reported_without_changing_exit_code() {
    let mut server = mockito::Server::new();
    let _course = server
        .mock("GET", "/api/v1/courses/42")
        .with_body(json!({ "id": 42, "name": "Intro" }).to_string())
        .create();
    let _modules = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/v1/courses/42/modules(\?.*)?$".into()))
        .with_body(json!([{ "id": 1, "name": "Week 1" }]).to_string())
        .create();
    let _items = server
        .mock("GET", mockito::Matcher::Regex(r"^/api/v1/courses/42/modules/1/items(\?.*)?$".into()))
        .with_body(json!([{ "type": "File", "content_id": 9 }]).to_string())
        .create();
    let _gone = server.mock("GET", "/api/v1/files/9").with_status(404).create();
    let home = tempdir().unwrap();
    let out = tempdir().unwrap();

    main_command(&home)
        .args(["--domain", server.url().as_str(), "--token", "t", "--course-id", "42", "--choices", "1"])
        .arg("--output")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("failed: 1"))
        .stdout(predicate::str::contains("Run the same command again"));
}
