//! CLI and end-to-end command tests

mod common;

use common::{jcl, myself_body, MockJira};
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("filters"))
        .stdout(predicate::str::contains("boards"))
        .stdout(predicate::str::contains("1-3,6-8,10"));
}

#[test]
fn test_version_displays() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jcl"));
}

#[test]
fn test_unknown_command_fails() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_invalid_board_type_rejected() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .args(["boards", "--type", "roadmap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("scrum"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_jcl"));
}

// ============================================================================
// Configuration Tests
// ============================================================================

#[test]
fn test_missing_configuration_fails() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .arg("filters")
        .assert()
        .failure()
        .stderr(predicate::str::contains("JIRA_URL"))
        .stderr(predicate::str::contains("JIRA_API_TOKEN"));
}

#[test]
fn test_invalid_url_fails() {
    let home = TempDir::new().unwrap();
    jcl(&home)
        .arg("boards")
        .env("JIRA_URL", "ftp://jira.example.com")
        .env("JIRA_API_TOKEN", "t")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JIRA URL"));
}

#[test]
fn test_config_file_with_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("jcl.yaml");
    fs::write(&config, "url: https://jira.example.com\npassword: hunter2\n").unwrap();

    jcl(&home)
        .args(["auth", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot parse config file"));
}

#[test]
fn test_dotenv_settings_are_loaded() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join(".env"),
        "JIRA_URL=ftp://jira.example.com\nJIRA_API_TOKEN=t\n",
    )
    .unwrap();

    jcl(&home)
        .arg("boards")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid JIRA URL"));
}

#[test]
fn test_malformed_dotenv_warns_and_continues() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join(".env"), "JIRA_URL=\"unterminated\n").unwrap();

    jcl(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_jcl"))
        .stderr(predicate::str::contains("ignoring unreadable .env file"));
}

// ============================================================================
// End-to-end Tests
// ============================================================================

fn mock_with_login() -> MockJira {
    let mock = MockJira::start();
    mock.mount(
        Mock::given(method("GET"))
            .and(path("/rest/api/2/myself"))
            .respond_with(ResponseTemplate::new(200).set_body_json(myself_body())),
    );
    mock.mount(
        Mock::given(method("GET"))
            .and(path("/rest/agile/1.0/board"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "maxResults": 50, "startAt": 0, "isLast": true,
                "values": [
                    {"id": 11, "name": "Old sprint board", "type": "scrum"},
                    {"id": 12, "name": "Team kanban", "type": "kanban"}
                ]
            }))),
    );
    mock.mount(
        Mock::given(method("GET"))
            .and(path("/rest/agile/1.0/board/11"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": 11, "name": "Old sprint board", "type": "scrum"})),
            ),
    );
    mock
}

fn jcl_against(home: &TempDir, mock: &MockJira) -> assert_cmd::Command {
    let mut cmd = jcl(home);
    cmd.env("JIRA_URL", mock.uri())
        .env("JIRA_USERNAME", "me")
        .env("JIRA_API_TOKEN", "secret-token");
    cmd
}

#[test]
fn test_boards_select_and_delete() {
    let home = TempDir::new().unwrap();
    let mock = mock_with_login();
    mock.mount(
        Mock::given(method("DELETE"))
            .and(path("/rest/agile/1.0/board/11"))
            .respond_with(ResponseTemplate::new(204)),
    );

    jcl_against(&home, &mock)
        .arg("boards")
        .write_stdin("1\nyes\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Authenticated as Jane Doe"))
        .stdout(predicate::str::contains("Found 2 boards:"))
        .stdout(predicate::str::contains("1 board deleted"));

    assert_eq!(mock.received_at("DELETE", "/rest/agile/1.0/board/11").len(), 1);
    assert!(mock.received_at("DELETE", "/rest/agile/1.0/board/12").is_empty());
}

#[test]
fn test_boards_decline_deletes_nothing() {
    let home = TempDir::new().unwrap();
    let mock = mock_with_login();

    jcl_against(&home, &mock)
        .arg("boards")
        .write_stdin("1-2\nn\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Deletion cancelled"));

    assert!(mock
        .received()
        .iter()
        .all(|r| r.method.as_str() != "DELETE"));
}

#[test]
fn test_boards_closed_input_at_confirmation_cancels() {
    let home = TempDir::new().unwrap();
    let mock = mock_with_login();

    jcl_against(&home, &mock)
        .arg("boards")
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Operation cancelled"));

    assert!(mock
        .received()
        .iter()
        .all(|r| r.method.as_str() != "DELETE"));
}

#[test]
fn test_boards_failed_delete_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let mock = mock_with_login();
    mock.mount(
        Mock::given(method("DELETE"))
            .and(path("/rest/agile/1.0/board/11"))
            .respond_with(ResponseTemplate::new(204)),
    );
    mock.mount(
        Mock::given(method("DELETE"))
            .and(path("/rest/agile/1.0/board/12"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "errorMessages": ["You are not a board admin"]
            }))),
    );

    jcl_against(&home, &mock)
        .arg("boards")
        .write_stdin("1-2\ny\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 board deleted"))
        .stdout(predicate::str::contains("You are not a board admin"))
        .stderr(predicate::str::contains("1 of 2 deletions failed"));
}

#[test]
fn test_boards_filter_from_environment() {
    let home = TempDir::new().unwrap();
    let mock = mock_with_login();

    jcl_against(&home, &mock)
        .arg("boards")
        .env("JIRA_BOARD_FILTER", "nothing-matches")
        .assert()
        .success()
        .stdout(predicate::str::contains("No boards found containing 'nothing-matches'"));
}

#[test]
fn test_auth_reports_method() {
    let home = TempDir::new().unwrap();
    let mock = mock_with_login();
    mock.mount(
        Mock::given(method("GET"))
            .and(path("/rest/api/2/serverInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "serverTitle": "Example JIRA", "version": "9.12.0", "deploymentType": "Server"
            }))),
    );

    jcl_against(&home, &mock)
        .arg("auth")
        .assert()
        .success()
        .stdout(predicate::str::contains("Basic auth"))
        .stdout(predicate::str::contains("Example JIRA 9.12.0"))
        .stdout(predicate::str::contains("secret-token").not());
}
