//! Integration tests for CLI

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn demandlens(workdir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("demandlens"));
    cmd.current_dir(workdir.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("OPENAI_API_KEY")
        .env_remove("OPENAI_BASE_URL")
        .env_remove("GITHUB_API_URL")
        .env_remove("DEMANDLENS_MODEL");
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    demandlens(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Extract real user demands"))
        .stdout(predicate::str::contains("--max-issues"))
        .stdout(predicate::str::contains("--state"))
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--model"));
}

#[test]
fn test_invalid_repo_url_exits_with_one() {
    let dir = TempDir::new().unwrap();
    demandlens(&dir)
        .arg("https://gitlab.com/owner/repo")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository URL"));
}

#[test]
fn test_rejects_unknown_state() {
    let dir = TempDir::new().unwrap();
    demandlens(&dir)
        .args(["https://github.com/o/r", "--state", "merged"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_missing_openai_key_fails() {
    let dir = TempDir::new().unwrap();
    demandlens(&dir)
        .arg("https://github.com/o/r")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OPENAI_API_KEY"));

    assert!(!dir.path().join("requirements.md").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_full_run_writes_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "number": 1, "title": "Dark mode", "body": "Please", "state": "open",
             "html_url": "https://github.com/o/r/issues/1", "user": {"login": "u"}}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let reply = "```json\n{\"overview\": [\"Eye strain at night\"], \"pain_points\": [{\"id\": \"pp_1\", \"summary\": \"Bright UI\"}]}\n```";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": reply}}]
        })))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let uri = server.uri();
    let mut cmd = demandlens(&dir);
    cmd.env("GITHUB_API_URL", &uri)
        .env("OPENAI_BASE_URL", &uri)
        .env("OPENAI_API_KEY", "sk-test")
        .args(["https://github.com/o/r", "--output", "out.md", "--no-progress"]);

    let output = tokio::task::spawn_blocking(move || cmd.output())
        .await
        .unwrap()
        .unwrap();
    output.assert().success();

    let report = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(report.contains("## Overview"));
    assert!(report.contains("- Eye strain at night"));
    assert!(report.contains("### pp_1 - Bright UI"));
    assert!(report.contains("_No roadmap suggested._"));
}
