//! pasteboard バイナリのエンドツーエンドテスト。
//!
//! モックモードのテストは完全オフラインで動く。ライブ経路のテストは
//! バイナリをローカルの mockito サーバーへ向ける。

use assert_cmd::Command;
use predicates::prelude::*;

fn pasteboard() -> Command {
    let mut cmd = Command::cargo_bin("pasteboard").expect("binary exists");
    cmd.env_remove("ANTHROPIC_API_KEY");
    cmd
}

#[test]
fn help_lists_the_three_actions() {
    pasteboard()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("rephrase")
                .and(predicate::str::contains("summarize"))
                .and(predicate::str::contains("tweetify")),
        );
}

#[test]
fn mock_rephrase_prints_placeholder() {
    pasteboard()
        .args(["rephrase", "Please review the attached draft when you can", "--mock"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Here's a crisp, professional rewrite of your text",
        ));
}

#[test]
fn mock_output_is_deterministic() {
    let run = || {
        pasteboard()
            .args(["tweetify", "Big news from the team today", "--mock"])
            .output()
            .expect("binary runs")
    };
    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    assert!(String::from_utf8_lossy(&first.stdout).contains("🚀"));
}

#[test]
fn falls_back_to_mock_without_credential() {
    pasteboard()
        .args(["summarize", "Quarterly revenue grew faster than expected"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Key insight:"))
        .stderr(predicate::str::contains("falling back to mock processor"));
}

#[test]
fn empty_stdin_fails_with_usage_hint() {
    pasteboard()
        .arg("rephrase")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no input text"));
}

#[test]
fn stdin_is_processed() {
    pasteboard()
        .args(["summarize", "--mock"])
        .write_stdin("one two three four five six seven eight nine ten eleven twelve")
        .assert()
        .success()
        .stdout(predicate::str::contains("Key insight: one two three"));
}

#[test]
fn live_path_round_trip() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":[{"type":"text","text":" Hello from the API "}]}"#)
        .create();

    pasteboard()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args(["rephrase", "hello", "--endpoint", &server.url()])
        .assert()
        .success()
        .stdout("Hello from the API\n");
}

#[test]
fn model_and_token_overrides_reach_the_wire() {
    let mut server = mockito::Server::new();
    let m = server
        .mock("POST", "/")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "claude-3-opus-20240229",
            "max_tokens": 64,
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"content":[{"type":"text","text":"ok"}]}"#)
        .create();

    pasteboard()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args([
            "summarize",
            "hello",
            "--endpoint",
            &server.url(),
            "--model",
            "claude-3-opus-20240229",
            "--max-tokens",
            "64",
            "--timeout-secs",
            "30",
        ])
        .assert()
        .success()
        .stdout("ok\n");

    m.assert();
}

#[test]
fn live_error_reports_server_message() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":{"type":"invalid_request_error","message":"X"}}"#)
        .create();

    pasteboard()
        .env("ANTHROPIC_API_KEY", "test-key")
        .args(["tweetify", "hello", "--endpoint", &server.url()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("X"));
}
