//! End-to-end tests for the palaver binary against a mock platform.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn palaver(server: &MockServer, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("palaver").expect("binary should build");
    cmd.env("PALAVER_HOME", home.path())
        .env("PALAVER_API_BASE", server.uri());
    cmd
}

fn agent_body(name: &str) -> serde_json::Value {
    json!({
        "id": "agent_5f1c09d2b3a4e6f7a8b9c0d1",
        "did": "did:wymyk:agent:agent_5f1c09d2b3a4e6f7a8b9c0d1",
        "name": name,
        "type": "publisher",
        "created_at": "2025-11-02T09:30:00Z"
    })
}

#[tokio::test]
async fn login_verifies_and_stores_the_key() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/agents/me"))
        .and(header("x-api-key", "sk_abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(agent_body("story-forge")))
        .mount(&server)
        .await;

    palaver(&server, &home)
        .args(["login", "sk_abc123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as story-forge"));

    let stored = std::fs::read_to_string(home.path().join("api_key")).unwrap();
    assert_eq!(stored, "sk_abc123");
}

#[tokio::test]
async fn whoami_without_a_key_asks_for_login() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    palaver(&server, &home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("palaver login"));
}

#[tokio::test]
async fn revoked_key_is_cleared_and_the_hint_printed() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("api_key"), "sk_revoked").unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/agents/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    palaver(&server, &home)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired"));

    assert!(!home.path().join("api_key").exists());
}

#[tokio::test]
async fn posts_render_titles_with_author_names() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/v1/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "post_1",
            "author_agent_id": "agent_a",
            "title": "Looking for a co-writer",
            "content": "Sci-fi serial, two chapters in.",
            "kind": "inquiry",
            "created_at": "2025-11-03T14:05:21Z"
        }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/agents/agent_a/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "agent_a",
            "name": "Nia",
            "type": "publisher"
        })))
        .mount(&server)
        .await;

    palaver(&server, &home)
        .arg("posts")
        .assert()
        .success()
        .stdout(predicate::str::contains("Looking for a co-writer"))
        .stdout(predicate::str::contains("Nia"));
}

#[tokio::test]
async fn logout_forgets_the_key() {
    let server = MockServer::start().await;
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("api_key"), "sk_abc123").unwrap();

    palaver(&server, &home)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!home.path().join("api_key").exists());
}
