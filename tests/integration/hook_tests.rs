use std::time::Duration;

use serde_json::{json, Value};
use skyliner::{Hook, HookConfig, HookSummary};
use skyliner_git::{ExtractionPolicy, GitCli, GitConfig, GitError, HistorySource};
use skyliner_sync::{HttpDeliveryClient, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Two commits between abc123 and def456, as `git rev-list --format` prints them.
struct TwoCommits;

impl HistorySource for TwoCommits {
    fn rev_list(&self, before: &str, after: &str) -> Result<String, GitError> {
        assert_eq!((before, after), ("abc123", "def456"));
        let first = [
            "1111111111111111111111111111111111111111",
            "abc123",
            "",
            "Ada Lovelace",
            "ada@example.com",
            "2024-03-01T10:00:00+00:00",
            "Ada Lovelace",
            "ada@example.com",
            "2024-03-01T10:00:00+00:00",
        ]
        .join("\0");
        let second = [
            "def456",
            "1111111111111111111111111111111111111111",
            " (HEAD -> main)",
            "Grace Hopper",
            "grace@example.com",
            "2024-03-02T11:00:00+00:00",
            "Ada Lovelace",
            "ada@example.com",
            "2024-03-01T12:00:00+00:00",
        ]
        .join("\0");
        Ok(format!(
            "commit 1111111111111111111111111111111111111111\n{first}\ncommit def456\n{second}\n"
        ))
    }
}

fn hook_config(server: &str) -> HookConfig {
    let git_config: GitConfig = [
        ("skyliner.token", "tok"),
        ("skyliner.repo-name", "web"),
        ("skyliner.server", server),
    ]
    .into_iter()
    .collect();
    HookConfig::from_git_config(&git_config).unwrap()
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        backoff_base: Duration::ZERO,
        ..RetryPolicy::default()
    }
}

async fn received_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|req| serde_json::from_slice(&req.body).unwrap())
        .collect()
}

// === End-to-end: one push line, two commits, delivered once ===
#[tokio::test]
async fn test_push_line_delivers_both_commits_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/commits/tok/web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let config = hook_config(&server.uri());
    let client = HttpDeliveryClient::new(config.delivery.clone());
    let summary = Hook::new(&TwoCommits, &client)
        .with_retry(fast_retry())
        .run("abc123 def456 refs/heads/main\n".as_bytes())
        .await;

    assert_eq!(summary.delivered, 1);

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["ref"], "refs/heads/main");
    assert_eq!(body["before"], "abc123");
    assert_eq!(body["after"], "def456");

    let commits = body["commits"].as_array().unwrap();
    assert_eq!(commits.len(), 2);
    assert_eq!(commits[0]["sha"], "1111111111111111111111111111111111111111");
    assert_eq!(commits[0]["parents"], json!([{"sha": "abc123"}]));
    assert_eq!(commits[1]["sha"], "def456");
    assert_eq!(commits[1]["ref"], " (HEAD -> main)");
    assert_eq!(
        commits[1]["commit"],
        json!({
            "committer": {
                "name": "Grace Hopper",
                "email": "grace@example.com",
                "date": "2024-03-02T11:00:00+00:00"
            },
            "author": {
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "date": "2024-03-01T12:00:00+00:00"
            }
        })
    );
}

// === Retry: an unavailable server is tried exactly five times ===
#[tokio::test]
async fn test_unavailable_server_is_retried_five_times() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(5)
        .mount(&server)
        .await;

    let config = hook_config(&server.uri());
    let client = HttpDeliveryClient::new(config.delivery);
    let summary = Hook::new(&TwoCommits, &client)
        .with_retry(fast_retry())
        .run("abc123 def456 refs/heads/main\n".as_bytes())
        .await;

    assert_eq!(
        summary,
        HookSummary {
            delivered: 0,
            given_up: 1,
            skipped: 0
        }
    );
}

// === Terminal: a rejection is not retried ===
#[tokio::test]
async fn test_rejection_is_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "bad token"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = hook_config(&server.uri());
    let client = HttpDeliveryClient::new(config.delivery);
    let summary = Hook::new(&TwoCommits, &client)
        .with_retry(fast_retry())
        .run("abc123 def456 refs/heads/main\n".as_bytes())
        .await;

    assert_eq!(summary.given_up, 1);
}

// === Extraction against a path that is not a repository ===
#[tokio::test]
async fn test_missing_repository_reports_no_commits() {
    let tmp = tempfile::tempdir().unwrap();
    let git = GitCli::new(Some(tmp.path().to_path_buf()));

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let config = hook_config(&server.uri());
    let client = HttpDeliveryClient::new(config.delivery.clone());
    let summary = Hook::new(&git, &client)
        .with_retry(fast_retry())
        .with_extraction(config.extraction)
        .run("abc123 def456 refs/heads/main\n".as_bytes())
        .await;

    assert_eq!(summary.delivered, 1);
    let bodies = received_bodies(&server).await;
    assert_eq!(bodies[0]["commits"], json!([]));

    let strict = Hook::new(&git, &client)
        .with_extraction(ExtractionPolicy::Strict)
        .run("abc123 def456 refs/heads/main\n".as_bytes())
        .await;
    assert_eq!(strict.skipped, 1);
    assert_eq!(received_bodies(&server).await.len(), 1);
}
