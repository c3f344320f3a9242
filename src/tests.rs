//! Integration tests for the StackIt backend.

use std::path::PathBuf;
use std::sync::Arc;

use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::store::{seed, SavedStore, Store};
use crate::{create_router, AppState};

/// Spawn the full application against the given saved-question slot and
/// return its base URL.
async fn spawn_app(saved_path: PathBuf, psk: Option<String>) -> String {
    let config = Config {
        api_psk: psk,
        saved_path,
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
    };

    let saved_store = SavedStore::new(&config.saved_path);
    let store = Arc::new(Store::open(saved_store, seed::current_user()).await);

    let state = AppState {
        store,
        config: Arc::new(config),
    };

    let app = create_router(state);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");

    // Spawn server
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for server to start
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

    format!("http://{}", addr)
}

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let saved_path = temp_dir.path().join("saved_questions.json");
        let psk = "test-api-key".to_string();

        let base_url = spawn_app(saved_path, Some(psk.clone())).await;

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("x-api-key", psk.parse().unwrap());
        let client = Client::builder().default_headers(headers).build().unwrap();

        TestFixture {
            client,
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_auth_missing_psk() {
    let temp_dir = TempDir::new().unwrap();
    let base_url = spawn_app(
        temp_dir.path().join("saved_questions.json"),
        Some("secret-key".to_string()),
    )
    .await;

    // Request without API key
    let client = Client::new();
    let resp = client
        .get(format!("{}/api/datastore", base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_auth_invalid_psk() {
    let temp_dir = TempDir::new().unwrap();
    let base_url = spawn_app(
        temp_dir.path().join("saved_questions.json"),
        Some("correct-key".to_string()),
    )
    .await;

    // Request with wrong API key
    let client = Client::new();
    let resp = client
        .get(format!("{}/api/datastore", base_url))
        .header("x-api-key", "wrong-key")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_auth_bearer_token_accepted() {
    let temp_dir = TempDir::new().unwrap();
    let base_url = spawn_app(
        temp_dir.path().join("saved_questions.json"),
        Some("correct-key".to_string()),
    )
    .await;

    let client = Client::new();
    let resp = client
        .get(format!("{}/api/datastore", base_url))
        .header("authorization", "Bearer correct-key")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_datastore_snapshot() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/datastore"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body["data"]["schemaVersion"].is_number());
    assert!(body["revisionId"].is_number());
    assert_eq!(body["data"]["currentUser"]["id"], "u123");
    assert_eq!(body["data"]["questions"].as_array().unwrap().len(), 3);
    assert_eq!(body["data"]["savedQuestionIds"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_question_create_and_ordering() {
    let fixture = TestFixture::new().await;

    // Seed order is newest first
    let list_resp = fixture
        .client
        .get(fixture.url("/api/questions"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let ids: Vec<&str> = list_body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["q1", "q2", "q3"]);

    // Create question
    let create_resp = fixture
        .client
        .post(fixture.url("/api/questions"))
        .json(&json!({
            "title": "How do I pin a Box<dyn Future>?",
            "body": "The compiler keeps telling me the future cannot be unpinned.",
            "tags": ["rust", "async"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    assert_eq!(create_body["success"], true);
    let question_id = create_body["data"]["id"].as_str().unwrap();
    assert_eq!(create_body["data"]["votes"], 0);
    assert_eq!(create_body["data"]["views"], 0);
    assert_eq!(create_body["data"]["author"]["id"], "u123");
    assert_eq!(create_body["data"]["hasAcceptedAnswer"], false);

    // The new question leads the listing
    let list_resp = fixture
        .client
        .get(fixture.url("/api/questions"))
        .send()
        .await
        .unwrap();
    let list_body: Value = list_resp.json().await.unwrap();
    let listed = list_body["data"].as_array().unwrap();
    assert_eq!(listed.len(), 4);
    assert_eq!(listed[0]["id"], question_id);

    // And resolves by id
    let get_resp = fixture
        .client
        .get(fixture.url(&format!("/api/questions/{}", question_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(get_resp.status(), 200);
    let get_body: Value = get_resp.json().await.unwrap();
    assert_eq!(get_body["data"]["title"], "How do I pin a Box<dyn Future>?");
}

#[tokio::test]
async fn test_question_sort_orders() {
    let fixture = TestFixture::new().await;

    let by_votes: Value = fixture
        .client
        .get(fixture.url("/api/questions?sort=votes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(by_votes["data"][0]["id"], "q1");

    let unanswered: Value = fixture
        .client
        .get(fixture.url("/api/questions?sort=unanswered"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unanswered["data"].as_array().unwrap().len(), 2);

    // Unknown sort values fall back to newest
    let fallback: Value = fixture
        .client
        .get(fixture.url("/api/questions?sort=bogus"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fallback["data"][0]["id"], "q1");
    assert_eq!(fallback["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    // Question without a title
    let resp = fixture
        .client
        .post(fixture.url("/api/questions"))
        .json(&json!({ "title": "  ", "body": "text" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    // Answer without a body
    let resp2 = fixture
        .client
        .post(fixture.url("/api/questions/q1/answers"))
        .json(&json!({ "body": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 400);
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/questions/q999"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    // Mutations on unresolved ids are NotFound, not silent no-ops
    let resp2 = fixture
        .client
        .post(fixture.url("/api/questions/q999/answers"))
        .json(&json!({ "body": "into the void" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp2.status(), 404);

    let resp3 = fixture
        .client
        .post(fixture.url("/api/questions/q1/answers/a999/votes"))
        .json(&json!({ "delta": 1 }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp3.status(), 404);
}

#[tokio::test]
async fn test_vote_round_trip() {
    let fixture = TestFixture::new().await;

    let up: Value = fixture
        .client
        .post(fixture.url("/api/questions/q1/votes"))
        .json(&json!({ "delta": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(up["data"]["votes"], 16);

    let down: Value = fixture
        .client
        .post(fixture.url("/api/questions/q1/votes"))
        .json(&json!({ "delta": -1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(down["data"]["votes"], 15);
}

#[tokio::test]
async fn test_vote_notifications() {
    let fixture = TestFixture::new().await;

    // Upvoting another user's question appends exactly one vote
    // notification at the head
    fixture
        .client
        .post(fixture.url("/api/questions/q1/votes"))
        .json(&json!({ "delta": 1 }))
        .send()
        .await
        .unwrap();

    let body: Value = fixture
        .client
        .get(fixture.url("/api/notifications"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let notifications = body["data"]["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 3);
    assert_eq!(notifications[0]["kind"], "vote");
    assert_eq!(notifications[0]["questionId"], "q1");
    assert_eq!(notifications[0]["read"], false);

    // Downvotes and self-votes are silent: q3 belongs to the current user
    fixture
        .client
        .post(fixture.url("/api/questions/q1/votes"))
        .json(&json!({ "delta": -1 }))
        .send()
        .await
        .unwrap();
    fixture
        .client
        .post(fixture.url("/api/questions/q3/votes"))
        .json(&json!({ "delta": 1 }))
        .send()
        .await
        .unwrap();

    let body: Value = fixture
        .client
        .get(fixture.url("/api/notifications"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["data"]["notifications"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_answer_flow() {
    let fixture = TestFixture::new().await;

    // q1 belongs to Alice, so answering emits a notification
    let create_resp = fixture
        .client
        .post(fixture.url("/api/questions/q1/answers"))
        .json(&json!({ "body": "Promises compose; callbacks nest." }))
        .send()
        .await
        .unwrap();

    assert_eq!(create_resp.status(), 200);
    let create_body: Value = create_resp.json().await.unwrap();
    let answer_id = create_body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(create_body["data"]["votes"], 0);
    assert_eq!(create_body["data"]["isAccepted"], false);

    let question: Value = fixture
        .client
        .get(fixture.url("/api/questions/q1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let answers = question["data"]["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0]["id"], answer_id.as_str());

    let notifications: Value = fixture
        .client
        .get(fixture.url("/api/notifications"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(notifications["data"]["notifications"][0]["kind"], "answer");

    // Voting on the answer works and reports the new count
    let vote: Value = fixture
        .client
        .post(fixture.url(&format!(
            "/api/questions/q1/answers/{}/votes",
            answer_id
        )))
        .json(&json!({ "delta": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(vote["data"]["votes"], 1);
}

#[tokio::test]
async fn test_accept_answer() {
    let fixture = TestFixture::new().await;

    // q3 belongs to the current user; post two answers and accept each in
    // turn
    let first: Value = fixture
        .client
        .post(fixture.url("/api/questions/q3/answers"))
        .json(&json!({ "body": "PostgreSQL, for the types." }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let first_id = first["data"]["id"].as_str().unwrap().to_string();

    let second: Value = fixture
        .client
        .post(fixture.url("/api/questions/q3/answers"))
        .json(&json!({ "body": "MySQL, for the replication story." }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let second_id = second["data"]["id"].as_str().unwrap().to_string();

    let accept_resp = fixture
        .client
        .post(fixture.url(&format!(
            "/api/questions/q3/answers/{}/accept",
            first_id
        )))
        .send()
        .await
        .unwrap();
    assert_eq!(accept_resp.status(), 200);

    // Accepting the second unmarks the first
    fixture
        .client
        .post(fixture.url(&format!(
            "/api/questions/q3/answers/{}/accept",
            second_id
        )))
        .send()
        .await
        .unwrap();

    let question: Value = fixture
        .client
        .get(fixture.url("/api/questions/q3"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(question["data"]["hasAcceptedAnswer"], true);
    let accepted: Vec<&Value> = question["data"]["answers"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["isAccepted"] == true)
        .collect();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0]["id"], second_id.as_str());

    // Only the question's author may accept; q2 belongs to Alice
    let forbidden = fixture
        .client
        .post(fixture.url("/api/questions/q2/answers/a1/accept"))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), 403);
    let body: Value = forbidden.json().await.unwrap();
    assert_eq!(body["error"]["code"], "FORBIDDEN");
}

#[tokio::test]
async fn test_views_counted_once_per_session() {
    let fixture = TestFixture::new().await;

    let first: Value = fixture
        .client
        .post(fixture.url("/api/questions/q1/views"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["data"]["views"], 235);

    let second: Value = fixture
        .client
        .post(fixture.url("/api/questions/q1/views"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["data"]["views"], 235);

    let question: Value = fixture
        .client
        .get(fixture.url("/api/questions/q1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(question["data"]["views"], 235);
}

#[tokio::test]
async fn test_saved_set_survives_restart() {
    let temp_dir = TempDir::new().unwrap();
    let saved_path = temp_dir.path().join("saved_questions.json");

    let base_url = spawn_app(saved_path.clone(), None).await;
    let client = Client::new();

    let toggle: Value = client
        .post(format!("{}/api/saved/q2/toggle", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggle["data"]["saved"], true);

    let saved: Value = client
        .get(format!("{}/api/saved", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["data"], json!(["q2"]));

    // A fresh process over the same slot sees the last write
    let restarted_url = spawn_app(saved_path, None).await;
    let saved: Value = client
        .get(format!("{}/api/saved", restarted_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["data"], json!(["q2"]));

    // Toggling twice restores the original membership
    client
        .post(format!("{}/api/saved/q2/toggle", restarted_url))
        .send()
        .await
        .unwrap();
    let saved: Value = client
        .get(format!("{}/api/saved", restarted_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(saved["data"], json!([]));
}

#[tokio::test]
async fn test_tags_endpoint() {
    let fixture = TestFixture::new().await;

    let before: Value = fixture
        .client
        .get(fixture.url("/api/tags"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    // Nine distinct seed tags, each used once
    assert_eq!(before["data"].as_array().unwrap().len(), 9);

    fixture
        .client
        .post(fixture.url("/api/questions"))
        .json(&json!({
            "title": "Why is my React list re-rendering?",
            "body": "Every keystroke re-renders 2000 rows.",
            "tags": ["react", "javascript"]
        }))
        .send()
        .await
        .unwrap();

    let after: Value = fixture
        .client
        .get(fixture.url("/api/tags"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let tags = after["data"].as_array().unwrap();
    // The twice-used tags lead the aggregate
    assert_eq!(tags[0]["count"], 2);
    assert_eq!(tags[1]["count"], 2);
    let react = tags.iter().find(|t| t["name"] == "react").unwrap();
    assert_eq!(react["count"], 2);

    let tagged: Value = fixture
        .client
        .get(fixture.url("/api/tags/react/questions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(tagged["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stats_endpoint() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/stats"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["totalQuestions"], 3);
    assert_eq!(body["data"]["totalAnswers"], 1);
    assert_eq!(body["data"]["totalUsers"], 3);
    assert_eq!(body["data"]["mostVotedQuestion"]["id"], "q1");
    assert!(body["data"]["mostUsedTag"].is_string());
}

#[tokio::test]
async fn test_user_endpoints() {
    let fixture = TestFixture::new().await;

    let me: Value = fixture
        .client
        .get(fixture.url("/api/users/me"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(me["data"]["id"], "u123");
    assert_eq!(me["data"]["name"], "Tom Cook");
    assert_eq!(me["data"]["isActive"], true);

    let questions: Value = fixture
        .client
        .get(fixture.url("/api/users/u456/questions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(questions["data"].as_array().unwrap().len(), 2);

    // Bob's one answer comes back denormalized with its parent question
    let answers: Value = fixture
        .client
        .get(fixture.url("/api/users/u789/answers"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let items = answers["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["questionId"], "q2");
    assert_eq!(
        items[0]["questionTitle"],
        "Best practices for React component optimization"
    );
    assert_eq!(items[0]["id"], "a1");
}

#[tokio::test]
async fn test_notification_endpoints() {
    let fixture = TestFixture::new().await;

    let list: Value = fixture
        .client
        .get(fixture.url("/api/notifications"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["data"]["notifications"].as_array().unwrap().len(), 2);
    assert_eq!(list["data"]["unreadCount"], 1);

    let marked: Value = fixture
        .client
        .post(fixture.url("/api/notifications/n1/read"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(marked["data"]["read"], true);

    let all: Value = fixture
        .client
        .post(fixture.url("/api/notifications/read-all"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(all["data"]["updated"], 0);

    let missing = fixture
        .client
        .post(fixture.url("/api/notifications/n999/read"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_revision_increments_on_writes() {
    let fixture = TestFixture::new().await;

    let initial: Value = fixture
        .client
        .get(fixture.url("/api/datastore/revision"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let initial_revision = initial["data"]["revisionId"].as_i64().unwrap();

    let vote: Value = fixture
        .client
        .post(fixture.url("/api/questions/q1/votes"))
        .json(&json!({ "delta": 1 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(vote["revisionId"].as_i64().unwrap(), initial_revision + 1);

    let toggle: Value = fixture
        .client
        .post(fixture.url("/api/saved/q1/toggle"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggle["revisionId"].as_i64().unwrap(), initial_revision + 2);
}
