// tests/api_tests.rs

use quiz_backend::{config::Config, routes, state::AppState};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DB_ID: &str = "quiz-db";

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app(store_url: String) -> String {
    let config = Config {
        notion_token: "secret_integration".to_string(),
        quiz_database_id: DB_ID.to_string(),
        notion_base_url: store_url,
        notion_version: "2022-06-28".to_string(),
        notion_timeout: Duration::from_secs(5),
        allowed_origins: vec!["http://localhost:3000".to_string()],
        port: 0,
        rust_log: "error".to_string(),
    };

    let state = AppState::new(config).expect("Failed to build app state");
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

fn quiz_page(id: &str, lectures: &[&str]) -> Value {
    let relation: Vec<Value> = lectures.iter().map(|l| json!({"id": l})).collect();
    json!({
        "object": "page",
        "id": id,
        "properties": {
            "Question": {"type": "title", "title": [{"plain_text": format!("Question {}", id)}]},
            "Type": {"type": "select", "select": {"name": "MCQ"}},
            "Options": {"type": "rich_text", "rich_text": [{"plain_text": "London\nParis<br>Rome"}]},
            "Correct answer": {"type": "rich_text", "rich_text": [{"plain_text": "Paris"}]},
            "Lecture": {"type": "relation", "relation": relation}
        }
    })
}

fn query_path() -> String {
    format!("/v1/databases/{}/query", DB_ID)
}

async fn mount_single_page(server: &MockServer, pages: Vec<Value>) {
    Mock::given(method("POST"))
        .and(path(query_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": pages,
            "has_more": false,
            "next_cursor": null
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn unknown_route_is_404() {
    // Arrange
    let store = MockServer::start().await;
    let address = spawn_app(store.uri()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn get_questions_returns_normalized_sample() {
    // Arrange
    let store = MockServer::start().await;
    let pages: Vec<Value> = (0..30)
        .map(|_| quiz_page(&uuid::Uuid::new_v4().to_string(), &["L1"]))
        .collect();
    mount_single_page(&store, pages).await;
    let address = spawn_app(store.uri()).await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/api/quiz/questions?count=10", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["count"], 10);
    assert_eq!(body["truncated"], false);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);

    let ids: HashSet<&str> = items.iter().map(|q| q["id"].as_str().unwrap()).collect();
    assert_eq!(ids.len(), 10, "sample must not repeat questions");

    let first = &items[0];
    assert_eq!(first["type"], "MCQ");
    assert_eq!(first["options"], json!(["London", "Paris", "Rome"]));
    assert_eq!(first["correct"], "Paris");
    assert_eq!(first["lectureIds"], json!(["L1"]));
}

#[tokio::test]
async fn get_questions_without_lectures_sends_no_filter() {
    let store = MockServer::start().await;
    mount_single_page(&store, vec![quiz_page("q1", &[])]).await;
    let address = spawn_app(store.uri()).await;

    let response = reqwest::get(format!("{}/api/quiz/questions?lectures=%20,", address))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let requests = store.received_requests().await.expect("request recording is on");
    assert_eq!(requests.len(), 1);
    let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(sent, json!({"page_size": 100}));
}

#[tokio::test]
async fn get_questions_never_exceeds_candidates() {
    let store = MockServer::start().await;
    mount_single_page(&store, vec![quiz_page("a", &[]), quiz_page("b", &[])]).await;
    let address = spawn_app(store.uri()).await;

    let body: Value = reqwest::get(format!("{}/api/quiz/questions", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["count"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn get_questions_clamps_count() {
    let store = MockServer::start().await;
    let pages: Vec<Value> = (0..80).map(|i| quiz_page(&format!("q{}", i), &[])).collect();
    mount_single_page(&store, pages).await;
    let address = spawn_app(store.uri()).await;

    let body: Value = reqwest::get(format!("{}/api/quiz/questions?count=500", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 50);

    let body: Value = reqwest::get(format!("{}/api/quiz/questions?count=0", address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn get_questions_filters_by_lectures() {
    let store = MockServer::start().await;

    // Only answers when the OR filter for both lectures is sent.
    Mock::given(method("POST"))
        .and(path(query_path()))
        .and(body_partial_json(json!({
            "filter": {"or": [
                {"property": "Lecture", "relation": {"contains": "L1"}},
                {"property": "Lecture", "relation": {"contains": "L2"}}
            ]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                quiz_page("q1", &["L1"]),
                quiz_page("q2", &["L2", "L3"]),
                quiz_page("q3", &["L1", "L2"])
            ],
            "has_more": false,
            "next_cursor": null
        })))
        .expect(1)
        .mount(&store)
        .await;

    let address = spawn_app(store.uri()).await;

    let response = reqwest::get(format!(
        "{}/api/quiz/questions?lectures=L1,%20L2,L1",
        address
    ))
    .await
    .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    for item in items {
        let lectures = item["lectureIds"].as_array().unwrap();
        assert!(lectures.contains(&json!("L1")) || lectures.contains(&json!("L2")));
    }
}

#[tokio::test]
async fn get_questions_reports_store_failure() {
    let store = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(query_path()))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error",
            "status": 404,
            "code": "object_not_found",
            "message": "Could not find database with ID: quiz-db."
        })))
        .mount(&store)
        .await;

    let address = spawn_app(store.uri()).await;
    let response = reqwest::get(format!("{}/api/quiz/questions", address))
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Could not find database with ID: quiz-db.");
}

#[tokio::test]
async fn legacy_path_serves_questions() {
    let store = MockServer::start().await;
    mount_single_page(&store, vec![quiz_page("q1", &[])]).await;
    let address = spawn_app(store.uri()).await;

    let response = reqwest::get(format!("{}/.netlify/functions/get-questions", address))
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn score_rejects_missing_or_empty_items() {
    let store = MockServer::start().await;
    let address = spawn_app(store.uri()).await;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({"items": []}), json!({"items": "nope"})] {
        let response = client
            .post(format!("{}/api/quiz/score", address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status().as_u16(), 400);
        let error: Value = response.json().await.unwrap();
        assert_eq!(error, json!({"error": "No items submitted"}));
    }

    // An empty body reads as `{}`
    let response = client
        .post(format!("{}/api/quiz/score", address))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // So does a JSON `null`
    let response = client
        .post(format!("{}/api/quiz/score", address))
        .header("content-type", "application/json")
        .body("null")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn score_tolerates_odd_options() {
    let store = MockServer::start().await;
    let address = spawn_app(store.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/quiz/score", address))
        .json(&json!({
            "items": [
                {"id": "q1", "type": "short", "userAnswer": "x", "correct": "x", "options": "A\nB"},
                {"id": "q2", "type": "MCQ", "userAnswer": "Paris", "correct": "Paris",
                 "options": ["Paris", null]}
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"], 2);
    assert_eq!(body["score"], 2);
}

#[tokio::test]
async fn score_malformed_json_is_500() {
    let store = MockServer::start().await;
    let address = spawn_app(store.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/quiz/score", address))
        .header("content-type", "application/json")
        .body("{\"items\": [")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn score_quiz_flow() {
    let store = MockServer::start().await;
    let address = spawn_app(store.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/.netlify/functions/score-quiz", address))
        .json(&json!({
            "items": [
                {"id": "q1", "type": "MCQ", "userAnswer": "B", "correct": "Paris",
                 "options": ["London", "Paris", "Rome"]},
                {"id": "q2", "type": "MCQ", "userAnswer": "Paris", "correct": "Paris"},
                {"id": "q3", "type": "short", "userAnswer": "paris", "correct": "Paris, City of Light"},
                {"id": "q4", "type": "short", "userAnswer": "berlin", "correct": "Paris"}
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"], 4);
    assert_eq!(body["score"], 3);

    let flags: Vec<bool> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["isCorrect"].as_bool().unwrap())
        .collect();
    assert_eq!(flags, vec![true, true, true, false]);
    assert_eq!(body["details"][3]["correctAnswer"], "Paris");
    assert_eq!(body["details"][3]["userAnswer"], "berlin");
}

#[tokio::test]
async fn questions_round_trip_into_scorer() {
    // Fetch a question, answer it by letter, and score it.
    let store = MockServer::start().await;
    mount_single_page(&store, vec![quiz_page("q1", &["L1"])]).await;
    let address = spawn_app(store.uri()).await;
    let client = reqwest::Client::new();

    let fetched: Value = client
        .get(format!("{}/api/quiz/questions?count=1", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let question = &fetched["items"][0];

    let scored: Value = client
        .post(format!("{}/api/quiz/score", address))
        .json(&json!({
            "items": [{
                "id": question["id"],
                "type": question["type"],
                "userAnswer": "b",
                "correct": question["correct"],
                "options": question["options"]
            }]
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(scored["score"], 1);
    assert_eq!(scored["details"][0]["id"], "q1");
}
