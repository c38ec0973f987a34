use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use serde_json::{Value, json};

use docsense::application::ports::{Embedder, LlmClient, ServiceError};
use docsense::domain::Message;
use docsense::infrastructure::llm::OpenAiClient;
use docsense::presentation::config::LlmProvider;

use crate::helpers::{llm_settings, spawn_server};

#[derive(Clone, Default)]
struct Captured {
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[derive(Clone)]
struct CapturedRequest {
    headers: HeaderMap,
    query: Option<String>,
    body: Value,
}

impl Captured {
    fn last(&self) -> CapturedRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

async fn record(
    State(captured): State<Captured>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
    axum::Json(body): axum::Json<Value>,
) -> axum::Json<Value> {
    captured
        .requests
        .lock()
        .unwrap()
        .push(CapturedRequest { headers, query, body });
    axum::Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": "  Total due: $50\n" } }]
    }))
}

#[tokio::test]
async fn given_azure_provider_when_chatting_then_uses_deployment_path_and_api_key() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/openai/deployments/gpt-4o/chat/completions", post(record))
        .with_state(captured.clone());
    let endpoint = spawn_server(router).await;
    let client = OpenAiClient::new(&llm_settings(LlmProvider::Azure, &endpoint)).unwrap();

    let reply = client
        .chat(&[Message::system("be brief"), Message::user("what is due?")])
        .await
        .unwrap();

    assert_eq!(reply, "  Total due: $50\n");
    let request = captured.last();
    assert_eq!(request.headers["api-key"], "test-llm-key");
    assert_eq!(request.query.as_deref(), Some("api-version=2023-07-01-preview"));
    assert_eq!(request.body["max_tokens"], 1000);
    assert!(request.body.get("temperature").is_none());
    assert_eq!(request.body["messages"][0]["role"], "system");
    assert_eq!(request.body["messages"][1]["content"], "what is due?");
}

#[tokio::test]
async fn given_openai_provider_when_completing_then_uses_bearer_auth() {
    let captured = Captured::default();
    let router = Router::new()
        .route("/chat/completions", post(record))
        .with_state(captured.clone());
    let endpoint = spawn_server(router).await;
    let client = OpenAiClient::new(&llm_settings(LlmProvider::OpenAi, &endpoint)).unwrap();

    client.complete("question", "").await.unwrap();

    let request = captured.last();
    assert_eq!(request.headers["authorization"], "Bearer test-llm-key");
    assert!(request.headers.get("api-key").is_none());
    assert_eq!(request.body["model"], "gpt-4o");
    assert_eq!(request.body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn given_unordered_embedding_data_when_embedding_batch_then_sorts_by_index() {
    let router = Router::new().route(
        "/embeddings",
        post(|axum::Json(body): axum::Json<Value>| async move {
            assert_eq!(body["model"], "text-embedding-ada-002");
            assert_eq!(body["input"], json!(["first", "second"]));
            axum::Json(json!({
                "data": [
                    { "index": 1, "embedding": [0.0, 1.0] },
                    { "index": 0, "embedding": [1.0, 0.0] }
                ]
            }))
        }),
    );
    let endpoint = spawn_server(router).await;
    let client = OpenAiClient::new(&llm_settings(LlmProvider::OpenAi, &endpoint)).unwrap();

    let embeddings = client.embed_batch(&["first", "second"]).await.unwrap();

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].values, vec![1.0, 0.0]);
    assert_eq!(embeddings[1].values, vec![0.0, 1.0]);
}

#[tokio::test]
async fn given_no_texts_when_embedding_batch_then_skips_request() {
    let client = OpenAiClient::new(&llm_settings(LlmProvider::OpenAi, "http://127.0.0.1:9")).unwrap();

    let embeddings = client.embed_batch(&[]).await.unwrap();

    assert!(embeddings.is_empty());
}

#[tokio::test]
async fn given_rate_limited_response_when_chatting_then_returns_rate_limited() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let endpoint = spawn_server(router).await;
    let client = OpenAiClient::new(&llm_settings(LlmProvider::OpenAi, &endpoint)).unwrap();

    let result = client.chat(&[Message::user("hi")]).await;

    assert_eq!(result, Err(ServiceError::RateLimited));
}

#[tokio::test]
async fn given_empty_choices_when_chatting_then_returns_invalid_response() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { axum::Json(json!({ "choices": [] })) }),
    );
    let endpoint = spawn_server(router).await;
    let client = OpenAiClient::new(&llm_settings(LlmProvider::OpenAi, &endpoint)).unwrap();

    let result = client.chat(&[Message::user("hi")]).await;

    assert!(matches!(result, Err(ServiceError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_non_json_body_when_chatting_then_returns_invalid_response() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { "<html>gateway</html>" }),
    );
    let endpoint = spawn_server(router).await;
    let client = OpenAiClient::new(&llm_settings(LlmProvider::OpenAi, &endpoint)).unwrap();

    let result = client.chat(&[Message::user("hi")]).await;

    assert!(matches!(result, Err(ServiceError::InvalidResponse(_))));
}

#[test]
fn given_blank_api_key_when_constructing_then_returns_authentication() {
    let mut settings = llm_settings(LlmProvider::Azure, "http://127.0.0.1:9");
    settings.api_key = String::new();

    assert!(matches!(
        OpenAiClient::new(&settings),
        Err(ServiceError::Authentication(_))
    ));
}
