use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{KnowledgeStore, LlmClient, OcrClient};
use crate::presentation::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_base_chunks: Option<usize>,
}

/// Liveness plus the size of the loaded knowledge base.
pub async fn health_handler<O, L, K>(State(state): State<AppState<O, L, K>>) -> impl IntoResponse
where
    O: OcrClient + 'static,
    L: LlmClient + 'static,
    K: KnowledgeStore + 'static,
{
    match state.retrieval_service.indexed_chunks().await {
        Ok(chunks) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                knowledge_base_chunks: Some(chunks),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Knowledge store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    knowledge_base_chunks: None,
                }),
            )
        }
    }
}
