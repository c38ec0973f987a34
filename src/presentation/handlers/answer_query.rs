use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use super::error_response::{error_response, json_rejection_response};
use super::nullable::null_as_default;
use crate::application::ports::{KnowledgeStore, LlmClient, OcrClient};
use crate::application::services::RetrievalError;
use crate::domain::UserInfo;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AnswerQueryRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_info: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerQueryResponse {
    pub status: String,
    pub closest_match: Vec<ClosestMatch>,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClosestMatch {
    pub file: String,
    pub chunk_id: String,
    pub content: String,
    pub distance: f32,
}

#[tracing::instrument(skip(state, payload))]
pub async fn answer_query_handler<O, L, K>(
    State(state): State<AppState<O, L, K>>,
    payload: Result<Json<AnswerQueryRequest>, JsonRejection>,
) -> Response
where
    O: OcrClient + 'static,
    L: LlmClient + 'static,
    K: KnowledgeStore + 'static,
{
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return json_rejection_response(rejection),
    };
    tracing::debug!(
        session_id = ?request.session_id,
        question = %sanitize_prompt(&request.question),
        "Processing query"
    );
    let user_info = UserInfo::from_map(request.user_info);

    match state
        .retrieval_service
        .answer_query(&user_info, &request.question)
        .await
    {
        Ok(answer) => {
            tracing::info!(matches = answer.matches.len(), "Query answered successfully");
            let closest_match = answer
                .matches
                .into_iter()
                .map(|m| ClosestMatch {
                    file: m.file,
                    chunk_id: m.chunk_id,
                    content: m.content,
                    distance: m.distance,
                })
                .collect();

            (
                StatusCode::OK,
                Json(AnswerQueryResponse {
                    status: "success".to_string(),
                    closest_match,
                    answer: answer.answer,
                }),
            )
                .into_response()
        }
        Err(RetrievalError::MissingInput(_)) => {
            tracing::warn!("Missing user info or question");
            error_response(
                StatusCode::BAD_REQUEST,
                "User info and question are required",
            )
        }
        Err(RetrievalError::NoRelevantContext) => error_response(
            StatusCode::NOT_FOUND,
            "No relevant information found in the knowledge base.",
        ),
        Err(e) => {
            tracing::error!(error = %e, "Query failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}
