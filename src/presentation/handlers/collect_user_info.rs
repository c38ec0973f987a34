use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error_response::{error_response, json_rejection_response};
use super::nullable::null_as_default;
use crate::application::ports::{KnowledgeStore, LlmClient, OcrClient};
use crate::application::services::IntakeTurn;
use crate::domain::UserInfo;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CollectUserInfoRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_input: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub previous_gpt_output: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collected_data: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmation_status: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CollectUserInfoResponse {
    pub status: String,
    pub response: String,
    pub collected_data: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confirmation_status: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub transition_to_qa: bool,
}

#[tracing::instrument(skip(state, payload), fields(session_id = tracing::field::Empty))]
pub async fn collect_user_info_handler<O, L, K>(
    State(state): State<AppState<O, L, K>>,
    payload: Result<Json<CollectUserInfoRequest>, JsonRejection>,
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
    let session_id = match request.session_id.as_deref().map(str::trim) {
        None | Some("") => {
            tracing::warn!("Missing session ID");
            return error_response(StatusCode::BAD_REQUEST, "Session ID is required.");
        }
        Some(raw) => match Uuid::parse_str(raw) {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(session_id = %raw, "Invalid session ID format");
                return error_response(StatusCode::BAD_REQUEST, "Invalid session ID format.");
            }
        },
    };
    tracing::Span::current().record("session_id", tracing::field::display(session_id));
    tracing::debug!(user_input = %sanitize_prompt(&request.user_input), "Processing intake input");

    let turn = IntakeTurn {
        user_input: request.user_input,
        previous_output: request.previous_gpt_output,
        collected: UserInfo::from_map(request.collected_data),
        confirmation_status: request.confirmation_status,
    };

    let outcome = state.intake_service.collect(turn).await;

    (
        StatusCode::OK,
        Json(CollectUserInfoResponse {
            status: outcome.status.as_str().to_string(),
            response: outcome.response,
            collected_data: outcome.collected.into_map(),
            confirmation_status: outcome.confirmation_status,
            transition_to_qa: outcome.transition_to_qa,
        }),
    )
        .into_response()
}
