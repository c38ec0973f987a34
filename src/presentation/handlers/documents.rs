use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error_response::error_response;
use crate::application::ports::{KnowledgeStore, LlmClient, OcrClient, ServiceError};
use crate::application::services::DocumentError;
use crate::domain::{ContentType, Document};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct AskParams {
    pub question: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FieldsParams {
    pub filename: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentAskResponse {
    pub text: String,
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentFieldsResponse {
    pub text: String,
    pub fields: Value,
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn ask_document_handler<O, L, K>(
    State(state): State<AppState<O, L, K>>,
    Query(params): Query<AskParams>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    O: OcrClient + 'static,
    L: LlmClient + 'static,
    K: KnowledgeStore + 'static,
{
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(rejection),
    };
    let document = match uploaded_document(&headers, params.filename, body.len()) {
        Ok(document) => document,
        Err(response) => return response,
    };

    let question = params
        .question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());
    if let Some(question) = question {
        tracing::debug!(question = %sanitize_prompt(question), "Answering question about document");
    }

    match state
        .document_service
        .ask(&body, &document, question)
        .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(DocumentAskResponse {
                text: answer.text,
                response: answer.response,
            }),
        )
            .into_response(),
        Err(e) => document_error_response(e),
    }
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn extract_fields_handler<O, L, K>(
    State(state): State<AppState<O, L, K>>,
    Query(params): Query<FieldsParams>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    O: OcrClient + 'static,
    L: LlmClient + 'static,
    K: KnowledgeStore + 'static,
{
    let body = match body {
        Ok(body) => body,
        Err(rejection) => return body_rejection_response(rejection),
    };
    let document = match uploaded_document(&headers, params.filename, body.len()) {
        Ok(document) => document,
        Err(response) => return response,
    };

    match state
        .document_service
        .extract_fields(&body, &document)
        .await
    {
        Ok(extraction) => (
            StatusCode::OK,
            Json(DocumentFieldsResponse {
                text: extraction.text,
                fields: extraction.fields,
            }),
        )
            .into_response(),
        Err(e) => document_error_response(e),
    }
}

fn uploaded_document(
    headers: &HeaderMap,
    filename: Option<String>,
    size: usize,
) -> Result<Document, Response> {
    let mime = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let content_type = ContentType::from_mime(mime)
        .filter(ContentType::is_scannable)
        .ok_or_else(|| {
            tracing::warn!(content_type = %mime, "Unsupported content type");
            error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported content type: {}", mime),
            )
        })?;

    let filename = filename.unwrap_or_else(|| "upload".to_string());
    Ok(Document::new(filename, content_type, size as u64))
}

// Oversized uploads surface here as 413 once the route's body limit is hit.
fn body_rejection_response(rejection: BytesRejection) -> Response {
    tracing::warn!(error = %rejection, "Rejected document body");
    error_response(rejection.status(), rejection.body_text())
}

fn document_error_response(error: DocumentError) -> Response {
    tracing::error!(error = %error, "Document request failed");

    let status = match &error {
        DocumentError::EmptyDocument => StatusCode::BAD_REQUEST,
        DocumentError::Ocr(e) => match e {
            ServiceError::Authentication(_) => StatusCode::UNAUTHORIZED,
            ServiceError::MalformedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::BAD_GATEWAY,
        },
        DocumentError::Completion(_) | DocumentError::MalformedReply(_) => StatusCode::BAD_GATEWAY,
    };

    error_response(status, error.to_string())
}
