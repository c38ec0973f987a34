use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{KnowledgeStore, LlmClient, OcrClient};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    answer_query_handler, ask_document_handler, collect_user_info_handler,
    extract_fields_handler, health_handler, root_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<O, L, K>(state: AppState<O, L, K>) -> Router
where
    O: OcrClient + 'static,
    L: LlmClient + 'static,
    K: KnowledgeStore + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler::<O, L, K>))
        .route(
            "/collect_user_info",
            post(collect_user_info_handler::<O, L, K>),
        )
        .route("/answer_query", post(answer_query_handler::<O, L, K>))
        .route(
            "/api/v1/documents/ask",
            post(ask_document_handler::<O, L, K>).layer(upload_limit.clone()),
        )
        .route(
            "/api/v1/documents/fields",
            post(extract_fields_handler::<O, L, K>).layer(upload_limit),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
