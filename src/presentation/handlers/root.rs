use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Welcome to the Medical Chatbot API";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: WELCOME_MESSAGE,
    })
}
