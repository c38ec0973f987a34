use std::time::Duration;

use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::presentation::handlers::{
    AnswerQueryRequest, AnswerQueryResponse, CollectUserInfoRequest, CollectUserInfoResponse,
    ErrorResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{detail} (HTTP {status})")]
    Api { status: u16, detail: String },
}

/// HTTP client for the chat API server.
#[derive(Clone)]
pub struct ChatApiClient {
    client: Client,
    base_url: String,
}

impl ChatApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FrontendError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn collect_user_info(
        &self,
        request: &CollectUserInfoRequest,
    ) -> Result<CollectUserInfoResponse, FrontendError> {
        self.post("collect_user_info", request).await
    }

    pub async fn answer_query(
        &self,
        request: &AnswerQueryRequest,
    ) -> Result<AnswerQueryResponse, FrontendError> {
        self.post("answer_query", request).await
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, FrontendError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        let response = self.client.post(url).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<R: DeserializeOwned>(response: Response) -> Result<R, FrontendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.detail)
        .unwrap_or(body);

    Err(FrontendError::Api {
        status: status.as_u16(),
        detail,
    })
}
