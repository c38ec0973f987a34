use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use super::clean_numeric_fields;
use crate::application::ports::{OcrClient, ServiceError};
use crate::domain::Document;
use crate::presentation::config::OcrSettings;

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// OCR through the Azure Form Recognizer / Document Intelligence analyze API.
pub struct AzureDocIntelAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    model_id: String,
    api_version: String,
    poll_interval: Duration,
    poll_timeout: Duration,
}

enum Submission {
    Completed(AnalyzeResult),
    Pending(String),
}

impl AzureDocIntelAdapter {
    pub fn new(settings: &OcrSettings) -> Result<Self, ServiceError> {
        if settings.api_key.trim().is_empty() {
            return Err(ServiceError::Authentication(
                "OCR API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .map_err(|e| ServiceError::Unavailable(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model_id: settings.model_id.clone(),
            api_version: settings.api_version.clone(),
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
            poll_timeout: Duration::from_secs(settings.poll_timeout_secs),
        })
    }

    fn analyze_url(&self) -> String {
        format!(
            "{}/formrecognizer/documentModels/{}:analyze?api-version={}",
            self.endpoint, self.model_id, self.api_version
        )
    }

    async fn submit(&self, data: &[u8], document: &Document) -> Result<Submission, ServiceError> {
        let response = self
            .client
            .post(self.analyze_url())
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .header(reqwest::header::CONTENT_TYPE, document.content_type.as_mime())
            .body(data.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status.as_u16(), &body));
        }

        if status == StatusCode::OK {
            let result: AnalyzeResponse = response.json().await?;
            return result.into_result().map(Submission::Completed);
        }

        let operation_url = response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ServiceError::InvalidResponse(
                    "analyze response missing Operation-Location header".to_string(),
                )
            })?
            .to_string();

        Ok(Submission::Pending(operation_url))
    }

    async fn poll_until_complete(&self, operation_url: &str) -> Result<AnalyzeResult, ServiceError> {
        let poll_future = async {
            loop {
                let response = self
                    .client
                    .get(operation_url)
                    .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status().as_u16();
                    let body = response.text().await.unwrap_or_default();
                    return Err(ServiceError::from_status(status, &body));
                }

                let result: AnalyzeResponse = response.json().await?;
                match result.status.as_str() {
                    "succeeded" | "failed" => return result.into_result(),
                    other => {
                        tracing::debug!(status = %other, "Analysis still running");
                        tokio::time::sleep(self.poll_interval).await;
                    }
                }
            }
        };

        tokio::time::timeout(self.poll_timeout, poll_future)
            .await
            .map_err(|_| {
                ServiceError::Unavailable(format!(
                    "document analysis did not finish within {}s",
                    self.poll_timeout.as_secs()
                ))
            })?
    }
}

#[async_trait]
impl OcrClient for AzureDocIntelAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            filename = %document.filename,
            content_type = %document.content_type.as_mime(),
            size_bytes = data.len()
        )
    )]
    async fn extract_text(&self, data: &[u8], document: &Document) -> Result<String, ServiceError> {
        if !document.content_type.is_scannable() {
            return Err(ServiceError::MalformedInput(format!(
                "unsupported document type: {}",
                document.content_type.as_mime()
            )));
        }

        let result = match self.submit(data, document).await? {
            Submission::Completed(result) => result,
            Submission::Pending(operation_url) => self.poll_until_complete(&operation_url).await?,
        };

        let text = clean_numeric_fields(&result.text());
        if text.trim().is_empty() {
            return Err(ServiceError::MalformedInput(format!(
                "no text found in {}",
                document.filename
            )));
        }

        tracing::info!(lines = text.lines().count(), "Document text extracted");
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResponse {
    pub status: String,
    #[serde(rename = "analyzeResult")]
    pub analyze_result: Option<AnalyzeResult>,
    pub error: Option<AnalyzeError>,
}

impl AnalyzeResponse {
    fn into_result(self) -> Result<AnalyzeResult, ServiceError> {
        if self.status == "failed" {
            let reason = self
                .error
                .map(|e| format!("{}: {}", e.code, e.message))
                .unwrap_or_else(|| "document analysis failed".to_string());
            return Err(ServiceError::MalformedInput(reason));
        }

        self.analyze_result.ok_or_else(|| {
            ServiceError::InvalidResponse(format!(
                "analysis {} without analyzeResult",
                self.status
            ))
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub pages: Vec<AnalyzedPage>,
}

impl AnalyzeResult {
    /// Page lines joined with newlines, or the flat content when no lines were returned.
    pub fn text(&self) -> String {
        let lines: Vec<&str> = self
            .pages
            .iter()
            .flat_map(|page| page.lines.iter().map(|line| line.content.as_str()))
            .collect();

        if lines.is_empty() {
            self.content.clone()
        } else {
            lines.join("\n")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzedPage {
    #[serde(default)]
    pub lines: Vec<AnalyzedLine>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzedLine {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
