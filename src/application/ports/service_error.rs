/// Failure of a call to an external cloud service (OCR, chat completion, embeddings).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("rate limited")]
    RateLimited,
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ServiceError {
    /// Maps a non-success HTTP status from a cloud API onto the error taxonomy.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = format!("HTTP {}: {}", status, body);
        match status {
            401 | 403 => Self::Authentication(detail),
            429 => Self::RateLimited,
            400 | 404 | 413 | 415 | 422 => Self::MalformedInput(detail),
            _ => Self::Unavailable(detail),
        }
    }

    /// Rate limiting counts as the service being unavailable to the caller.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::RateLimited)
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}
