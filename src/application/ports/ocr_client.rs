use async_trait::async_trait;

use super::ServiceError;
use crate::domain::Document;

#[async_trait]
pub trait OcrClient: Send + Sync {
    /// Extracts the document's text, one recognized line per line.
    async fn extract_text(&self, data: &[u8], document: &Document) -> Result<String, ServiceError>;
}
