use async_trait::async_trait;

use super::ServiceError;
use crate::domain::Embedding;

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Embedding, ServiceError>;
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, ServiceError>;
}
