use async_trait::async_trait;

use super::{KnowledgeStoreError, SearchResult};
use crate::domain::{Embedding, KnowledgeBase};

#[async_trait]
pub trait KnowledgeStore: Send + Sync {
    /// Chunks within `max_distance` (cosine) of `embedding`, nearest first.
    async fn search(
        &self,
        embedding: &Embedding,
        max_distance: f32,
    ) -> Result<Vec<SearchResult>, KnowledgeStoreError>;

    async fn chunk_count(&self) -> Result<usize, KnowledgeStoreError>;
}

/// Destination the knowledge-base builder persists to.
#[async_trait]
pub trait KnowledgeBaseWriter: Send + Sync {
    async fn save(&self, knowledge_base: &KnowledgeBase) -> Result<(), KnowledgeStoreError>;
}
