use async_trait::async_trait;

use crate::application::ports::{KnowledgeStore, KnowledgeStoreError, SearchResult};
use crate::domain::{Embedding, KnowledgeBase};

/// Exhaustive cosine-distance search over a knowledge base held in memory.
pub struct InMemoryKnowledgeStore {
    knowledge_base: KnowledgeBase,
}

impl InMemoryKnowledgeStore {
    pub fn new(knowledge_base: KnowledgeBase) -> Self {
        Self { knowledge_base }
    }
}

#[async_trait]
impl KnowledgeStore for InMemoryKnowledgeStore {
    async fn search(
        &self,
        embedding: &Embedding,
        max_distance: f32,
    ) -> Result<Vec<SearchResult>, KnowledgeStoreError> {
        if let Some(expected) = self.knowledge_base.embedding_dimensions() {
            if expected != embedding.dimensions() {
                return Err(KnowledgeStoreError::SearchFailed(format!(
                    "query has {} dimensions, knowledge base has {}",
                    embedding.dimensions(),
                    expected
                )));
            }
        }

        let mut matches: Vec<SearchResult> = self
            .knowledge_base
            .iter_chunks()
            .filter_map(|(file, chunk)| {
                let distance = embedding.cosine_distance(&chunk.embedding);
                (distance <= max_distance).then(|| SearchResult {
                    file: file.to_string(),
                    chunk_id: chunk.chunk_id.clone(),
                    content: chunk.content.clone(),
                    distance,
                })
            })
            .collect();

        matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        Ok(matches)
    }

    async fn chunk_count(&self) -> Result<usize, KnowledgeStoreError> {
        Ok(self.knowledge_base.chunk_count())
    }
}
