use std::sync::Arc;

use super::prompts;
use crate::application::ports::{
    Embedder, KnowledgeStore, KnowledgeStoreError, LlmClient, SearchResult, ServiceError,
};
use crate::domain::{Message, UserField, UserInfo};

pub struct RetrievalService<L, K>
where
    L: LlmClient,
    K: KnowledgeStore,
{
    embedder: Arc<dyn Embedder>,
    llm_client: Arc<L>,
    knowledge_store: Arc<K>,
    max_distance: f32,
    max_matches: Option<usize>,
}

impl<L, K> RetrievalService<L, K>
where
    L: LlmClient,
    K: KnowledgeStore,
{
    pub fn new(
        embedder: Arc<dyn Embedder>,
        llm_client: Arc<L>,
        knowledge_store: Arc<K>,
        max_distance: f32,
        max_matches: Option<usize>,
    ) -> Self {
        Self {
            embedder,
            llm_client,
            knowledge_store,
            max_distance,
            max_matches,
        }
    }

    /// Number of chunks the knowledge store can search.
    pub async fn indexed_chunks(&self) -> Result<usize, KnowledgeStoreError> {
        self.knowledge_store.chunk_count().await
    }

    pub async fn answer_query(
        &self,
        user_info: &UserInfo,
        question: &str,
    ) -> Result<QueryAnswer, RetrievalError> {
        let question = question.trim();
        if user_info.is_empty() || question.is_empty() {
            return Err(RetrievalError::MissingInput(
                "User info and question are required".to_string(),
            ));
        }

        let hmo_name = user_info.get(UserField::HmoName).unwrap_or_default();
        let membership_tier = user_info
            .get(UserField::InsuranceMembershipTier)
            .unwrap_or_default();
        tracing::info!(hmo = %hmo_name, tier = %membership_tier, "Answering query");

        let query_embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(RetrievalError::Embedding)?;

        let mut matches = self
            .knowledge_store
            .search(&query_embedding, self.max_distance)
            .await?;

        if matches.is_empty() {
            tracing::warn!("No relevant information found in the knowledge base");
            return Err(RetrievalError::NoRelevantContext);
        }
        if let Some(limit) = self.max_matches {
            matches.truncate(limit);
        }
        tracing::info!(matches = matches.len(), "Found relevant matches");

        let contexts: Vec<&str> = matches.iter().map(|m| m.content.as_str()).collect();
        let prompt =
            prompts::answer_query_prompt(hmo_name, membership_tier, &contexts, question);

        let answer = self
            .llm_client
            .chat(&[Message::system(prompt)])
            .await
            .map_err(RetrievalError::Completion)?;

        Ok(QueryAnswer {
            answer: answer.trim().to_string(),
            matches,
        })
    }
}

#[derive(Debug, Clone)]
pub struct QueryAnswer {
    pub answer: String,
    pub matches: Vec<SearchResult>,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("no relevant information found in the knowledge base")]
    NoRelevantContext,
    #[error("embedding: {0}")]
    Embedding(ServiceError),
    #[error("search: {0}")]
    Search(#[from] KnowledgeStoreError),
    #[error("completion: {0}")]
    Completion(ServiceError),
}
