use std::sync::Arc;

use crate::application::ports::{KnowledgeStore, LlmClient, OcrClient};
use crate::application::services::{DocumentService, IntakeService, RetrievalService};

pub struct AppState<O, L, K>
where
    O: OcrClient,
    L: LlmClient,
    K: KnowledgeStore,
{
    pub document_service: Arc<DocumentService<O, L>>,
    pub retrieval_service: Arc<RetrievalService<L, K>>,
    pub intake_service: Arc<IntakeService<L>>,
    pub max_upload_bytes: usize,
}

impl<O, L, K> Clone for AppState<O, L, K>
where
    O: OcrClient,
    L: LlmClient,
    K: KnowledgeStore,
{
    fn clone(&self) -> Self {
        Self {
            document_service: Arc::clone(&self.document_service),
            retrieval_service: Arc::clone(&self.retrieval_service),
            intake_service: Arc::clone(&self.intake_service),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
