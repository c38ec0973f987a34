#[derive(Debug, thiserror::Error)]
pub enum KnowledgeStoreError {
    #[error("knowledge base not found: {0}")]
    NotFound(String),
    #[error("knowledge base read failed: {0}")]
    ReadFailed(String),
    #[error("knowledge base is malformed: {0}")]
    Malformed(String),
    #[error("knowledge base write failed: {0}")]
    WriteFailed(String),
    #[error("search failed: {0}")]
    SearchFailed(String),
}
