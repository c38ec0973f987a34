mod embedder;
mod file_loader;
mod knowledge_store;
mod knowledge_store_error;
mod llm_client;
mod ocr_client;
mod search_result;
mod service_error;
mod text_splitter;

pub use embedder::Embedder;
pub use file_loader::{FileLoader, FileLoaderError};
pub use knowledge_store::{KnowledgeBaseWriter, KnowledgeStore};
pub use knowledge_store_error::KnowledgeStoreError;
pub use llm_client::LlmClient;
pub use ocr_client::OcrClient;
pub use search_result::SearchResult;
pub use service_error::ServiceError;
pub use text_splitter::TextSplitter;
