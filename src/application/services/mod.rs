mod document_service;
mod intake_service;
mod knowledge_base_builder;
pub mod prompts;
mod reply_parser;
mod retrieval_service;

pub use document_service::{
    DocumentAnswer, DocumentError, DocumentService, FewShotExample, FormExtraction,
};
pub use intake_service::{
    CONFIRMED_MESSAGE, IntakeOutcome, IntakeService, IntakeStatus, IntakeTurn,
};
pub use knowledge_base_builder::{BuildError, BuildSummary, EMBED_BATCH_SIZE, KnowledgeBaseBuilder};
pub use reply_parser::{ReplyParseError, parse_json_reply};
pub use retrieval_service::{QueryAnswer, RetrievalError, RetrievalService};
