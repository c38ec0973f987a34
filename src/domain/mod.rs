mod chunk;
mod document;
mod embedding;
mod form_validation;
mod message;
mod message_role;
mod user_info;

pub use chunk::{KnowledgeBase, KnowledgeChunk};
pub use document::{ContentType, Document, SourceFile};
pub use embedding::Embedding;
pub use form_validation::{
    DynamicReport, FieldMismatch, FormLanguage, GroundTruthReport, contains_hebrew, flatten_json,
    normalize_keys, validate_dynamic, validate_with_ground_truth,
};
pub use message::Message;
pub use message_role::MessageRole;
pub use user_info::{FieldValidationError, UserField, UserInfo};
