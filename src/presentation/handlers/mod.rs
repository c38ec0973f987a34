mod answer_query;
mod collect_user_info;
mod documents;
mod error_response;
mod health;
mod nullable;
mod root;

pub use answer_query::{AnswerQueryRequest, AnswerQueryResponse, ClosestMatch, answer_query_handler};
pub use collect_user_info::{
    CollectUserInfoRequest, CollectUserInfoResponse, collect_user_info_handler,
};
pub use documents::{
    DocumentAskResponse, DocumentFieldsResponse, ask_document_handler, extract_fields_handler,
};
pub use error_response::ErrorResponse;
pub use health::{HealthResponse, health_handler};
pub use root::{RootResponse, WELCOME_MESSAGE, root_handler};
