mod api_client;
mod chat_session;

pub use api_client::{ChatApiClient, FrontendError};
pub use chat_session::{ChatSession, Exchange, QA_READY_MESSAGE};
