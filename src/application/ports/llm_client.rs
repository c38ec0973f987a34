use async_trait::async_trait;

use super::ServiceError;
use crate::domain::Message;

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat(&self, messages: &[Message]) -> Result<String, ServiceError>;

    /// Single-turn completion with optional system context.
    async fn complete(&self, prompt: &str, context: &str) -> Result<String, ServiceError> {
        let mut messages = Vec::with_capacity(2);
        if !context.trim().is_empty() {
            messages.push(Message::system(context));
        }
        messages.push(Message::user(prompt));
        self.chat(&messages).await
    }
}
