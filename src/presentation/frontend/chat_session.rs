use uuid::Uuid;

use super::{ChatApiClient, FrontendError};
use crate::domain::UserInfo;
use crate::presentation::handlers::{AnswerQueryRequest, CollectUserInfoRequest};

pub const QA_READY_MESSAGE: &str =
    "All information collected successfully! You can now proceed to the Q&A phase.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub query: String,
    pub response: String,
}

/// Client-side state of one chat: the intake phase followed by the Q&A phase.
pub struct ChatSession {
    client: ChatApiClient,
    session_id: Uuid,
    user_info: UserInfo,
    previous_output: String,
    confirmation_status: bool,
    in_qa_phase: bool,
    history: Vec<Exchange>,
}

impl ChatSession {
    pub fn new(client: ChatApiClient) -> Self {
        Self {
            client,
            session_id: Uuid::new_v4(),
            user_info: UserInfo::new(),
            previous_output: String::new(),
            confirmation_status: false,
            in_qa_phase: false,
            history: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn in_qa_phase(&self) -> bool {
        self.in_qa_phase
    }

    pub fn history(&self) -> &[Exchange] {
        &self.history
    }

    /// Sends one intake message and returns the text to show the user.
    pub async fn submit_info(&mut self, input: &str) -> String {
        match self.try_submit_info(input).await {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!(error = %e, "Intake request failed");
                format!("Error: {e}")
            }
        }
    }

    /// Sends one question and returns the answer to show the user.
    pub async fn ask(&mut self, question: &str) -> String {
        match self.try_ask(question).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, "Query request failed");
                format!("Error: {e}")
            }
        }
    }

    async fn try_submit_info(&mut self, input: &str) -> Result<String, FrontendError> {
        let request = CollectUserInfoRequest {
            session_id: Some(self.session_id.to_string()),
            user_input: input.to_string(),
            previous_gpt_output: self.previous_output.clone(),
            collected_data: self.user_info.as_map().clone(),
            confirmation_status: self.confirmation_status,
        };

        let response = self.client.collect_user_info(&request).await?;
        self.user_info
            .merge(&UserInfo::from_map(response.collected_data));
        self.confirmation_status = response.confirmation_status;
        self.previous_output = response.response.clone();

        if !response.transition_to_qa {
            return Ok(response.response);
        }

        let missing = self.user_info.missing_fields();
        if missing.is_empty() {
            self.in_qa_phase = true;
            return Ok(QA_READY_MESSAGE.to_string());
        }

        let names: Vec<&str> = missing.iter().map(|f| f.as_str()).collect();
        Ok(format!(
            "Error: Missing fields detected ({}). Please complete all fields.",
            names.join(", ")
        ))
    }

    async fn try_ask(&mut self, question: &str) -> Result<String, FrontendError> {
        let request = AnswerQueryRequest {
            user_info: self.user_info.as_map().clone(),
            question: question.to_string(),
            session_id: Some(self.session_id.to_string()),
        };

        let response = self.client.answer_query(&request).await?;
        self.history.push(Exchange {
            query: question.to_string(),
            response: response.answer.clone(),
        });
        Ok(response.answer)
    }
}
