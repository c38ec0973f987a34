use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use super::prompts;
use super::reply_parser::parse_json_reply;
use crate::application::ports::LlmClient;
use crate::domain::{Message, UserField, UserInfo};

pub const CONFIRMED_MESSAGE: &str = "Thank you for confirming! You can now ask questions.";
const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred. Please try again later.";
const PARSE_ERROR_MESSAGE: &str = "There was an issue processing your input. Please try again.";
const STRUCTURE_ERROR_MESSAGE: &str = "An unexpected issue occurred. Please try again.";
const INVALID_INPUT_MESSAGE: &str = "Invalid input. Please provide the required information.";

/// One exchange of the information-collection phase.
#[derive(Debug, Clone, Default)]
pub struct IntakeTurn {
    pub user_input: String,
    pub previous_output: String,
    pub collected: UserInfo,
    pub confirmation_status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeStatus {
    Success,
    Pending,
    Error,
}

impl IntakeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntakeStatus::Success => "success",
            IntakeStatus::Pending => "pending",
            IntakeStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub status: IntakeStatus,
    pub response: String,
    pub collected: UserInfo,
    pub confirmation_status: bool,
    pub transition_to_qa: bool,
}

impl IntakeOutcome {
    fn stay(status: IntakeStatus, response: impl Into<String>, turn: IntakeTurn) -> Self {
        Self {
            status,
            response: response.into(),
            collected: turn.collected,
            confirmation_status: turn.confirmation_status,
            transition_to_qa: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IntakeReply {
    field_to_update: Option<String>,
    value: Option<Value>,
    message_to_user: Option<String>,
    confirmation_status: Option<bool>,
    transition_to_qa: Option<bool>,
}

pub struct IntakeService<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
}

impl<L> IntakeService<L>
where
    L: LlmClient,
{
    pub fn new(llm_client: Arc<L>) -> Self {
        Self { llm_client }
    }

    /// Advances the collection phase by one user message.
    ///
    /// Model and parsing failures are reported through [`IntakeStatus::Error`]
    /// with the collected data left untouched.
    pub async fn collect(&self, mut turn: IntakeTurn) -> IntakeOutcome {
        let missing = turn.collected.missing_fields();
        tracing::info!(missing = missing.len(), "Collecting user information");

        let prompt = if missing.is_empty() {
            prompts::intake_confirm_prompt(
                &turn.collected,
                &turn.user_input,
                &turn.previous_output,
                turn.confirmation_status,
            )
        } else {
            prompts::intake_collect_prompt(
                &turn.collected,
                &turn.user_input,
                &turn.previous_output,
                turn.confirmation_status,
            )
        };

        let raw_reply = match self.llm_client.chat(&[Message::system(prompt)]).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Intake completion failed");
                return IntakeOutcome::stay(IntakeStatus::Error, INTERNAL_ERROR_MESSAGE, turn);
            }
        };

        let reply: IntakeReply = match parse_json_reply(&raw_reply)
            .map_err(|e| e.to_string())
            .and_then(|v| serde_json::from_value(v).map_err(|e| e.to_string()))
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Failed to decode intake reply");
                return IntakeOutcome::stay(IntakeStatus::Error, PARSE_ERROR_MESSAGE, turn);
            }
        };

        let (Some(message), Some(new_confirmation), Some(wants_transition)) = (
            reply.message_to_user,
            reply.confirmation_status,
            reply.transition_to_qa,
        ) else {
            tracing::error!("Intake reply is missing required keys");
            return IntakeOutcome::stay(IntakeStatus::Error, STRUCTURE_ERROR_MESSAGE, turn);
        };

        let value = reply.value.as_ref().and_then(value_as_text);

        if !missing.is_empty() && value.is_none() {
            tracing::warn!(field = ?reply.field_to_update, "No usable value; re-prompting");
            let message = if message.trim().is_empty() {
                INVALID_INPUT_MESSAGE.to_string()
            } else {
                message
            };
            return IntakeOutcome::stay(IntakeStatus::Pending, message, turn);
        }

        if let Some(value) = value {
            let field = reply
                .field_to_update
                .as_deref()
                .and_then(|f| f.parse::<UserField>().ok());

            match field {
                Some(field) => {
                    if let Err(e) = field.validate(&value) {
                        tracing::warn!(field = %field, error = %e, "Field validation failed");
                        return IntakeOutcome::stay(
                            IntakeStatus::Pending,
                            format!("{} Please try again.", e),
                            turn,
                        );
                    }
                    tracing::info!(field = %field, "Updated collected field");
                    turn.collected.set(field, value);
                }
                None => {
                    tracing::warn!(field = ?reply.field_to_update, "Ignoring value for unknown field");
                }
            }
        }

        let transition = wants_transition && new_confirmation && turn.collected.is_complete();
        tracing::info!(
            transition_to_qa = transition,
            confirmation_status = new_confirmation,
            "Intake step complete"
        );

        if transition {
            return IntakeOutcome {
                status: IntakeStatus::Success,
                response: CONFIRMED_MESSAGE.to_string(),
                collected: turn.collected,
                confirmation_status: true,
                transition_to_qa: true,
            };
        }

        IntakeOutcome {
            status: IntakeStatus::Success,
            response: message,
            collected: turn.collected,
            confirmation_status: new_confirmation,
            transition_to_qa: false,
        }
    }
}

fn value_as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}
